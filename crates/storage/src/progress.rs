//! Per-file upload progress.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::watch;

/// Latest progress of one file, in whole percent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileProgress {
    pub name: String,
    pub percent: u8,
}

/// Publishes the progress of every file in the current batch.
///
/// Each report replaces the previous entry for the same file name and moves
/// it to the end of the list. Views subscribe with [`Self::subscribe`].
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    sender: Arc<watch::Sender<Vec<FileProgress>>>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Vec::new());
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<FileProgress>> {
        self.sender.subscribe()
    }

    /// Record `transferred` of `total` bytes for `name`.
    pub fn report(&self, name: &str, transferred: u64, total: u64) {
        let entry = FileProgress {
            name: name.to_string(),
            percent: percent(transferred, total),
        };
        self.sender.send_modify(|files| {
            files.retain(|f| f.name != entry.name);
            files.push(entry);
        });
    }

    pub fn snapshot(&self) -> Vec<FileProgress> {
        self.sender.borrow().clone()
    }

    pub fn clear(&self) {
        self.sender.send_replace(Vec::new());
    }
}

/// `round(transferred / total * 100)`, clamped to 100. An empty file is done.
pub fn percent(transferred: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (transferred as f64 / total as f64 * 100.0).round();
    pct.clamp(0.0, 100.0) as u8
}
