use std::sync::Arc;

use folio_db::ProjectStore;
use folio_manager::ProjectManager;
use folio_storage::MediaStore;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheaply cloneable; every field is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Admin operations over both stores.
    pub manager: ProjectManager,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        projects: Arc<dyn ProjectStore>,
        media: Arc<dyn MediaStore>,
        config: ServerConfig,
    ) -> Self {
        Self {
            manager: ProjectManager::new(projects, media),
            config: Arc::new(config),
        }
    }

    pub fn projects(&self) -> &dyn ProjectStore {
        self.manager.projects().as_ref()
    }
}
