use std::path::PathBuf;

use folio_core::locale::Locale;

/// Where project media is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MediaBackend {
    /// Files under `root`, served from `public_url`.
    Local { root: PathBuf, public_url: String },
    /// Objects in an S3 bucket, served from `public_url`.
    S3 { bucket: String, public_url: String },
    /// In-process only. Lost on restart.
    Memory { public_url: String },
}

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Request body limit for media uploads (default: 256 MiB).
    pub max_upload_bytes: usize,
    /// PostgreSQL URL. Without one, projects are kept in memory.
    pub database_url: Option<String>,
    pub media: MediaBackend,
    /// Locale for view routes that do not pass `?lang=`.
    pub default_locale: Locale,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                          |
    /// |------------------------|----------------------------------|
    /// | `HOST`                 | `0.0.0.0`                        |
    /// | `PORT`                 | `3000`                           |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`          |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                             |
    /// | `MAX_UPLOAD_BYTES`     | `268435456`                      |
    /// | `DATABASE_URL`         | unset (in-memory store)          |
    /// | `MEDIA_BACKEND`        | `local` (`local`, `s3`, `memory`)|
    /// | `MEDIA_ROOT`           | `./media`                        |
    /// | `MEDIA_PUBLIC_URL`     | `http://localhost:3000/media`    |
    /// | `S3_BUCKET`            | required when backend is `s3`    |
    /// | `DEFAULT_LOCALE`       | `ja`                             |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_upload_bytes: usize = std::env::var("MAX_UPLOAD_BYTES")
            .unwrap_or_else(|_| (256 * 1024 * 1024).to_string())
            .parse()
            .expect("MAX_UPLOAD_BYTES must be a valid usize");

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.trim().is_empty());

        let public_url = std::env::var("MEDIA_PUBLIC_URL")
            .unwrap_or_else(|_| format!("http://localhost:{port}/media"));
        let media = match std::env::var("MEDIA_BACKEND")
            .unwrap_or_else(|_| "local".into())
            .to_lowercase()
            .as_str()
        {
            "local" => MediaBackend::Local {
                root: std::env::var("MEDIA_ROOT")
                    .unwrap_or_else(|_| "./media".into())
                    .into(),
                public_url,
            },
            "s3" => MediaBackend::S3 {
                bucket: std::env::var("S3_BUCKET")
                    .expect("S3_BUCKET must be set when MEDIA_BACKEND=s3"),
                public_url,
            },
            "memory" => MediaBackend::Memory { public_url },
            other => panic!("MEDIA_BACKEND must be local, s3 or memory, got '{other}'"),
        };

        let default_locale = std::env::var("DEFAULT_LOCALE")
            .map(|tag| Locale::from_tag(&tag))
            .unwrap_or_default();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_upload_bytes,
            database_url,
            media,
            default_locale,
        }
    }
}
