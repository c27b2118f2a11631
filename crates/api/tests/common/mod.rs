#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use folio_api::config::{MediaBackend, ServerConfig};
use folio_api::router::build_app_router;
use folio_api::state::AppState;
use folio_core::gate::{ADMIN_SECRET, ADMIN_SECRET_HEADER};
use folio_core::locale::Locale;
use folio_db::MemoryProjectStore;
use folio_storage::MemoryMediaStore;
use http_body_util::BodyExt;
use tower::ServiceExt;

pub const MEDIA_URL: &str = "https://cdn.test";
pub const BOUNDARY: &str = "folio-test-boundary";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        max_upload_bytes: 16 * 1024 * 1024,
        database_url: None,
        media: MediaBackend::Memory {
            public_url: MEDIA_URL.to_string(),
        },
        default_locale: Locale::Ja,
    }
}

/// Handles onto the in-memory stores behind a test app.
pub struct TestStores {
    pub projects: MemoryProjectStore,
    pub media: MemoryMediaStore,
}

/// Build the full application router over fresh in-memory stores.
pub fn build_test_app() -> (Router, TestStores) {
    let config = test_config();
    let projects = MemoryProjectStore::new();
    let media = MemoryMediaStore::new(MEDIA_URL);
    let state = AppState::new(
        Arc::new(projects.clone()),
        Arc::new(media.clone()),
        config.clone(),
    );
    (
        build_app_router(state, &config),
        TestStores { projects, media },
    )
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub fn admin_request(method: Method, uri: &str) -> axum::http::request::Builder {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(ADMIN_SECRET_HEADER, ADMIN_SECRET)
}

// ---------------------------------------------------------------------------
// Multipart bodies
// ---------------------------------------------------------------------------

pub enum Part<'a> {
    Text { name: &'a str, value: &'a str },
    File { name: &'a str, file_name: &'a str, data: &'a [u8] },
}

pub fn multipart_body(parts: &[Part<'_>]) -> Body {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{BOUNDARY}\r\n").as_bytes());
        match part {
            Part::Text { name, value } => {
                body.extend_from_slice(
                    format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
                );
                body.extend_from_slice(value.as_bytes());
            }
            Part::File {
                name,
                file_name,
                data,
            } => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\n\
                         Content-Type: application/octet-stream\r\n\r\n"
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(data);
            }
        }
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Body::from(body)
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={BOUNDARY}")
}
