//! Admin gate extractor for mutating routes.
//!
//! The secret is a shared constant sent in the `x-admin-secret` header. It
//! keeps casual visitors out of the admin routes and nothing more; see
//! [`folio_core::gate`].

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use folio_core::error::CoreError;
use folio_core::gate::{check_secret, ADMIN_SECRET_HEADER};

use crate::error::AppError;

/// Rejects with 401 unless the request carries the admin secret.
///
/// ```ignore
/// async fn delete(_: RequireAdminSecret, Path(id): Path<String>) -> AppResult<StatusCode> {
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
pub struct RequireAdminSecret;

impl<S: Send + Sync> FromRequestParts<S> for RequireAdminSecret {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let secret = parts
            .headers
            .get(ADMIN_SECRET_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default();
        if !check_secret(secret) {
            tracing::warn!(path = %parts.uri.path(), "Rejected admin request without valid secret");
            return Err(AppError::Core(CoreError::Unauthorized(
                "Incorrect password!".into(),
            )));
        }
        Ok(RequireAdminSecret)
    }
}
