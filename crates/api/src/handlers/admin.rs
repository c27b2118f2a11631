//! Admin gate and not-found handlers.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use folio_core::error::CoreError;
use folio_core::gate::check_secret;
use folio_core::locale::translate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::query::{resolve_locale, LangParams};
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UnlockRequest {
    #[serde(default)]
    pub secret: String,
}

#[derive(Debug, Serialize)]
pub struct UnlockResponse {
    pub unlocked: bool,
}

/// POST /project-manager
///
/// Checks the admin secret. This gates the admin screen only; mutating API
/// calls must still send the secret in `x-admin-secret`.
pub async fn unlock(Json(input): Json<UnlockRequest>) -> AppResult<Json<DataResponse<UnlockResponse>>> {
    if !check_secret(&input.secret) {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Incorrect password!".into(),
        )));
    }
    Ok(Json(DataResponse {
        data: UnlockResponse { unlocked: true },
    }))
}

#[derive(Debug, Serialize)]
pub struct NotFoundBody {
    pub error: String,
    pub code: &'static str,
    pub title: String,
}

/// Fallback for unknown paths.
pub async fn not_found(
    State(state): State<AppState>,
    Query(params): Query<LangParams>,
) -> (StatusCode, Json<NotFoundBody>) {
    let locale = resolve_locale(params.lang.as_deref(), state.config.default_locale);
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            error: translate("not_found_message", locale),
            code: "NOT_FOUND",
            title: translate("not_found_title", locale),
        }),
    )
}
