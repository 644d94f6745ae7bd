// HTTP error mapping for the API surface
use crate::application::auth_service::AuthError;
use crate::application::content_fetcher::FetchError;
use crate::application::navigation::NavError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Error taxonomy at the HTTP boundary. Nothing here is fatal to the
/// process; every variant maps to a status and a JSON body the client can
/// render.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Navigation(NavError),
    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

impl From<NavError> for ApiError {
    fn from(err: NavError) -> Self {
        match err {
            NavError::UnknownSection(id) => ApiError::NotFound(format!("unknown section '{}'", id)),
            NavError::Fetch(e) => ApiError::Fetch(e),
            other => ApiError::Navigation(other),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Auth(e) => (
                StatusCode::UNAUTHORIZED,
                json!({ "error": e.to_string() }),
            ),
            ApiError::Fetch(e) => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "error": e.to_string(),
                    "section": &e.section_id,
                    "attempted": &e.attempted,
                    "retryable": true,
                }),
            ),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, json!({ "error": msg })),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            ApiError::Navigation(e) => (StatusCode::CONFLICT, json!({ "error": e.to_string() })),
            ApiError::Backend(e) => {
                tracing::error!("backend error: {:#}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "internal server error" }),
                )
            }
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nav_errors_map_to_statuses() {
        let unknown: ApiError = NavError::UnknownSection("gis".to_string()).into();
        assert!(matches!(unknown, ApiError::NotFound(_)));

        let disabled: ApiError = NavError::SectionDisabled("audit-dashboard".to_string()).into();
        assert!(matches!(disabled, ApiError::Navigation(_)));

        let fetch: ApiError = NavError::Fetch(FetchError {
            section_id: "profile".to_string(),
            attempted: vec!["components/profile.html".to_string()],
        })
        .into();
        assert!(matches!(fetch, ApiError::Fetch(_)));
    }
}
