//! Error taxonomy for the workspace core, the problem catalog and the
//! external assist services (hints, code runner).
//!
//! Workspace errors are always absorbed by the session contract methods;
//! they exist so the inner `try_*` paths can say *why* they no-op'd.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::protocol::ErrorOut;

#[derive(Debug, Error, PartialEq)]
pub enum WorkspaceError {
    #[error("language '{language}' is not available for the current problem")]
    InvalidLanguageSelection { language: String },

    #[error("no problem is selected")]
    NoActiveProblem,

    #[error("container width {width} is not measurable")]
    DegenerateGeometry { width: f64 },
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("problem data is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("problem not found: {slug}")]
    NotFound { slug: String },
}

#[derive(Debug, Error)]
pub enum AssistError {
    #[error("{0} is not configured")]
    Disabled(&'static str),

    #[error("language unsupported: {0}")]
    UnsupportedLanguage(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream HTTP {status}: {message}")]
    Upstream { status: u16, message: String },

    #[error("unexpected upstream payload: {0}")]
    Decode(String),
}

/// Errors surfaced by the HTTP handlers.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Assist(#[from] AssistError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Catalog(CatalogError::NotFound { .. }) => StatusCode::NOT_FOUND,
            ApiError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Assist(AssistError::UnsupportedLanguage(_)) => StatusCode::BAD_REQUEST,
            ApiError::Assist(AssistError::Disabled(_)) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Assist(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        (status, Json(ErrorOut { error: self.to_string() })).into_response()
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;
