//! Handler error type and its HTTP mapping.

use std::backtrace::Backtrace;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use snippetbox_store::StoreError;
use thiserror::Error;
use tracing::error;

use crate::templates::RenderError;

/// Everything a handler can fail with.
///
/// Server-side failures are logged in full and reach the client only as a
/// bare `Internal Server Error`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound,

    #[error("client error: {0}")]
    ClientError(StatusCode),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::ClientError(status) => *status,
            AppError::Store(_) | AppError::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Plain-text response carrying the status's canonical reason phrase.
pub(crate) fn status_text(status: StatusCode) -> Response {
    let reason = status.canonical_reason().unwrap_or("Unknown Error");
    (status, format!("{reason}\n")).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            let trace = Backtrace::capture();
            error!(error = %self, backtrace = %trace, "server error");
        }
        status_text(status)
    }
}
