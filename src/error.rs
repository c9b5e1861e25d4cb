//! Error types for the Local Library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::FormRejection;
use thiserror::Error;

/// Main application error type.
///
/// Form validation failures are not errors: the create handlers re-render
/// the form with its messages and a 200 status.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    /// A request body the form decoder could not read; keeps the decoder's status.
    #[error("Bad request: {message}")]
    BadRequest { status: StatusCode, message: String },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest { status, .. } => *status,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// What the error page shows.
///
/// Attached to error responses as an extension so the router can re-render
/// the page with `detail` when running outside production.
#[derive(Debug, Clone)]
pub struct ErrorPage {
    pub status: StatusCode,
    pub message: String,
    pub detail: String,
}

impl From<&AppError> for ErrorPage {
    fn from(error: &AppError) -> Self {
        let message = match error {
            AppError::NotFound(msg) | AppError::Conflict(msg) => msg.clone(),
            AppError::BadRequest { message, .. } => message.clone(),
            AppError::Database(_) => "Database error".to_string(),
            AppError::Internal(_) => "Internal server error".to_string(),
        };
        Self {
            status: error.status(),
            message,
            detail: format!("{:?}", error),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::NotFound(msg) => tracing::debug!("Not found: {}", msg),
            AppError::BadRequest { message, .. } => tracing::debug!("Bad request: {}", message),
            AppError::Conflict(msg) => tracing::warn!("Conflict: {}", msg),
        }

        let page = ErrorPage::from(&self);
        let mut response = (page.status, crate::views::error_page(&page, false)).into_response();
        response.extensions_mut().insert(page);
        response
    }
}

impl From<FormRejection> for AppError {
    fn from(rejection: FormRejection) -> Self {
        let message = rejection.to_string();
        let status = rejection.into_response().status();
        AppError::BadRequest { status, message }
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
