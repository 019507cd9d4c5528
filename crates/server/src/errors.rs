use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use thiserror::Error;
use tracing::error;

use service::account::AccountError;
use service::errors::ServiceError;

use crate::views::Views;

/// Handler failures, rendered as small HTML error pages.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    BadRequest(String),
    /// Anonymous caller on an authenticated action; carries the login URL.
    #[error("login required")]
    LoginRequired(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn post_not_found() -> Self { AppError::NotFound("Post not found".into()) }

    fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::LoginRequired(_) => StatusCode::SEE_OTHER,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            AppError::LoginRequired(to) => Redirect::to(&to).into_response(),
            AppError::Internal(msg) => {
                error!(error = %msg, "request failed");
                (status, Views::shared().error_page(status, "Something went wrong.")).into_response()
            }
            AppError::NotFound(msg) | AppError::Forbidden(msg) | AppError::BadRequest(msg) => {
                (status, Views::shared().error_page(status, &msg)).into_response()
            }
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(e: ServiceError) -> Self {
        if e.is_validation() {
            return AppError::BadRequest(e.to_string());
        }
        match e {
            ServiceError::NotFound(msg) => AppError::NotFound(msg),
            other => AppError::Internal(other.to_string()),
        }
    }
}

impl From<minijinja::Error> for AppError {
    fn from(e: minijinja::Error) -> Self {
        AppError::Internal(format!("template: {e}"))
    }
}

impl From<AccountError> for AppError {
    fn from(e: AccountError) -> Self {
        match e {
            AccountError::MissingField(_) | AccountError::Invalid(_) | AccountError::Duplicate(_) => {
                AppError::BadRequest(e.to_string())
            }
            other => AppError::Internal(other.to_string()),
        }
    }
}
