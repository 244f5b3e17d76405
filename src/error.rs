//! Error taxonomy shared by the HTTP handlers.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::store::StoreError;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{}", INVALID_CREDENTIALS)]
    Unauthorized,

    #[error("Invalid or expired token")]
    InvalidToken,

    /// Carries a client-safe message only; the cause is logged where it happens.
    #[error("{0}")]
    Internal(&'static str),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Unauthorized | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Conflict => AppError::Conflict("Email is already registered".into()),
            StoreError::Rejected(msg) => AppError::BadRequest(msg),
            StoreError::Resume(e) => {
                error!(error = %e, "create resume failed");
                AppError::Internal("Failed to create resume")
            }
            StoreError::Link(e) => {
                error!(error = %e, "link user to resume failed");
                AppError::Internal("Failed to update user with resume ID")
            }
            StoreError::Db(e) => {
                error!(error = %e, "database error");
                AppError::Internal("Database error")
            }
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
