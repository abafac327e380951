use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use std::fmt;

use super::pages;

#[derive(Debug)]
pub enum AppError {
    DuplicateUsername(String),

    AuthenticationFailed,

    NotFound(String),

    ValidationError(String),

    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::DuplicateUsername(username) => {
                write!(f, "Username already taken: {}", username)
            }
            AppError::AuthenticationFailed => write!(f, "Authentication failed"),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, title, message) = match &self {
            AppError::DuplicateUsername(username) => (
                StatusCode::CONFLICT,
                "Registration failed",
                format!("The username \"{username}\" is already taken."),
            ),
            AppError::AuthenticationFailed => (
                StatusCode::UNAUTHORIZED,
                "Login failed",
                "Invalid username or password.".to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "Invalid pass", msg.clone()),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, "Invalid input", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong",
                    "An internal error occurred".to_string(),
                )
            }
        };

        (status, Html(pages::error_page(title, &message))).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::InternalError(err.to_string())
    }
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        AppError::InternalError(msg.into())
    }

    pub fn pass_not_found() -> Self {
        AppError::NotFound("This outing pass is invalid or unknown.".to_string())
    }
}
