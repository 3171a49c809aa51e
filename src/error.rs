//! Application error type with HTTP response conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};

use crate::view;

/// Application-level errors
///
/// Authorization failures either redirect to the login page or render an
/// error page; everything unexpected collapses into `Internal`.
#[derive(Debug)]
pub enum AppError {
    /// No usable session; the browser is sent to the login page
    NotLoggedIn,
    /// Logged in, but not the owner of the requested link
    Forbidden(String),
    /// Short code does not exist
    NotFound(String),
    /// Session store or hashing library failure
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotLoggedIn => Redirect::to("/login").into_response(),
            AppError::Forbidden(message) => {
                (StatusCode::FORBIDDEN, view::forbidden_page(&message)).into_response()
            }
            AppError::NotFound(code) => {
                (StatusCode::NOT_FOUND, view::not_found_page(&code)).into_response()
            }
            AppError::Internal(message) => {
                tracing::error!("internal error: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, "Something went wrong").into_response()
            }
        }
    }
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        AppError::Internal(format!("session error: {err}"))
    }
}

impl From<bcrypt::BcryptError> for AppError {
    fn from(err: bcrypt::BcryptError) -> Self {
        AppError::Internal(format!("password hashing error: {err}"))
    }
}
