//! Error → HTTP status mapping.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;
use tracing::error;

use super::protocol::ErrorBody;
use crate::auth::AuthError;
use crate::game::GameError;

/// Any error a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Identity or token failure.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Component failure.
    #[error(transparent)]
    Game(#[from] GameError),

    /// Body or query string could not be parsed.
    #[error("{0}")]
    BadRequest(String),
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl ApiError {
    /// Status code and client-facing message.
    pub fn status_and_detail(&self) -> (StatusCode, String) {
        match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),

            ApiError::Auth(err) => match err {
                AuthError::UsernameTaken => {
                    (StatusCode::BAD_REQUEST, "Username already exists".into())
                }
                AuthError::EmailTaken => (StatusCode::BAD_REQUEST, "Email already exists".into()),
                AuthError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                AuthError::InvalidCredentials => {
                    (StatusCode::UNAUTHORIZED, "Invalid credentials".into())
                }
                AuthError::MissingToken => (StatusCode::UNAUTHORIZED, "Missing token".into()),
                AuthError::Expired => (StatusCode::UNAUTHORIZED, "Token expired".into()),
                AuthError::UserNotFound => (StatusCode::UNAUTHORIZED, "User not found".into()),
                e if e.is_unauthorized() => (StatusCode::UNAUTHORIZED, "Invalid token".into()),
                _ => internal(),
            },

            ApiError::Game(err) => match err {
                GameError::NotFound(what) => (StatusCode::NOT_FOUND, format!("{what} not found")),
                GameError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
                GameError::DuplicateOutcome => {
                    (StatusCode::CONFLICT, "Outcome already recorded for this proposal".into())
                }
                GameError::Store(_) => internal(),
            },
        }
    }
}

fn internal() -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".into())
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = self.status_and_detail();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        (status, Json(ErrorBody { detail })).into_response()
    }
}
