use crate::store::StoreError;
use crate::user::AuthError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

pub type ApiResult<T> = Result<T, ApiError>;

/// Body message of every 500, panics included.
pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong!";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    /// A unique field is already taken.
    #[error("{0}")]
    Conflict(String),

    #[error("Not authenticated")]
    Unauthenticated,

    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("Not authorized")]
    Forbidden,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthenticated | ApiError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden => StatusCode::FORBIDDEN,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn missing_field(field: &str) -> Self {
        ApiError::BadRequest(format!("Missing required field: {}", field))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = match &self {
            ApiError::Internal(err) => {
                error!("Internal error while handling request: {:#}", err);
                INTERNAL_ERROR_MESSAGE.to_owned()
            }
            other => other.to_string(),
        };
        (status, Json(ErrorBody { error: message })).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UsernameTaken | StoreError::EmailTaken => {
                ApiError::Conflict(err.to_string())
            }
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::Forbidden => ApiError::Forbidden,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Store(store_err) => store_err.into(),
            AuthError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthError::Hashing(err) => ApiError::Internal(err),
            err @ AuthError::SessionTtlOutOfRange(_) => ApiError::Internal(err.into()),
        }
    }
}
