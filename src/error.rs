use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Every failure a handler can surface. The client sees the status and a fixed message;
/// underlying causes are logged where the error is created.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Missing required fields")]
    MissingFields,

    #[error("Invalid input data")]
    InvalidInput(Option<String>),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(&'static str),

    #[error("Insufficient permissions")]
    Forbidden,

    #[error("Resource not found")]
    NotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Database error")]
    DatabaseError,

    #[error("Token generation failed")]
    TokenGeneration,

    #[error("Internal server error")]
    InternalServer,
}

impl AppError {
    pub fn invalid_input(details: impl Into<String>) -> Self {
        AppError::InvalidInput(Some(details.into()))
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingFields | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidCredentials | AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::UserAlreadyExists => StatusCode::CONFLICT,
            AppError::DatabaseError | AppError::TokenGeneration | AppError::InternalServer => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// JSON body for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl From<&AppError> for ErrorBody {
    fn from(err: &AppError) -> Self {
        let details = match err {
            AppError::InvalidInput(details) => details.clone(),
            _ => None,
        };
        Self {
            code: err.status().as_u16(),
            message: err.to_string(),
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(ErrorBody::from(&self))).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::invalid_input(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::invalid_input(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::invalid_input(rejection.body_text())
    }
}

pub type AppResult<T> = Result<T, AppError>;
