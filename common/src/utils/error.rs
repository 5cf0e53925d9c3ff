use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Input validation failed: {field}")]
    Validation { field: String, message: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Resource not found: {resource}")]
    NotFound { resource: String, id: String },

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not enough data: {0}")]
    NotEnoughData(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    const DB_ERROR: &'static str = "DB_ERROR";
    const VALIDATION_ERROR: &'static str = "VALIDATION_ERROR";
    const CONFIG_ERROR: &'static str = "CONFIG_ERROR";
    const NOT_FOUND: &'static str = "NOT_FOUND";
    const UNAUTHORIZED: &'static str = "UNAUTHORIZED";
    const CONFLICT: &'static str = "CONFLICT";
    const NOT_ENOUGH_DATA: &'static str = "NOT_ENOUGH_DATA";
    const INTERNAL_ERROR: &'static str = "INTERNAL_ERROR";

    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_owned(),
            message: message.into(),
        }
    }

    pub fn not_found(resource: &str, id: impl ToString) -> Self {
        Self::NotFound {
            resource: resource.to_owned(),
            id: id.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Database(_) | Self::Config(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::NotEnoughData(_) => StatusCode::UNPROCESSABLE_ENTITY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, code) = match &self {
            Self::Database(e) => {
                tracing::error!("Database error: {e}");
                ("Internal server error".to_owned(), Self::DB_ERROR)
            }
            Self::Validation { message, .. } => (message.clone(), Self::VALIDATION_ERROR),
            Self::Config(msg) => {
                tracing::error!("Configuration error: {msg}");
                ("Configuration error".to_owned(), Self::CONFIG_ERROR)
            }
            Self::NotFound { resource, id } => {
                (format!("{resource} with id {id} not found"), Self::NOT_FOUND)
            }
            Self::Unauthorized(msg) => (msg.clone(), Self::UNAUTHORIZED),
            Self::Conflict(msg) => (msg.clone(), Self::CONFLICT),
            Self::NotEnoughData(msg) => (msg.clone(), Self::NOT_ENOUGH_DATA),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                ("Internal server error".to_owned(), Self::INTERNAL_ERROR)
            }
        };

        let body = json!({
            "error": message,
            "error_code": code,
            "status": status.as_u16()
        });

        (status, Json(body)).into_response()
    }
}

impl From<tokio_postgres::Error> for ApiError {
    fn from(err: tokio_postgres::Error) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<deadpool_postgres::PoolError> for ApiError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<chrono::ParseError> for ApiError {
    fn from(err: chrono::ParseError) -> Self {
        Self::Validation {
            field: "date".to_string(),
            message: format!("Invalid date format: {err}"),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::validation("body", rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation("path", rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation("query", rejection.body_text())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(format!("IO error: {err}"))
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
