//! Service error type.
//!
//! Every fallible operation returns [`AppResult`]. Handlers return
//! `Result<_, AppError>` and the error renders itself as an
//! [`ApiResponse`](crate::response::ApiResponse) error envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Result alias used across the services.
pub type AppResult<T> = Result<T, AppError>;

/// Errors surfaced by the services.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("database connection failed: {0}")]
    DatabaseConnection(String),

    #[error("database query failed: {0}")]
    DatabaseQuery(String),

    #[error("invalid connection configuration: {0}")]
    InvalidConnection(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Machine-readable code sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::DatabaseConnection(_) => "DATABASE_CONNECTION_ERROR",
            AppError::DatabaseQuery(_) => "DATABASE_QUERY_ERROR",
            AppError::InvalidConnection(_) => "INVALID_CONNECTION",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::DatabaseConnection(_) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseQuery(_)
            | AppError::InvalidConnection(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                AppError::DatabaseConnection(e.to_string())
            }
            sqlx::Error::Configuration(_) => AppError::InvalidConnection(e.to_string()),
            sqlx::Error::RowNotFound => AppError::NotFound(e.to_string()),
            _ => AppError::DatabaseQuery(e.to_string()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = self.code(), error = %self, "请求处理失败");
        }
        let body = ApiResponse::err(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}
