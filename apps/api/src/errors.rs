use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::compiler::CompileError;
use crate::document::TemplateError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Compiler failure: {message}")]
    CompilerFailure { message: String, diagnostics: String },

    #[error("Compiler timeout: {diagnostics}")]
    Timeout { diagnostics: String },

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Stable machine-readable classification sent to clients.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::CompilerFailure { .. } => "COMPILER_FAILURE",
            AppError::Timeout { .. } => "COMPILER_TIMEOUT",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<TemplateError> for AppError {
    fn from(err: TemplateError) -> Self {
        AppError::Configuration(err.to_string())
    }
}

impl From<CompileError> for AppError {
    fn from(err: CompileError) -> Self {
        match err {
            CompileError::Failed { diagnostics, .. } => AppError::CompilerFailure {
                message: "LaTeX compilation failed".to_string(),
                diagnostics,
            },
            CompileError::MissingArtifact { diagnostics } => AppError::CompilerFailure {
                message: "PDF not generated".to_string(),
                diagnostics,
            },
            CompileError::Timeout { limit } => AppError::Timeout {
                diagnostics: format!("Compilation timed out after {}s", limit.as_secs()),
            },
            err @ CompileError::Unavailable { .. } => AppError::Configuration(err.to_string()),
            err @ (CompileError::Scratch(_) | CompileError::Io(_)) => {
                AppError::Internal(anyhow::Error::new(err))
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let code = self.code();
        let (status, message, diagnostics) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Configuration(msg) => {
                tracing::error!("Configuration error: {msg}");
                (StatusCode::INTERNAL_SERVER_ERROR, msg, None)
            }
            AppError::CompilerFailure {
                message,
                diagnostics,
            } => {
                tracing::warn!("Compiler failure: {message}");
                (StatusCode::INTERNAL_SERVER_ERROR, message, Some(diagnostics))
            }
            AppError::Timeout { diagnostics } => {
                tracing::warn!("Compiler timeout: {diagnostics}");
                (
                    StatusCode::GATEWAY_TIMEOUT,
                    "LaTeX timeout".to_string(),
                    Some(diagnostics),
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message,
        });
        if let Some(diagnostics) = diagnostics {
            error["diagnostics"] = json!(diagnostics);
        }

        let body = Json(json!({
            "status": "error",
            "error": error,
        }));

        (status, body).into_response()
    }
}
