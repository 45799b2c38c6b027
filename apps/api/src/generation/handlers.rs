//! Axum route handlers for the CV API.

use anyhow::Context;
use axum::{
    body::Bytes,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::Value;
use tracing::Instrument;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::generator::generate_cv;
use crate::state::AppState;

/// POST /generate-cv
///
/// Body is the résumé JSON. The Content-Type header is not required.
/// Responds with the compiled PDF as an attachment.
pub async fn handle_generate_cv(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Response, AppError> {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("generate_cv", %request_id);

    async move {
        let payload: Value = serde_json::from_slice(&body)
            .map_err(|e| AppError::Validation(format!("Request body is not valid JSON: {e}")))?;

        let artifact = generate_cv(&state.config, state.compiler.as_ref(), payload).await?;

        let disposition = format!("attachment; filename=\"{}\"", artifact.file_name);
        Ok::<_, AppError>((
            [
                (header::CONTENT_TYPE, "application/pdf".to_string()),
                (header::CONTENT_DISPOSITION, disposition),
            ],
            artifact.bytes,
        )
            .into_response())
    }
    .instrument(span)
    .await
}

/// GET /api/example-cv
///
/// Returns the bundled sample résumé so the form can be pre-filled.
pub async fn handle_example_cv(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let path = &state.config.example_cv_path;
    let raw = match tokio::fs::read_to_string(path).await {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AppError::NotFound(format!(
                "Example CV not found at {}",
                path.display()
            )));
        }
        Err(e) => {
            return Err(AppError::Configuration(format!(
                "Example CV at {} could not be read: {e}",
                path.display()
            )));
        }
    };

    let example = serde_json::from_str(&raw)
        .with_context(|| format!("Invalid JSON in example CV at {}", path.display()))?;
    Ok(Json(example))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    use axum::http::StatusCode;

    use crate::compiler::fake::{FakeCompiler, Outcome, FAKE_PDF};
    use crate::generation::generator::tests::test_config;

    fn state(outcome: Outcome) -> AppState {
        AppState {
            config: test_config(),
            compiler: Arc::new(FakeCompiler::new(outcome)),
        }
    }

    #[tokio::test]
    async fn test_generate_returns_pdf_attachment() {
        let body = Bytes::from_static(br#"{"name": "Jane", "skills": {"Tools": ["Git"]}}"#);
        let response = handle_generate_cv(State(state(Outcome::Pdf)), body)
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"cv.pdf\""
        );
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], FAKE_PDF);
    }

    #[tokio::test]
    async fn test_generate_rejects_invalid_json() {
        let err = handle_generate_cv(State(state(Outcome::Pdf)), Bytes::from_static(b"{not json"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_example_cv_is_served() {
        let Json(example) = handle_example_cv(State(state(Outcome::Pdf))).await.unwrap();
        assert_eq!(example["name"], "Jordan Rivera");
    }

    #[tokio::test]
    async fn test_example_cv_missing_is_not_found() {
        let mut state = state(Outcome::Pdf);
        state.config.example_cv_path = PathBuf::from("/nonexistent/example_cv.json");
        let err = handle_example_cv(State(state)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_example_cv_invalid_json_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("example_cv.json");
        std::fs::write(&path, "{ broken").unwrap();

        let mut state = state(Outcome::Pdf);
        state.config.example_cv_path = path;
        let err = handle_example_cv(State(state)).await.unwrap_err();
        match err {
            AppError::Internal(e) => {
                assert!(e.to_string().starts_with("Invalid JSON in example CV"));
                assert!(e.root_cause().is::<serde_json::Error>());
            }
            other => panic!("expected Internal, got {other:?}"),
        }
    }
}
