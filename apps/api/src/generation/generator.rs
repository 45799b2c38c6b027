//! CV Generation: orchestrates one request from raw JSON to a PDF.
//!
//! Flow: script check → deserialize → header + sections → template →
//!       compile → artifact.
//!
//! Only the script check and the compile step can end a request with an
//! error of their own; missing or odd fields degrade to empty output.

use std::time::Instant;

use serde_json::Value;
use tracing::{debug, info};

use crate::compiler::{CompiledArtifact, DocumentCompiler};
use crate::config::Config;
use crate::document::script::UNSUPPORTED_SCRIPT_MESSAGE;
use crate::document::{load_template, payload_has_flagged_script, render_source};
use crate::errors::AppError;
use crate::models::resume::ResumeDocument;

/// Validates the payload and turns it into the typed document model.
pub fn parse_payload(payload: Value) -> Result<ResumeDocument, AppError> {
    if payload_has_flagged_script(&payload) {
        return Err(AppError::Validation(UNSUPPORTED_SCRIPT_MESSAGE.to_string()));
    }
    let Value::Object(object) = payload else {
        return Err(AppError::Validation(
            "Request body must be a JSON object".to_string(),
        ));
    };
    ResumeDocument::from_object(object)
        .map_err(|e| AppError::Validation(format!("Malformed CV payload: {e}")))
}

/// Runs the full pipeline for one request.
pub async fn generate_cv(
    config: &Config,
    compiler: &dyn DocumentCompiler,
    payload: Value,
) -> Result<CompiledArtifact, AppError> {
    let started_at = Instant::now();

    let doc = parse_payload(payload)?;

    let template = load_template(&config.template_path).await?;
    let source = render_source(&doc, &template)?;
    debug!(source_bytes = source.len(), "LaTeX source composed");

    let artifact = compiler.compile(&source).await?;

    info!(
        elapsed_ms = started_at.elapsed().as_millis() as u64,
        pdf_bytes = artifact.bytes.len(),
        "CV generated"
    );
    Ok(artifact)
}
