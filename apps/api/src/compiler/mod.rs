//! Compiler invoker: runs the external LaTeX compiler on a composed document.
//!
//! Each compile gets its own scratch directory (a `TempDir`), removed on every
//! exit path when it drops. The child is killed if the timeout elapses.
//!
//! `AppState` holds an `Arc<dyn DocumentCompiler>` so handlers can be tested
//! without a TeX installation.

use std::io::{self, ErrorKind};
use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::process::Command;
use tracing::{info, warn};

#[cfg(test)]
pub mod fake;

/// Source file name inside the scratch directory.
pub const SOURCE_FILE: &str = "cv.tex";
/// Artifact the compiler derives from [`SOURCE_FILE`].
pub const ARTIFACT_FILE: &str = "cv.pdf";
/// Diagnostics longer than this keep only their tail.
pub const MAX_DIAGNOSTIC_CHARS: usize = 3000;

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("failed to prepare scratch directory: {0}")]
    Scratch(#[source] io::Error),

    #[error("compiler `{program}` is not available: {source}")]
    Unavailable {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("failed to run compiler: {0}")]
    Io(#[source] io::Error),

    #[error("compiler exited with status {exit_code:?}")]
    Failed {
        exit_code: Option<i32>,
        diagnostics: String,
    },

    #[error("compiler finished but produced no cv.pdf")]
    MissingArtifact { diagnostics: String },

    #[error("compilation timed out after {}s", .limit.as_secs())]
    Timeout { limit: Duration },
}

/// A compiled document, read into memory before the scratch directory goes.
#[derive(Debug, Clone)]
pub struct CompiledArtifact {
    pub file_name: &'static str,
    pub bytes: Bytes,
}

#[async_trait]
pub trait DocumentCompiler: Send + Sync {
    /// One attempt, one verdict. No retries.
    async fn compile(&self, source: &str) -> Result<CompiledArtifact, CompileError>;
}

// ────────────────────────────────────────────────────────────────────────────
// pdflatex
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct LatexCompiler {
    program: PathBuf,
    timeout: Duration,
}

impl LatexCompiler {
    pub fn new(program: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

#[async_trait]
impl DocumentCompiler for LatexCompiler {
    async fn compile(&self, source: &str) -> Result<CompiledArtifact, CompileError> {
        let started_at = Instant::now();

        let scratch = tempfile::Builder::new()
            .prefix("cvpress-")
            .tempdir()
            .map_err(CompileError::Scratch)?;
        tokio::fs::write(scratch.path().join(SOURCE_FILE), source)
            .await
            .map_err(CompileError::Scratch)?;

        let mut command = Command::new(&self.program);
        command
            .arg("-interaction=nonstopmode")
            .arg(SOURCE_FILE)
            .current_dir(scratch.path())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(err)) if err.kind() == ErrorKind::NotFound => {
                warn!(program = %self.program.display(), "LaTeX compiler not found");
                return Err(CompileError::Unavailable {
                    program: self.program.display().to_string(),
                    source: err,
                });
            }
            Ok(Err(err)) => return Err(CompileError::Io(err)),
            Err(_) => {
                warn!(
                    elapsed_ms = started_at.elapsed().as_millis() as u64,
                    limit_secs = self.timeout.as_secs(),
                    "LaTeX compilation timed out; child killed"
                );
                return Err(CompileError::Timeout {
                    limit: self.timeout,
                });
            }
        };

        let diagnostics = merge_diagnostics(&output.stdout, &output.stderr);

        if !output.status.success() {
            let exit_code = output.status.code();
            warn!(
                exit_code = exit_code.unwrap_or(-1),
                elapsed_ms = started_at.elapsed().as_millis() as u64,
                "LaTeX compilation failed"
            );
            return Err(CompileError::Failed {
                exit_code,
                diagnostics,
            });
        }

        let bytes = match tokio::fs::read(scratch.path().join(ARTIFACT_FILE)).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                warn!("LaTeX exited cleanly but {ARTIFACT_FILE} is missing");
                return Err(CompileError::MissingArtifact { diagnostics });
            }
            Err(err) => return Err(CompileError::Io(err)),
        };

        info!(
            elapsed_ms = started_at.elapsed().as_millis() as u64,
            pdf_bytes = bytes.len(),
            "LaTeX compilation succeeded"
        );

        Ok(CompiledArtifact {
            file_name: ARTIFACT_FILE,
            bytes: Bytes::from(bytes),
        })
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Diagnostics
// ────────────────────────────────────────────────────────────────────────────

/// pdflatex reports most errors on stdout, so both streams are kept.
pub fn merge_diagnostics(stdout: &[u8], stderr: &[u8]) -> String {
    let merged = format!(
        "{}\n{}",
        String::from_utf8_lossy(stdout),
        String::from_utf8_lossy(stderr)
    );
    truncate_diagnostics(merged.trim())
}

/// Keeps the last [`MAX_DIAGNOSTIC_CHARS`] characters, where LaTeX puts the error.
pub fn truncate_diagnostics(log: &str) -> String {
    let total = log.chars().count();
    if total <= MAX_DIAGNOSTIC_CHARS {
        return log.to_string();
    }
    let tail: String = log.chars().skip(total - MAX_DIAGNOSTIC_CHARS).collect();
    format!("...\n{tail}")
}
