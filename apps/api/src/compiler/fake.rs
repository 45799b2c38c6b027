//! In-memory `DocumentCompiler` for handler tests.

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;

use super::{CompileError, CompiledArtifact, DocumentCompiler, ARTIFACT_FILE};

#[derive(Debug, Clone, Copy)]
pub enum Outcome {
    Pdf,
    Fail,
    Timeout,
}

/// Records every source it is asked to compile and answers with `outcome`.
#[derive(Debug)]
pub struct FakeCompiler {
    outcome: Outcome,
    sources: Mutex<Vec<String>>,
}

pub const FAKE_PDF: &[u8] = b"%PDF-1.4 fake";

impl FakeCompiler {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            sources: Mutex::new(Vec::new()),
        }
    }

    pub fn sources(&self) -> Vec<String> {
        self.sources.lock().unwrap().clone()
    }
}

#[async_trait]
impl DocumentCompiler for FakeCompiler {
    async fn compile(&self, source: &str) -> Result<CompiledArtifact, CompileError> {
        self.sources.lock().unwrap().push(source.to_string());
        match self.outcome {
            Outcome::Pdf => Ok(CompiledArtifact {
                file_name: ARTIFACT_FILE,
                bytes: Bytes::from_static(FAKE_PDF),
            }),
            Outcome::Fail => Err(CompileError::Failed {
                exit_code: Some(1),
                diagnostics: "! Undefined control sequence.".to_string(),
            }),
            Outcome::Timeout => Err(CompileError::Timeout {
                limit: Duration::from_secs(60),
            }),
        }
    }
}
