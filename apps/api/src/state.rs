use std::sync::Arc;

use crate::compiler::DocumentCompiler;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
/// Read-only: requests share nothing mutable.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Pluggable compiler. Default: `LatexCompiler` running `LATEX_BIN`.
    pub compiler: Arc<dyn DocumentCompiler>,
}
