// CV generation: request payload → composed LaTeX → compiled PDF.
// The document engine lives in `document`; the subprocess in `compiler`.

pub mod generator;
pub mod handlers;
