// Document assembly engine: résumé payload → complete LaTeX source.
// Everything here is pure apart from reading the template asset.

pub mod escape;
pub mod fragments;
pub mod header;
pub mod script;
pub mod sections;
pub mod template;

use crate::models::resume::ResumeDocument;

pub use script::payload_has_flagged_script;
pub use template::{load_template, TemplateError};

/// Builds the header and body for `doc` and splices them into `template`.
pub fn render_source(doc: &ResumeDocument, template: &str) -> Result<String, TemplateError> {
    let header = header::build_header(doc);
    let body = sections::assemble_body(doc);
    template::compose(template, &header, &body)
}
