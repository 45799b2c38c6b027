//! Template compositor.
//!
//! The template is an opaque LaTeX document holding `{{HEADER}}` and
//! `{{SECTIONS}}` exactly once each. Substitution splices the fragments into
//! the original text, so generated content is never rescanned for tokens.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

pub const HEADER_PLACEHOLDER: &str = "{{HEADER}}";
pub const SECTIONS_PLACEHOLDER: &str = "{{SECTIONS}}";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("template {} could not be read: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("template is missing the {0} placeholder")]
    MissingPlaceholder(&'static str),

    #[error("template contains the {0} placeholder more than once")]
    DuplicatePlaceholder(&'static str),
}

/// Reads the template asset. Called per request so edits take effect live.
pub async fn load_template(path: &Path) -> Result<String, TemplateError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| TemplateError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
}

fn locate(template: &str, placeholder: &'static str) -> Result<usize, TemplateError> {
    let mut hits = template.match_indices(placeholder).map(|(idx, _)| idx);
    let first = hits
        .next()
        .ok_or(TemplateError::MissingPlaceholder(placeholder))?;
    if hits.next().is_some() {
        return Err(TemplateError::DuplicatePlaceholder(placeholder));
    }
    Ok(first)
}

/// Substitutes the header fragment and section body verbatim.
pub fn compose(template: &str, header: &str, sections: &str) -> Result<String, TemplateError> {
    let header_at = locate(template, HEADER_PLACEHOLDER)?;
    let sections_at = locate(template, SECTIONS_PLACEHOLDER)?;

    let mut slots = [
        (header_at, HEADER_PLACEHOLDER.len(), header),
        (sections_at, SECTIONS_PLACEHOLDER.len(), sections),
    ];
    slots.sort_by_key(|(at, _, _)| *at);

    let mut out = String::with_capacity(template.len() + header.len() + sections.len());
    let mut cursor = 0;
    for (at, len, fragment) in slots {
        out.push_str(&template[cursor..at]);
        out.push_str(fragment);
        cursor = at + len;
    }
    out.push_str(&template[cursor..]);
    Ok(out)
}
