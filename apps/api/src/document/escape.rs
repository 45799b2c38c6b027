//! LaTeX escaping and hyperlink helpers.
//!
//! Everything a user typed goes through [`escape`] exactly once. Link targets
//! are the one exception: `\href` takes them verbatim.

/// Target used in place of a blank link so `\href{}{...}` is never emitted.
pub const PLACEHOLDER_TARGET: &str = "#";

fn escape_char(ch: char) -> Option<&'static str> {
    let escaped = match ch {
        '\\' => r"\textbackslash{}",
        '&' => r"\&",
        '%' => r"\%",
        '$' => r"\$",
        '#' => r"\#",
        '_' => r"\_",
        '{' => r"\{",
        '}' => r"\}",
        '~' => r"\textasciitilde{}",
        '^' => r"\textasciicircum{}",
        _ => return None,
    };
    Some(escaped)
}

/// Replaces every LaTeX reserved character with its escape sequence.
///
/// Not idempotent on its own output: escaping `\&` again yields
/// `\textbackslash{}\&`. Callers escape raw text once and never re-escape.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match escape_char(ch) {
            Some(escaped) => out.push_str(escaped),
            None => out.push(ch),
        }
    }
    out
}

/// Blank targets collapse to [`PLACEHOLDER_TARGET`].
pub fn safe_target(target: &str) -> &str {
    match target.trim() {
        "" => PLACEHOLDER_TARGET,
        trimmed => trimmed,
    }
}

/// `\href{target}{label}`. `label` must already be markup-safe.
pub fn hyperlink(target: &str, label: &str) -> String {
    format!("\\href{{{}}}{{{label}}}", safe_target(target))
}

/// Display form of a URL: scheme dropped, trailing slashes trimmed.
pub fn display_url(url: &str) -> &str {
    let url = url.trim();
    let without_scheme = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    without_scheme.trim_end_matches('/')
}
