//! Pre-flight check for scripts pdflatex cannot typeset.

use std::ops::RangeInclusive;

use serde_json::Value;

/// Arabic, Arabic Supplement and Arabic Extended-A.
const FLAGGED_RANGES: [RangeInclusive<u32>; 3] = [0x0600..=0x06FF, 0x0750..=0x077F, 0x08A0..=0x08FF];

pub const UNSUPPORTED_SCRIPT_MESSAGE: &str =
    "English only: Arabic and other non-Latin characters are not supported for PDF generation.";

pub fn contains_flagged_script(text: &str) -> bool {
    text.chars()
        .any(|ch| FLAGGED_RANGES.iter().any(|range| range.contains(&u32::from(ch))))
}

/// Walks the whole payload. Object keys are checked as well as values since
/// skill category names are rendered.
pub fn payload_has_flagged_script(value: &Value) -> bool {
    match value {
        Value::String(s) => contains_flagged_script(s),
        Value::Array(items) => items.iter().any(payload_has_flagged_script),
        Value::Object(map) => map
            .iter()
            .any(|(key, value)| contains_flagged_script(key) || payload_has_flagged_script(value)),
        Value::Null | Value::Bool(_) | Value::Number(_) => false,
    }
}
