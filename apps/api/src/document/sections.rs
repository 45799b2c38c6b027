//! Section assembly: ordering, title overrides and custom section placement.
//!
//! Assembly is a fold over the resolved `order`:
//! 1. built-in sections render in the position the user gave them, first
//!    occurrence only; `Custom:<title>` markers pull the matching custom
//!    section out of the pool at that position
//! 2. built-in sections with data that `order` never mentioned follow in
//!    canonical order
//! 3. custom sections still in the pool close the document in payload order

use std::collections::HashSet;

use tracing::debug;

use crate::document::fragments::{build_custom_section, SectionKind};
use crate::models::resume::{CustomSection, ResumeDocument};

pub const CUSTOM_MARKER_PREFIX: &str = "Custom:";
const FRAGMENT_SEPARATOR: &str = "\n\n";

/// One resolved `order` entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderItem<'a> {
    Builtin(SectionKind),
    Custom(&'a str),
    Unknown(&'a str),
}

impl<'a> OrderItem<'a> {
    pub fn parse(name: &'a str) -> Self {
        if let Some(title) = name.strip_prefix(CUSTOM_MARKER_PREFIX) {
            return OrderItem::Custom(title.trim());
        }
        match SectionKind::from_order_name(name) {
            Some(kind) => OrderItem::Builtin(kind),
            None => OrderItem::Unknown(name),
        }
    }
}

/// The payload's `order`, or the default nine sections when it is empty.
pub fn resolve_order(doc: &ResumeDocument) -> Vec<OrderItem<'_>> {
    if doc.order.iter().all(|name| name.trim().is_empty()) {
        return SectionKind::DEFAULT_ORDER
            .into_iter()
            .map(OrderItem::Builtin)
            .collect();
    }
    doc.order.iter().map(|name| OrderItem::parse(name)).collect()
}

/// Heading for `kind`, honouring any `sectionNames` override.
pub fn section_title(doc: &ResumeDocument, kind: SectionKind) -> &str {
    kind.ids()
        .iter()
        .find_map(|id| doc.section_names.get(*id))
        .map(String::as_str)
        .filter(|title| !title.trim().is_empty())
        .unwrap_or(kind.title())
}

/// Custom sections keyed by display title. A repeated title keeps its first
/// position and takes the later section's content.
fn custom_pool(sections: &[CustomSection]) -> Vec<&CustomSection> {
    let mut pool: Vec<&CustomSection> = Vec::with_capacity(sections.len());
    for section in sections {
        match pool
            .iter_mut()
            .find(|pooled| pooled.display_title() == section.display_title())
        {
            Some(slot) => *slot = section,
            None => pool.push(section),
        }
    }
    pool
}

#[derive(Debug)]
struct Assembly<'a> {
    fragments: Vec<String>,
    seen: HashSet<SectionKind>,
    pool: Vec<&'a CustomSection>,
}

impl<'a> Assembly<'a> {
    fn push(mut self, fragment: String) -> Self {
        if !fragment.trim().is_empty() {
            self.fragments.push(fragment);
        }
        self
    }

    fn builtin(mut self, doc: &ResumeDocument, kind: SectionKind) -> Self {
        if !self.seen.insert(kind) {
            return self;
        }
        let fragment = kind.render(doc, section_title(doc, kind));
        self.push(fragment)
    }

    fn custom(mut self, title: &str) -> Self {
        match self.pool.iter().position(|s| s.display_title() == title) {
            Some(idx) => {
                let section = self.pool.remove(idx);
                self.push(build_custom_section(section))
            }
            None => self,
        }
    }

    fn step(self, doc: &ResumeDocument, item: OrderItem<'_>) -> Self {
        match item {
            OrderItem::Builtin(kind) => self.builtin(doc, kind),
            OrderItem::Custom(title) => self.custom(title),
            OrderItem::Unknown(name) => {
                debug!(name, "Ignoring unknown section in order");
                self
            }
        }
    }
}

/// Ordered section fragments of the document body.
pub fn assemble_fragments(doc: &ResumeDocument) -> Vec<String> {
    let start = Assembly {
        fragments: Vec::new(),
        seen: HashSet::new(),
        pool: custom_pool(&doc.custom_sections),
    };

    let ordered = resolve_order(doc)
        .into_iter()
        .fold(start, |acc, item| acc.step(doc, item));

    let with_fallback = SectionKind::CANONICAL
        .into_iter()
        .fold(ordered, |acc, kind| acc.builtin(doc, kind));

    let Assembly {
        mut fragments,
        pool,
        ..
    } = with_fallback;
    fragments.extend(
        pool.into_iter()
            .map(build_custom_section)
            .filter(|fragment| !fragment.is_empty()),
    );
    fragments
}

/// The `{{SECTIONS}}` body: fragments separated by a blank line.
pub fn assemble_body(doc: &ResumeDocument) -> String {
    assemble_fragments(doc).join(FRAGMENT_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::Entry;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> ResumeDocument {
        serde_json::from_value(value).unwrap()
    }

    fn headings(doc: &ResumeDocument) -> Vec<String> {
        assemble_fragments(doc)
            .iter()
            .filter_map(|fragment| {
                fragment
                    .lines()
                    .find(|line| line.starts_with("\\section"))
                    .map(str::to_string)
            })
            .collect()
    }

    #[test]
    fn test_empty_payload_has_empty_body() {
        assert_eq!(assemble_body(&ResumeDocument::default()), "");
    }

    #[test]
    fn test_ordered_section_without_data_is_skipped() {
        let d = doc(json!({
            "order": ["Education", "Skills"],
            "skills": { "Languages": ["Rust"] }
        }));
        assert_eq!(headings(&d), vec!["\\section{Skills}"]);
        assert!(!assemble_body(&d).contains("Education"));
    }

    #[test]
    fn test_explicit_order_is_respected() {
        let d = doc(json!({
            "order": ["Projects", "Education"],
            "education": [{ "university": "MIT" }],
            "projects": [{ "name": "cvpress" }]
        }));
        assert_eq!(
            headings(&d),
            vec!["\\section{Projects}", "\\section{Education}"]
        );
    }

    #[test]
    fn test_default_order_applies_when_order_missing() {
        let d = doc(json!({
            "certifications": [{ "name": "CKA" }],
            "education": [{ "university": "MIT" }],
            "publications": [{ "title": "Paper" }]
        }));
        assert_eq!(
            headings(&d),
            vec![
                "\\section{Education}",
                "\\section{Publications}",
                "\\section{Certifications}"
            ]
        );
    }

    #[test]
    fn test_unordered_sections_with_data_are_appended_canonically() {
        let d = doc(json!({
            "order": ["Skills"],
            "skills": { "Tools": ["Git"] },
            "summary": "Builder of things",
            "experience": [{ "title": "Engineer" }],
            "volunteering": [{ "title": "Mentor" }]
        }));
        assert_eq!(
            headings(&d),
            vec![
                "\\section{Skills}",
                "\\section*{Summary}",
                "\\section{Experience}",
                "\\section{Volunteering}"
            ]
        );
    }

    #[test]
    fn test_duplicate_order_entry_renders_once() {
        let d = doc(json!({
            "order": ["Education", "Skills", "Education"],
            "education": [{ "university": "MIT" }],
            "skills": { "Tools": ["Git"] }
        }));
        assert_eq!(
            headings(&d),
            vec!["\\section{Education}", "\\section{Skills}"]
        );
    }

    #[test]
    fn test_unknown_order_entries_are_ignored() {
        let d = doc(json!({
            "order": ["Hobbies", "Education", "Custom:Nope"],
            "education": [{ "university": "MIT" }]
        }));
        assert_eq!(headings(&d), vec!["\\section{Education}"]);
    }

    #[test]
    fn test_section_name_override() {
        let d = doc(json!({
            "order": ["Education", "Honors & Awards", "Research Experience"],
            "education": [{ "university": "MIT" }],
            "honorsAwards": [{ "title": "Prize" }],
            "researchExperience": [{ "title": "RA" }],
            "sectionNames": {
                "education": "Academic Background",
                "honors&awards": "Awards_2024",
                "researchexperience": "   "
            }
        }));
        assert_eq!(
            headings(&d),
            vec![
                "\\section{Academic Background}",
                "\\section{Awards\\_2024}",
                "\\section{Research Experience}"
            ]
        );
    }

    #[test]
    fn test_override_applies_to_starred_summary_heading() {
        let d = doc(json!({
            "order": ["Summary"],
            "summary": "Hello",
            "section_names": { "summary": "Profile" }
        }));
        assert_eq!(headings(&d), vec!["\\section*{Profile}"]);
    }

    #[test]
    fn test_custom_marker_places_section_in_position() {
        let d = doc(json!({
            "order": ["Education", "Custom:Awards", "Skills"],
            "education": [{ "university": "MIT" }],
            "skills": { "Tools": ["Git"] },
            "customSections": [{
                "title": "Awards",
                "blocks": [{ "title": "Best Paper", "dates": "2023" }]
            }]
        }));
        assert_eq!(
            headings(&d),
            vec![
                "\\section{Education}",
                "\\section{Awards}",
                "\\section{Skills}"
            ]
        );
    }

    #[test]
    fn test_unplaced_custom_sections_close_the_body_in_payload_order() {
        let d = doc(json!({
            "order": ["Custom: Talks ", "Education"],
            "education": [{ "university": "MIT" }],
            "customSections": [
                { "title": "Patents", "blocks": [{ "title": "P1" }] },
                { "title": "Talks", "blocks": [{ "title": "RustConf" }] },
                { "blocks": [{ "title": "Misc" }] }
            ]
        }));
        assert_eq!(
            headings(&d),
            vec![
                "\\section{Talks}",
                "\\section{Education}",
                "\\section{Patents}",
                "\\section{Custom}"
            ]
        );
    }

    #[test]
    fn test_custom_marker_consumed_once() {
        let d = doc(json!({
            "order": ["Custom:Talks", "Custom:Talks"],
            "customSections": [{ "title": "Talks", "blocks": [{ "title": "RustConf" }] }]
        }));
        assert_eq!(headings(&d), vec!["\\section{Talks}"]);
    }

    #[test]
    fn test_repeated_custom_title_keeps_latest_content() {
        let d = doc(json!({
            "customSections": [
                { "title": "Talks", "blocks": [{ "title": "Old" }] },
                { "title": "Patents", "blocks": [{ "title": "P1" }] },
                { "title": "Talks", "blocks": [{ "title": "New" }] }
            ]
        }));
        let fragments = assemble_fragments(&d);
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].contains("{New}"));
        assert!(!fragments[0].contains("{Old}"));
        assert!(fragments[1].contains("\\section{Patents}"));
    }

    #[test]
    fn test_fragments_separated_by_blank_line() {
        let d = ResumeDocument {
            order: vec!["Education".to_string(), "Experience".to_string()],
            education: vec![Entry {
                university: "MIT".to_string(),
                ..Entry::default()
            }],
            experience: vec![Entry {
                title: "Engineer".to_string(),
                ..Entry::default()
            }],
            ..ResumeDocument::default()
        };
        let body = assemble_body(&d);
        assert!(body.contains("\\resumeSubHeadingListEnd\n\n\\vspace{-2ex}\n\\section{Experience}"));
        assert!(!body.ends_with('\n'));
    }

    #[test]
    fn test_order_item_parse() {
        assert_eq!(
            OrderItem::parse("Custom:  Open Source "),
            OrderItem::Custom("Open Source")
        );
        assert_eq!(
            OrderItem::parse("Skills"),
            OrderItem::Builtin(SectionKind::Skills)
        );
        assert_eq!(OrderItem::parse("Hobbies"), OrderItem::Unknown("Hobbies"));
    }
}
