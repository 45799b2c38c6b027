//! Header fragment: the name line and the contact line beneath it.

use crate::document::escape::{display_url, escape, hyperlink};
use crate::models::resume::ResumeDocument;

const CONTACT_SEPARATOR: &str = " $|$ ";
const MAX_CUSTOM_HEADERS: usize = 3;

/// Builds the `{{HEADER}}` fragment. Without a name the header is empty.
pub fn build_header(doc: &ResumeDocument) -> String {
    let name = doc.name.trim();
    if name.is_empty() {
        return String::new();
    }

    let mut header = format!("  \\textbf{{\\Huge {}}}", escape(name));

    let parts = contact_parts(doc);
    if !parts.is_empty() {
        header.push_str(" \\\\\n  \\vspace{0.3cm}\n  \\footnotesize\n  ");
        header.push_str(&parts.join(CONTACT_SEPARATOR));
    }
    header
}

fn contact_parts(doc: &ResumeDocument) -> Vec<String> {
    let mut parts = Vec::new();

    let phone = doc.phone.trim();
    if !phone.is_empty() {
        parts.push(escape(phone));
    }

    let email = doc.email.trim();
    if !email.is_empty() {
        parts.push(hyperlink(&format!("mailto:{email}"), &escape(email)));
    }

    let links = [&doc.linkedin, &doc.github, &doc.website]
        .into_iter()
        .chain(
            doc.custom_headers
                .iter()
                .take(MAX_CUSTOM_HEADERS)
                .map(|header| &header.value),
        );
    parts.extend(links.filter_map(|url| link_part(url)));

    parts
}

fn link_part(url: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    Some(hyperlink(url, &escape(display_url(url))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::CustomHeader;

    fn named(name: &str) -> ResumeDocument {
        ResumeDocument {
            name: name.to_string(),
            ..ResumeDocument::default()
        }
    }

    fn custom(value: &str) -> CustomHeader {
        CustomHeader {
            value: value.to_string(),
        }
    }

    #[test]
    fn test_no_name_yields_empty_header() {
        let mut doc = named("   ");
        doc.email = "a@b.com".to_string();
        assert_eq!(build_header(&doc), "");
    }

    #[test]
    fn test_name_only_header_has_no_contact_line() {
        assert_eq!(build_header(&named("Jane Doe")), "  \\textbf{\\Huge Jane Doe}");
    }

    #[test]
    fn test_email_only_header() {
        let mut doc = named("Jane");
        doc.email = "a@b.com".to_string();
        let header = build_header(&doc);
        assert!(header.ends_with("\\footnotesize\n  \\href{mailto:a@b.com}{a@b.com}"));
        assert_eq!(header.matches("\\href").count(), 1);
        assert!(!header.contains("$|$"));
    }

    #[test]
    fn test_full_contact_line_order_and_display() {
        let doc = ResumeDocument {
            name: "J_D".to_string(),
            phone: " +1 555 0100 ".to_string(),
            email: "jd@example.com".to_string(),
            linkedin: "https://linkedin.com/in/jd/".to_string(),
            github: "http://github.com/jd".to_string(),
            website: "jd.dev".to_string(),
            ..ResumeDocument::default()
        };
        let header = build_header(&doc);
        assert!(header.starts_with("  \\textbf{\\Huge J\\_D} \\\\\n  \\vspace{0.3cm}\n"));
        let line = header.lines().last().unwrap().trim();
        assert_eq!(
            line,
            "+1 555 0100 $|$ \\href{mailto:jd@example.com}{jd@example.com} $|$ \
             \\href{https://linkedin.com/in/jd/}{linkedin.com/in/jd} $|$ \
             \\href{http://github.com/jd}{github.com/jd} $|$ \\href{jd.dev}{jd.dev}"
        );
    }

    #[test]
    fn test_blank_links_are_skipped() {
        let mut doc = named("Jane");
        doc.github = "   ".to_string();
        doc.custom_headers = vec![custom(""), custom("  ")];
        assert_eq!(build_header(&doc), "  \\textbf{\\Huge Jane}");
    }

    #[test]
    fn test_at_most_three_custom_headers() {
        let mut doc = named("Jane");
        doc.custom_headers = vec![
            custom("https://one.dev"),
            custom("two.dev"),
            custom("https://three.dev/"),
            custom("four.dev"),
        ];
        let header = build_header(&doc);
        assert!(header.contains("{one.dev}"));
        assert!(header.contains("{three.dev}"));
        assert!(!header.contains("four.dev"));
        assert_eq!(header.matches(CONTACT_SEPARATOR).count(), 2);
    }

    #[test]
    fn test_display_text_is_escaped_target_is_not() {
        let mut doc = named("Jane");
        doc.website = "https://site.dev/~jane_doe".to_string();
        let header = build_header(&doc);
        assert!(header.contains(
            "\\href{https://site.dev/~jane_doe}{site.dev/\\textasciitilde{}jane\\_doe}"
        ));
    }
}
