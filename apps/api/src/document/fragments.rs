//! Fragment builders: one LaTeX fragment per résumé section.
//!
//! All list-shaped sections share a single builder driven by an [`EntryShape`]
//! that says which entry fields land in the four subheading slots. Builders
//! are pure: an empty section yields an empty string and the caller omits it.

use crate::document::escape::{escape, hyperlink};
use crate::models::resume::{CustomSection, Entry, EntryField, ResumeDocument, Skills};

const LIST_START: &str = r"\resumeSubHeadingList";
const LIST_END: &str = r"\resumeSubHeadingListEnd";
const ITEM_LIST_START: &str = r"    \resumeItemListStart";
const ITEM_LIST_END: &str = r"    \resumeItemListEnd";

// ────────────────────────────────────────────────────────────────────────────
// Section kinds
// ────────────────────────────────────────────────────────────────────────────

/// Built-in résumé sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Summary,
    Education,
    Experience,
    ResearchExperience,
    IndustryExperience,
    Projects,
    Skills,
    Certifications,
    Publications,
    HonorsAwards,
    Volunteering,
}

impl SectionKind {
    /// Order used when appending sections the user did not place explicitly.
    pub const CANONICAL: [SectionKind; 11] = [
        SectionKind::Summary,
        SectionKind::Education,
        SectionKind::Experience,
        SectionKind::ResearchExperience,
        SectionKind::IndustryExperience,
        SectionKind::Projects,
        SectionKind::Skills,
        SectionKind::Certifications,
        SectionKind::Publications,
        SectionKind::HonorsAwards,
        SectionKind::Volunteering,
    ];

    /// Order used when the payload carries no `order`.
    pub const DEFAULT_ORDER: [SectionKind; 9] = [
        SectionKind::Education,
        SectionKind::ResearchExperience,
        SectionKind::IndustryExperience,
        SectionKind::Publications,
        SectionKind::Projects,
        SectionKind::Skills,
        SectionKind::HonorsAwards,
        SectionKind::Volunteering,
        SectionKind::Certifications,
    ];

    /// Default heading, also the name the front end puts in `order`.
    pub fn title(self) -> &'static str {
        match self {
            SectionKind::Summary => "Summary",
            SectionKind::Education => "Education",
            SectionKind::Experience => "Experience",
            SectionKind::ResearchExperience => "Research Experience",
            SectionKind::IndustryExperience => "Industry Experience",
            SectionKind::Projects => "Projects",
            SectionKind::Skills => "Skills",
            SectionKind::Certifications => "Certifications",
            SectionKind::Publications => "Publications",
            SectionKind::HonorsAwards => "Honors & Awards",
            SectionKind::Volunteering => "Volunteering",
        }
    }

    /// Keys accepted in `sectionNames`; the first is the canonical id.
    pub fn ids(self) -> &'static [&'static str] {
        match self {
            SectionKind::Summary => &["summary"],
            SectionKind::Education => &["education"],
            SectionKind::Experience => &["experience"],
            SectionKind::ResearchExperience => &["researchexperience"],
            SectionKind::IndustryExperience => &["industryexperience"],
            SectionKind::Projects => &["projects"],
            SectionKind::Skills => &["skills"],
            SectionKind::Certifications => &["certifications"],
            SectionKind::Publications => &["publications"],
            SectionKind::HonorsAwards => &["honors&awards", "honorsawards"],
            SectionKind::Volunteering => &["volunteering"],
        }
    }

    /// Resolves an `order` entry such as "Research Experience".
    pub fn from_order_name(name: &str) -> Option<SectionKind> {
        let id = canonical_id(name);
        SectionKind::CANONICAL
            .into_iter()
            .find(|kind| kind.ids().contains(&id.as_str()))
    }

    fn heading(self, title: &str) -> String {
        let title = escape(title);
        match self {
            SectionKind::Summary => format!("\\vspace{{0.5ex}}\n\\section*{{{title}}}"),
            SectionKind::Education => format!("\\vspace{{-10px}}\n\\section{{{title}}}"),
            SectionKind::ResearchExperience => format!("\\section{{{title}}}"),
            _ => format!("\\vspace{{-2ex}}\n\\section{{{title}}}"),
        }
    }

    fn shape(self) -> Option<EntryShape> {
        let shape = match self {
            SectionKind::Summary | SectionKind::Skills => return None,
            SectionKind::Education => EntryShape::EDUCATION,
            SectionKind::Projects => EntryShape::PROJECT,
            SectionKind::Publications => EntryShape::PUBLICATION,
            SectionKind::Certifications => EntryShape::CERTIFICATION,
            SectionKind::HonorsAwards => EntryShape::HONOR,
            SectionKind::Experience
            | SectionKind::ResearchExperience
            | SectionKind::IndustryExperience
            | SectionKind::Volunteering => EntryShape::EXPERIENCE,
        };
        Some(shape)
    }

    fn entries(self, doc: &ResumeDocument) -> &[Entry] {
        match self {
            SectionKind::Education => &doc.education,
            SectionKind::Experience => &doc.experience,
            SectionKind::ResearchExperience => &doc.research_experience,
            SectionKind::IndustryExperience => &doc.industry_experience,
            SectionKind::Projects => &doc.projects,
            SectionKind::Certifications => &doc.certifications,
            SectionKind::Publications => &doc.publications,
            SectionKind::HonorsAwards => &doc.honors_awards,
            SectionKind::Volunteering => &doc.volunteering,
            SectionKind::Summary | SectionKind::Skills => &[],
        }
    }

    /// Body of the section without its heading; empty when there is no data.
    pub fn build_body(self, doc: &ResumeDocument) -> String {
        match self {
            SectionKind::Summary => build_summary(&doc.summary),
            SectionKind::Skills => build_skills(&doc.skills),
            kind => match kind.shape() {
                Some(shape) => build_entries(&shape, kind.entries(doc)),
                None => String::new(),
            },
        }
    }

    /// Heading plus body under `title`, or empty when the section has no data.
    pub fn render(self, doc: &ResumeDocument, title: &str) -> String {
        let body = self.build_body(doc);
        if body.trim().is_empty() {
            return String::new();
        }
        format!("{}\n{body}", self.heading(title))
    }
}

/// Lower-cased, whitespace-free form used to match section names and ids.
pub fn canonical_id(name: &str) -> String {
    name.chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Entry shapes
// ────────────────────────────────────────────────────────────────────────────

/// Maps entry fields onto the subheading's four slots for one section kind.
#[derive(Debug, Clone, Copy)]
pub struct EntryShape {
    pub title: EntryField,
    pub dates: EntryField,
    pub org: EntryField,
    /// `None` leaves the fourth slot empty.
    pub location: Option<EntryField>,
    /// When set, a non-blank `link` turns the title into a hyperlink.
    pub linked_title: bool,
    /// Vertical space inserted before an entry's bullet list.
    pub bullet_gap: Option<&'static str>,
}

impl EntryShape {
    pub const EDUCATION: EntryShape = EntryShape {
        title: EntryField::University,
        dates: EntryField::Date,
        org: EntryField::Degree,
        location: Some(EntryField::Location),
        linked_title: false,
        bullet_gap: Some("4px"),
    };

    pub const EXPERIENCE: EntryShape = EntryShape {
        title: EntryField::Title,
        dates: EntryField::Dates,
        org: EntryField::Company,
        location: Some(EntryField::Location),
        linked_title: false,
        bullet_gap: Some("4px"),
    };

    pub const HONOR: EntryShape = EntryShape {
        bullet_gap: None,
        ..EntryShape::EXPERIENCE
    };

    pub const PROJECT: EntryShape = EntryShape {
        title: EntryField::Name,
        dates: EntryField::Dates,
        org: EntryField::Description,
        location: None,
        linked_title: true,
        bullet_gap: Some("2px"),
    };

    pub const PUBLICATION: EntryShape = EntryShape {
        title: EntryField::Title,
        dates: EntryField::Date,
        org: EntryField::Publisher,
        location: None,
        linked_title: true,
        bullet_gap: Some("2px"),
    };

    pub const CERTIFICATION: EntryShape = EntryShape {
        title: EntryField::Name,
        dates: EntryField::Date,
        org: EntryField::Provider,
        location: None,
        linked_title: false,
        bullet_gap: Some("4px"),
    };

    pub const CUSTOM_BLOCK: EntryShape = EntryShape {
        title: EntryField::Title,
        dates: EntryField::Dates,
        org: EntryField::Org,
        location: Some(EntryField::Location),
        linked_title: false,
        bullet_gap: Some("4px"),
    };

    fn title<'a>(&self, entry: &'a Entry) -> Title<'a> {
        let label = entry.get(self.title);
        if self.linked_title && !entry.link.trim().is_empty() {
            Title::Link {
                label,
                target: &entry.link,
            }
        } else {
            Title::Text(label)
        }
    }
}

/// First subheading slot. Only this slot may carry markup, and only as a link
/// built here; the label inside is still escaped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Title<'a> {
    Text(&'a str),
    Link { label: &'a str, target: &'a str },
}

impl Title<'_> {
    fn to_markup(self) -> String {
        match self {
            Title::Text(text) => escape(text),
            Title::Link { label, target } => hyperlink(target, &escape(label)),
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Shared sub-builders
// ────────────────────────────────────────────────────────────────────────────

pub fn subheading(title: Title<'_>, dates: &str, org: &str, location: &str) -> String {
    format!(
        "\\resumeSubheading\n  {{{}}}{{{}}}\n  {{{}}}{{{}}}",
        title.to_markup(),
        escape(dates),
        escape(org),
        escape(location)
    )
}

/// One `\resumeItem` line per non-blank bullet.
pub fn bullet_items(bullets: &[String]) -> Vec<String> {
    bullets
        .iter()
        .filter(|bullet| !bullet.trim().is_empty())
        .map(|bullet| format!("      \\resumeItem{{{}}}", escape(bullet)))
        .collect()
}

pub fn build_entries(shape: &EntryShape, entries: &[Entry]) -> String {
    if entries.is_empty() {
        return String::new();
    }

    let mut lines = vec![LIST_START.to_string()];
    for entry in entries {
        lines.push(subheading(
            shape.title(entry),
            entry.get(shape.dates),
            entry.get(shape.org),
            shape.location.map(|field| entry.get(field)).unwrap_or(""),
        ));

        // An empty itemize is a LaTeX error, so all-blank bullets emit nothing.
        let items = bullet_items(&entry.bullets);
        if items.is_empty() {
            continue;
        }
        if let Some(gap) = shape.bullet_gap {
            lines.push(format!("    \\vspace{{{gap}}}"));
        }
        lines.push(ITEM_LIST_START.to_string());
        lines.extend(items);
        lines.push(ITEM_LIST_END.to_string());
    }
    lines.push(LIST_END.to_string());
    lines.join("\n")
}

pub fn build_skills(skills: &Skills) -> String {
    if skills.is_empty() {
        return String::new();
    }

    let mut lines = vec![LIST_START.to_string()];
    lines.extend(skills.iter().map(|category| {
        format!(
            "\\resumeItem{{\\textbf{{{}}}: {}}}",
            escape(&category.category),
            escape(&category.skills.join(", "))
        )
    }));
    lines.push(LIST_END.to_string());
    lines.join("\n")
}

pub fn build_summary(summary: &str) -> String {
    if summary.trim().is_empty() {
        return String::new();
    }
    escape(summary)
}

/// A user-defined section. Sections without blocks are omitted like empty
/// built-in sections.
pub fn build_custom_section(section: &CustomSection) -> String {
    let body = build_entries(&EntryShape::CUSTOM_BLOCK, &section.blocks);
    if body.is_empty() {
        return String::new();
    }
    format!(
        "\\vspace{{-2ex}}\n\\section{{{}}}\n{body}",
        escape(section.display_title())
    )
}
