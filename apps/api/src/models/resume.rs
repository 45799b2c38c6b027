//! Résumé payload model.
//!
//! Built fresh from each request body and never mutated afterwards. Every text
//! field is lenient: a missing key, `null` or a non-string scalar degrades to a
//! string instead of failing the request.

use std::collections::HashMap;
use std::fmt;

use serde::de::{self, DeserializeOwned, Deserializer, IgnoredAny, MapAccess, SeqAccess, Visitor};
use serde::Deserialize;
use serde_json::{Map, Value};

/// Top-level résumé record posted by the form front end.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResumeDocument {
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub phone: String,
    #[serde(deserialize_with = "lenient_text")]
    pub email: String,
    #[serde(deserialize_with = "lenient_text")]
    pub linkedin: String,
    #[serde(deserialize_with = "lenient_text")]
    pub github: String,
    #[serde(deserialize_with = "lenient_text")]
    pub website: String,
    #[serde(deserialize_with = "lenient_text")]
    pub summary: String,

    #[serde(alias = "customHeaders", deserialize_with = "lenient_list")]
    pub custom_headers: Vec<CustomHeader>,

    #[serde(deserialize_with = "lenient_list")]
    pub education: Vec<Entry>,
    #[serde(deserialize_with = "lenient_list")]
    pub experience: Vec<Entry>,
    #[serde(
        rename = "researchExperience",
        alias = "researchexperience",
        deserialize_with = "lenient_list"
    )]
    pub research_experience: Vec<Entry>,
    #[serde(
        rename = "industryExperience",
        alias = "industryexperience",
        deserialize_with = "lenient_list"
    )]
    pub industry_experience: Vec<Entry>,
    #[serde(deserialize_with = "lenient_list")]
    pub projects: Vec<Entry>,
    #[serde(deserialize_with = "lenient_list")]
    pub publications: Vec<Entry>,
    #[serde(deserialize_with = "lenient_list")]
    pub certifications: Vec<Entry>,
    #[serde(
        rename = "honorsAwards",
        alias = "honorsawards",
        deserialize_with = "lenient_list"
    )]
    pub honors_awards: Vec<Entry>,
    #[serde(deserialize_with = "lenient_list")]
    pub volunteering: Vec<Entry>,

    pub skills: Skills,

    #[serde(
        rename = "customSections",
        alias = "custom_sections",
        deserialize_with = "lenient_list"
    )]
    pub custom_sections: Vec<CustomSection>,

    #[serde(deserialize_with = "lenient_texts")]
    pub order: Vec<String>,

    /// Canonical section id → display title chosen by the user.
    #[serde(
        rename = "sectionNames",
        alias = "section_names",
        deserialize_with = "lenient_names"
    )]
    pub section_names: HashMap<String, String>,
}

/// Extra contact-line value (portfolio, blog, ...). The form also sends a
/// `label`, which the contact line never shows.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomHeader {
    #[serde(deserialize_with = "lenient_text")]
    pub value: String,
}

/// Keys the front end sends under two spellings; the first is the canonical one.
const KEY_SPELLINGS: [(&str, &str); 6] = [
    ("researchExperience", "researchexperience"),
    ("industryExperience", "industryexperience"),
    ("honorsAwards", "honorsawards"),
    ("customSections", "custom_sections"),
    ("sectionNames", "section_names"),
    ("custom_headers", "customHeaders"),
];

impl ResumeDocument {
    /// Decodes a payload object.
    ///
    /// When a key arrives under both spellings only one survives: the
    /// canonical spelling, unless its value is empty.
    pub fn from_object(mut object: Map<String, Value>) -> Result<Self, serde_json::Error> {
        for (canonical, alternate) in KEY_SPELLINGS {
            if !object.contains_key(canonical) {
                continue;
            }
            let Some(alternate_value) = object.remove(alternate) else {
                continue;
            };
            if object.get(canonical).map_or(true, is_blank) {
                object.insert(canonical.to_string(), alternate_value);
            }
        }
        serde_json::from_value(Value::Object(object))
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        Value::Array(items) => items.is_empty(),
        Value::Object(fields) => fields.is_empty(),
        Value::Bool(_) | Value::Number(_) => false,
    }
}

/// One entry of any list-shaped section.
///
/// Each section kind reads a different subset of these keys; see
/// `document::fragments::EntryShape` for the per-kind mapping.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Entry {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_text")]
    pub name: String,
    #[serde(deserialize_with = "lenient_text")]
    pub university: String,
    #[serde(deserialize_with = "lenient_text")]
    pub degree: String,
    #[serde(deserialize_with = "lenient_text")]
    pub company: String,
    #[serde(deserialize_with = "lenient_text")]
    pub org: String,
    #[serde(deserialize_with = "lenient_text")]
    pub provider: String,
    #[serde(deserialize_with = "lenient_text")]
    pub publisher: String,
    #[serde(deserialize_with = "lenient_text")]
    pub description: String,
    #[serde(deserialize_with = "lenient_text")]
    pub date: String,
    #[serde(deserialize_with = "lenient_text")]
    pub dates: String,
    #[serde(deserialize_with = "lenient_text")]
    pub location: String,
    #[serde(deserialize_with = "lenient_text")]
    pub link: String,
    #[serde(deserialize_with = "lenient_texts")]
    pub bullets: Vec<String>,
}

/// Named text slot of an [`Entry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryField {
    Title,
    Name,
    University,
    Degree,
    Company,
    Org,
    Provider,
    Publisher,
    Description,
    Date,
    Dates,
    Location,
}

impl Entry {
    pub fn get(&self, field: EntryField) -> &str {
        match field {
            EntryField::Title => &self.title,
            EntryField::Name => &self.name,
            EntryField::University => &self.university,
            EntryField::Degree => &self.degree,
            EntryField::Company => &self.company,
            EntryField::Org => &self.org,
            EntryField::Provider => &self.provider,
            EntryField::Publisher => &self.publisher,
            EntryField::Description => &self.description,
            EntryField::Date => &self.date,
            EntryField::Dates => &self.dates,
            EntryField::Location => &self.location,
        }
    }
}

/// User-defined section made of subheading blocks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CustomSection {
    #[serde(deserialize_with = "lenient_text")]
    pub title: String,
    #[serde(deserialize_with = "lenient_list")]
    pub blocks: Vec<Entry>,
}

pub const DEFAULT_CUSTOM_TITLE: &str = "Custom";

impl CustomSection {
    /// Title used for both matching `Custom:<title>` markers and the heading.
    pub fn display_title(&self) -> &str {
        match self.title.trim() {
            "" => DEFAULT_CUSTOM_TITLE,
            title => title,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCategory {
    pub category: String,
    pub skills: Vec<String>,
}

/// Skill categories in the order they appear in the payload object.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Skills(pub Vec<SkillCategory>);

impl Skills {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkillCategory> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for Skills {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SkillsVisitor;

        impl<'de> Visitor<'de> for SkillsVisitor {
            type Value = Skills;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of skill category to skill list")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Skills, E> {
                Ok(Skills::default())
            }

            fn visit_none<E: de::Error>(self) -> Result<Skills, E> {
                Ok(Skills::default())
            }

            // Any non-map shape means "no skills".
            fn visit_bool<E: de::Error>(self, _: bool) -> Result<Skills, E> {
                Ok(Skills::default())
            }

            fn visit_i64<E: de::Error>(self, _: i64) -> Result<Skills, E> {
                Ok(Skills::default())
            }

            fn visit_u64<E: de::Error>(self, _: u64) -> Result<Skills, E> {
                Ok(Skills::default())
            }

            fn visit_f64<E: de::Error>(self, _: f64) -> Result<Skills, E> {
                Ok(Skills::default())
            }

            fn visit_str<E: de::Error>(self, _: &str) -> Result<Skills, E> {
                Ok(Skills::default())
            }

            fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Skills, A::Error> {
                while seq.next_element::<IgnoredAny>()?.is_some() {}
                Ok(Skills::default())
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Skills, A::Error> {
                let mut categories = Vec::new();
                while let Some((category, value)) = map.next_entry::<String, Value>()? {
                    categories.push(SkillCategory {
                        category,
                        skills: value_texts(value),
                    });
                }
                Ok(Skills(categories))
            }
        }

        deserializer.deserialize_any(SkillsVisitor)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Lenient field decoding
// ────────────────────────────────────────────────────────────────────────────

/// Text form of a scalar JSON value; containers and `null` become "".
pub fn value_text(value: Value) -> String {
    match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null | Value::Array(_) | Value::Object(_) => String::new(),
    }
}

/// A single string becomes a one-element list; anything else but an array is empty.
fn value_texts(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items.into_iter().map(value_text).collect(),
        Value::String(s) => vec![s],
        _ => Vec::new(),
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Value::deserialize(deserializer).map(value_text)
}

fn lenient_texts<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<String>, D::Error> {
    Value::deserialize(deserializer).map(value_texts)
}

/// Anything but an array is an empty list; elements that do not decode are dropped.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| T::deserialize(item).ok())
            .collect(),
        _ => Vec::new(),
    })
}

fn lenient_names<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<HashMap<String, String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Object(names) => names
            .into_iter()
            .map(|(id, title)| (id, value_text(title)))
            .collect(),
        _ => HashMap::new(),
    })
}
