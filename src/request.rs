//! Upstream payload types.
//!
//! The content writer produces one [`SectionContent`] per section and a
//! template listing the sections in order. Section matching is by title,
//! ignoring case, surrounding whitespace and Unicode composition.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

use crate::error::{Error, Result};

/// Generated content for one section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionContent {
    /// Section title as produced by the writer
    pub section_name: String,

    /// Generated text, absent when the writer produced nothing
    #[serde(default)]
    pub content: Option<String>,
}

impl SectionContent {
    /// Create a section content entry.
    pub fn new(section_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            section_name: section_name.into(),
            content: Some(content.into()),
        }
    }

    /// An entry without content.
    pub fn empty(section_name: impl Into<String>) -> Self {
        Self {
            section_name: section_name.into(),
            content: None,
        }
    }
}

/// A section of the document template, with sample content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateSection {
    /// Section title
    pub title: String,

    /// Sample content from the template
    #[serde(default)]
    pub content: String,
}

/// Coarse section classification derived from the template.
///
/// Assembly does not depend on it: rendering is decided by the section title
/// and the shape of the generated content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    /// Prose
    #[default]
    Text,
    /// Template sample holds a table
    Table,
    /// Diagram section
    Diagram,
}

impl SectionKind {
    /// Classify a template section.
    ///
    /// Title containing "diagram" → `Diagram`; sample containing `"| "` →
    /// `Table`; otherwise `Text`.
    pub fn classify(title: &str, sample: &str) -> Self {
        if title.to_lowercase().contains("diagram") {
            SectionKind::Diagram
        } else if sample.contains("| ") {
            SectionKind::Table
        } else {
            SectionKind::Text
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SectionKind::Text => write!(f, "text"),
            SectionKind::Table => write!(f, "table"),
            SectionKind::Diagram => write!(f, "diagram"),
        }
    }
}

/// One entry of the ordered section list handed to the assembler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    /// Section title
    pub title: String,

    /// Template classification
    #[serde(default, rename = "type")]
    pub kind: SectionKind,
}

impl SectionSpec {
    /// Create a text section.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            kind: SectionKind::Text,
        }
    }

    /// Set the kind and return self.
    pub fn with_kind(mut self, kind: SectionKind) -> Self {
        self.kind = kind;
        self
    }
}

impl From<&TemplateSection> for SectionSpec {
    fn from(section: &TemplateSection) -> Self {
        Self {
            title: section.title.clone(),
            kind: SectionKind::classify(&section.title, &section.content),
        }
    }
}

/// The full request: generated results plus the template they answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Generated content, one entry per section
    #[serde(default)]
    pub results: Vec<SectionContent>,

    /// Template sections in document order
    #[serde(default)]
    pub template_sections: Vec<TemplateSection>,
}

impl GenerationRequest {
    /// Decode a request from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let request: Self = serde_json::from_str(json)?;
        request.validate()?;
        Ok(request)
    }

    /// Decode a request from a reader.
    pub fn from_reader<R: std::io::Read>(reader: R) -> Result<Self> {
        let request: Self = serde_json::from_reader(reader)?;
        request.validate()?;
        Ok(request)
    }

    /// The ordered section list derived from the template.
    pub fn sections(&self) -> Vec<SectionSpec> {
        self.template_sections.iter().map(SectionSpec::from).collect()
    }

    fn validate(&self) -> Result<()> {
        if let Some(blank) = self
            .template_sections
            .iter()
            .position(|s| s.title.trim().is_empty())
        {
            return Err(Error::InvalidRequest(format!(
                "template section {} has an empty title",
                blank + 1
            )));
        }
        Ok(())
    }
}

/// Matching key for a section title.
pub fn normalize_title(title: &str) -> String {
    title.trim().nfc().collect::<String>().to_lowercase()
}

/// Content of the first result whose name matches `title`.
pub fn find_section_content<'a>(results: &'a [SectionContent], title: &str) -> Option<&'a str> {
    let key = normalize_title(title);
    results
        .iter()
        .find(|r| normalize_title(&r.section_name) == key)
        .and_then(|r| r.content.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(SectionKind::classify("Flow Diagram", ""), SectionKind::Diagram);
        assert_eq!(
            SectionKind::classify("Fields", "| Field | Type |"),
            SectionKind::Table
        );
        assert_eq!(SectionKind::classify("Overview", "Plain"), SectionKind::Text);
        assert_eq!(
            SectionKind::classify("Process diagram notes", "| a |"),
            SectionKind::Diagram
        );
    }

    #[test]
    fn test_find_section_content_case_and_space() {
        let results = vec![
            SectionContent::new("  overview ", "Intro text"),
            SectionContent::new("Overview", "shadowed"),
            SectionContent::empty("Data"),
        ];
        assert_eq!(find_section_content(&results, "OVERVIEW"), Some("Intro text"));
        assert_eq!(find_section_content(&results, "Data"), None);
        assert_eq!(find_section_content(&results, "Missing"), None);
    }

    #[test]
    fn test_normalize_title_unicode() {
        // "é" precomposed vs. "e" + combining acute
        assert_eq!(normalize_title("Caf\u{e9}"), normalize_title(" CAFE\u{301} "));
    }

    #[test]
    fn test_request_from_json() {
        let json = r#"{
            "results": [
                {"section_name": "Overview", "content": "Intro"},
                {"section_name": "Flow Diagram", "content": null}
            ],
            "template_sections": [
                {"title": "Overview", "content": "Describe the program"},
                {"title": "Flow Diagram", "content": "A -> B"},
                {"title": "Data", "content": "| Field | Type |"}
            ]
        }"#;
        let request = GenerationRequest::from_json(json).unwrap();
        assert_eq!(request.results.len(), 2);
        assert!(request.results[1].content.is_none());

        let sections = request.sections();
        let kinds: Vec<SectionKind> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::Text, SectionKind::Diagram, SectionKind::Table]
        );
    }

    #[test]
    fn test_request_rejects_blank_title() {
        let json = r#"{"results": [], "template_sections": [{"title": "  "}]}"#;
        assert!(matches!(
            GenerationRequest::from_json(json),
            Err(Error::InvalidRequest(_))
        ));
    }
}
