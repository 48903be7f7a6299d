//! Paragraph and text-level types.

use serde::{Deserialize, Serialize};

use super::{Bookmark, Field};

/// Twentieths of a point per inch.
const TWIPS_PER_INCH: f32 = 1440.0;

/// A paragraph of text content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paragraph {
    /// Inline content in the paragraph
    pub content: Vec<InlineContent>,

    /// Paragraph style
    pub style: ParagraphStyle,

    /// Bookmark spanning the paragraph, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bookmark: Option<Bookmark>,
}

impl Paragraph {
    /// Create a new empty paragraph.
    pub fn new() -> Self {
        Self {
            content: Vec::new(),
            style: ParagraphStyle::default(),
            bookmark: None,
        }
    }

    /// Create a paragraph with plain text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.add_text(text);
        p
    }

    /// Create a heading paragraph.
    ///
    /// Level 0 is the document title; levels 1-9 map to heading styles.
    pub fn heading(text: impl Into<String>, level: u8) -> Self {
        let mut p = Self::with_text(text);
        p.style.heading_level = Some(level.min(9));
        p
    }

    /// Attach a bookmark to the paragraph and return self.
    pub fn with_bookmark(mut self, bookmark: Bookmark) -> Self {
        self.bookmark = Some(bookmark);
        self
    }

    /// Add a tab stop and return self.
    pub fn with_tab_stop(mut self, stop: TabStop) -> Self {
        self.style.tab_stops.push(stop);
        self
    }

    /// Add plain text to the paragraph.
    pub fn add_text(&mut self, text: impl Into<String>) {
        self.content.push(InlineContent::Text(TextRun::new(text)));
    }

    /// Add a tab character.
    pub fn add_tab(&mut self) {
        self.content.push(InlineContent::Tab);
    }

    /// Add a line break.
    pub fn add_line_break(&mut self) {
        self.content.push(InlineContent::LineBreak);
    }

    /// Add a field.
    pub fn add_field(&mut self, field: Field) {
        self.content.push(InlineContent::Field(field));
    }

    /// Iterate over the fields in this paragraph.
    pub fn fields(&self) -> impl Iterator<Item = &Field> {
        self.content.iter().filter_map(|c| match c {
            InlineContent::Field(f) => Some(f),
            _ => None,
        })
    }

    /// Check if the paragraph holds a table-of-contents field.
    pub fn is_toc(&self) -> bool {
        self.fields()
            .any(|f| matches!(f.code, super::FieldCode::TableOfContents(_)))
    }

    /// Get plain text content of the paragraph.
    ///
    /// Fields contribute their cached result.
    pub fn plain_text(&self) -> String {
        self.content
            .iter()
            .map(|c| match c {
                InlineContent::Text(run) => run.text.clone(),
                InlineContent::Tab => "\t".to_string(),
                InlineContent::LineBreak => "\n".to_string(),
                InlineContent::Field(field) => field.result.clone().unwrap_or_default(),
            })
            .collect()
    }

    /// Check if the paragraph is empty.
    pub fn is_empty(&self) -> bool {
        self.content.is_empty() || self.plain_text().trim().is_empty()
    }

    /// Check if this is a heading.
    pub fn is_heading(&self) -> bool {
        self.style.heading_level.is_some()
    }

    /// Get the heading level or None.
    pub fn heading_level(&self) -> Option<u8> {
        self.style.heading_level
    }
}

impl Default for Paragraph {
    fn default() -> Self {
        Self::new()
    }
}

/// Inline content within a paragraph.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InlineContent {
    /// A run of text
    Text(TextRun),

    /// Jump to the next tab stop
    Tab,

    /// A line break
    LineBreak,

    /// A complex field (page reference, table of contents)
    Field(Field),
}

/// A run of text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextRun {
    /// The text content
    pub text: String,
}

impl TextRun {
    /// Create a new text run.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

/// Paragraph-level styling.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParagraphStyle {
    /// Heading level (0 = title, 1-9 = heading), None for body text
    pub heading_level: Option<u8>,

    /// Custom tab stops
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tab_stops: Vec<TabStop>,
}

/// A tab stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabStop {
    /// Position from the left margin in twips
    pub position: u32,

    /// Alignment of text at the stop
    pub alignment: TabAlignment,

    /// Leader character filling the gap
    pub leader: TabLeader,
}

impl TabStop {
    /// Right-aligned stop with a dotted leader at `inches` from the margin.
    pub fn right_dotted(inches: f32) -> Self {
        Self {
            position: inches_to_twips(inches),
            alignment: TabAlignment::Right,
            leader: TabLeader::Dot,
        }
    }
}

/// Tab stop alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabAlignment {
    /// Left aligned
    #[default]
    Left,
    /// Centered
    Center,
    /// Right aligned
    Right,
}

/// Tab leader character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabLeader {
    /// No leader
    #[default]
    None,
    /// Dotted leader
    Dot,
    /// Hyphen leader
    Hyphen,
}

fn inches_to_twips(inches: f32) -> u32 {
    (inches.max(0.0) * TWIPS_PER_INCH).round() as u32
}
