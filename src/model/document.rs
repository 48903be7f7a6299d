//! Document-level types.

use super::{Block, Bookmark, Paragraph, Resource, Table};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// An assembled specification document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document metadata (title, creator, etc.)
    pub metadata: Metadata,

    /// Body content in reading order
    pub blocks: Vec<Block>,

    /// Embedded resources (images) keyed by resource ID
    pub resources: BTreeMap<String, Resource>,

    /// Index entries, one per section, in section order
    pub index: Vec<IndexEntry>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self {
            metadata: Metadata::default(),
            blocks: Vec::new(),
            resources: BTreeMap::new(),
            index: Vec::new(),
        }
    }

    /// Get the number of body blocks.
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    /// Check if the document has no content.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Get a resource by ID.
    pub fn get_resource(&self, id: &str) -> Option<&Resource> {
        self.resources.get(id)
    }

    /// Iterate over all paragraphs (headings included).
    pub fn paragraphs(&self) -> impl Iterator<Item = &Paragraph> {
        self.blocks.iter().filter_map(Block::as_paragraph)
    }

    /// Iterate over all tables.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(Block::as_table)
    }

    /// Iterate over all heading paragraphs.
    pub fn headings(&self) -> impl Iterator<Item = &Paragraph> {
        self.paragraphs().filter(|p| p.is_heading())
    }

    /// Number of embedded images referenced from the body.
    pub fn image_count(&self) -> usize {
        self.blocks
            .iter()
            .filter(|b| matches!(b, Block::Image { .. }))
            .count()
    }

    /// Find the paragraph carrying the named bookmark.
    pub fn bookmarked_paragraph(&self, name: &str) -> Option<&Paragraph> {
        self.paragraphs()
            .find(|p| p.bookmark.as_ref().is_some_and(|b| b.name == name))
    }

    /// Position of the first bookmarked section heading, or the block count
    /// when there is none. Blocks before it form the title and index page.
    pub fn body_start(&self) -> usize {
        self.blocks
            .iter()
            .position(|b| b.as_paragraph().is_some_and(|p| p.bookmark.is_some()))
            .unwrap_or(self.blocks.len())
    }

    /// Unresolved page references with the heading each one points to.
    ///
    /// One entry per index entry, in index order. `heading` is `None` when no
    /// body paragraph carries the bookmark.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        self.index
            .iter()
            .map(|entry| Placeholder {
                bookmark: entry.bookmark.name.clone(),
                heading: self
                    .bookmarked_paragraph(&entry.bookmark.name)
                    .map(|p| p.plain_text()),
                cached_page: self.cached_page(&entry.bookmark.name),
            })
            .collect()
    }

    fn cached_page(&self, bookmark: &str) -> Option<String> {
        self.paragraphs()
            .flat_map(|p| p.fields())
            .find(|f| f.bookmark_target() == Some(bookmark))
            .and_then(|f| f.result.clone())
    }

    /// Get plain text content of the entire document.
    pub fn plain_text(&self) -> String {
        self.blocks
            .iter()
            .filter_map(Block::plain_text)
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

/// One line of the document index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexEntry {
    /// 1-based position of the section
    pub ordinal: u32,

    /// Section title as given by the template
    pub title: String,

    /// Bookmark placed on the section heading
    pub bookmark: Bookmark,
}

impl IndexEntry {
    /// Bookmark name referenced by the page-reference field.
    pub fn bookmark_id(&self) -> &str {
        &self.bookmark.name
    }

    /// Text shown before the leader: `"{ordinal}. {title}"`.
    pub fn label(&self) -> String {
        format!("{}. {}", self.ordinal, self.title)
    }
}

/// A page reference awaiting resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeholder {
    /// Target bookmark name
    pub bookmark: String,

    /// Text of the bookmarked heading
    pub heading: Option<String>,

    /// Value currently displayed by the field
    pub cached_page: Option<String>,
}

/// Document metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Metadata {
    /// Document title
    pub title: Option<String>,

    /// Document subject
    pub subject: Option<String>,

    /// Creator (author) recorded in the package
    pub creator: Option<String>,

    /// Free-form description
    pub description: Option<String>,

    /// Creation date
    pub created: Option<DateTime<Utc>>,

    /// Number of sections in the document
    pub section_count: u32,
}

impl Metadata {
    /// Create new metadata with a title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }

    /// Convert metadata to YAML frontmatter format.
    pub fn to_yaml_frontmatter(&self) -> String {
        let mut lines = vec!["---".to_string()];

        if let Some(ref title) = self.title {
            lines.push(format!("title: \"{}\"", escape_yaml(title)));
        }
        if let Some(ref subject) = self.subject {
            lines.push(format!("subject: \"{}\"", escape_yaml(subject)));
        }
        if let Some(ref creator) = self.creator {
            lines.push(format!("creator: \"{}\"", escape_yaml(creator)));
        }
        if let Some(ref description) = self.description {
            lines.push(format!("description: \"{}\"", escape_yaml(description)));
        }
        if let Some(ref created) = self.created {
            lines.push(format!("created: {}", created.to_rfc3339()));
        }

        lines.push(format!("sections: {}", self.section_count));

        lines.push("---".to_string());
        lines.push(String::new());

        lines.join("\n")
    }
}

/// Escape special characters for YAML strings.
fn escape_yaml(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}
