//! Rendering result with metadata and statistics.

use crate::model::{Block, Document, Metadata};
use serde::{Deserialize, Serialize};

/// Result of rendering a document, including content and statistics.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderResult {
    /// The rendered content (Markdown, text, etc.)
    pub content: String,

    /// Document metadata (copied from source document)
    pub metadata: Metadata,

    /// Document statistics
    pub stats: DocumentStats,
}

impl RenderResult {
    /// Create a new render result.
    pub fn new(content: String, metadata: Metadata, stats: DocumentStats) -> Self {
        Self {
            content,
            metadata,
            stats,
        }
    }

    /// Get the content length in bytes.
    pub fn content_len(&self) -> usize {
        self.content.len()
    }
}

/// Counts describing an assembled document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentStats {
    /// Number of sections (index entries)
    pub section_count: u32,

    /// Number of body paragraphs, headings excluded
    pub paragraph_count: u32,

    /// Number of headings, title included
    pub heading_count: u32,

    /// Number of tables
    pub table_count: u32,

    /// Number of embedded images
    pub image_count: u32,

    /// Number of page references awaiting pagination
    pub placeholder_count: u32,

    /// Approximate word count (whitespace-separated tokens)
    pub word_count: u32,

    /// Character count (excluding whitespace)
    pub char_count: u32,
}

impl DocumentStats {
    /// Create new empty statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collect statistics from a document.
    pub fn from_document(doc: &Document) -> Self {
        let mut stats = Self {
            section_count: doc.index.len() as u32,
            ..Self::default()
        };

        for block in &doc.blocks {
            match block {
                Block::Paragraph(p) if p.is_heading() => stats.heading_count += 1,
                Block::Paragraph(p) => {
                    stats.paragraph_count += 1;
                    stats.placeholder_count += p
                        .fields()
                        .filter(|f| f.bookmark_target().is_some())
                        .count() as u32;
                }
                Block::Table(_) => stats.table_count += 1,
                Block::Image { .. } => stats.image_count += 1,
                Block::PageBreak => {}
            }
        }

        stats.count_text(&doc.plain_text());
        stats
    }

    /// Add word and character counts from text.
    pub fn count_text(&mut self, text: &str) {
        self.word_count += text.split_whitespace().count() as u32;
        self.char_count += text.chars().filter(|c| !c.is_whitespace()).count() as u32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, Paragraph, Table};

    #[test]
    fn test_count_text() {
        let mut stats = DocumentStats::new();
        stats.count_text("Hello, world! This is a test.");

        assert_eq!(stats.word_count, 6);
        assert_eq!(stats.char_count, 24);
    }

    #[test]
    fn test_from_document() {
        let mut doc = Document::new();
        doc.blocks.push(Block::Paragraph(Paragraph::heading("Spec", 0)));
        let mut line = Paragraph::with_text("1. Overview");
        line.add_tab();
        line.add_field(Field::page_ref("sec_1", "1"));
        doc.blocks.push(Block::Paragraph(line));
        doc.blocks.push(Block::PageBreak);
        doc.blocks.push(Block::Table(Table::with_columns(
            &["A"],
            &[vec!["1"]],
        )));

        let stats = DocumentStats::from_document(&doc);
        assert_eq!(stats.heading_count, 1);
        assert_eq!(stats.paragraph_count, 1);
        assert_eq!(stats.placeholder_count, 1);
        assert_eq!(stats.table_count, 1);
        assert_eq!(stats.image_count, 0);
    }
}
