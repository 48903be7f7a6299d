//! Block-level content.

use super::{Paragraph, Table};
use serde::{Deserialize, Serialize};

/// EMUs (English Metric Units) per inch.
pub(crate) const EMU_PER_INCH: f64 = 914_400.0;

/// A content block in the document body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Block {
    /// A paragraph of text (headings included)
    Paragraph(Paragraph),

    /// A table
    Table(Table),

    /// An embedded image
    Image {
        /// Resource ID for the image
        resource_id: String,
        /// Alternative text
        alt_text: Option<String>,
        /// Display width in EMUs
        width_emu: i64,
        /// Display height in EMUs
        height_emu: i64,
    },

    /// Hard page break
    PageBreak,
}

impl Block {
    /// Image block sized to `width_in` inches, keeping the aspect ratio.
    pub fn image(
        resource_id: impl Into<String>,
        alt_text: Option<String>,
        width_in: f64,
        aspect_ratio: f64,
    ) -> Self {
        let width_emu = (width_in * EMU_PER_INCH).round() as i64;
        let height_emu = (width_in * aspect_ratio * EMU_PER_INCH).round() as i64;
        Block::Image {
            resource_id: resource_id.into(),
            alt_text,
            width_emu,
            height_emu,
        }
    }

    /// Get the paragraph if this block is one.
    pub fn as_paragraph(&self) -> Option<&Paragraph> {
        match self {
            Block::Paragraph(p) => Some(p),
            _ => None,
        }
    }

    /// Get the table if this block is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Block::Table(t) => Some(t),
            _ => None,
        }
    }

    /// Check if this block is a heading paragraph.
    pub fn is_heading(&self) -> bool {
        self.as_paragraph().is_some_and(Paragraph::is_heading)
    }

    /// Get plain text content of the block.
    pub fn plain_text(&self) -> Option<String> {
        match self {
            Block::Paragraph(p) => Some(p.plain_text()),
            Block::Table(t) => Some(t.plain_text()),
            Block::Image { alt_text, .. } => alt_text.clone(),
            Block::PageBreak => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_block_size() {
        let block = Block::image("image1", None, 5.5, 0.5);
        match block {
            Block::Image {
                width_emu,
                height_emu,
                ..
            } => {
                assert_eq!(width_emu, 5_029_200);
                assert_eq!(height_emu, 2_514_600);
            }
            _ => panic!("expected image block"),
        }
    }

    #[test]
    fn test_block_accessors() {
        let heading = Block::Paragraph(Paragraph::heading("1. Overview", 1));
        assert!(heading.is_heading());
        assert!(heading.as_table().is_none());
        assert_eq!(heading.plain_text().as_deref(), Some("1. Overview"));
        assert!(Block::PageBreak.plain_text().is_none());
    }
}
