//! Plain text preview of an assembled document.

use crate::error::Result;
use crate::model::{Block, Document};

use super::RenderOptions;

/// Convert a document to plain text.
///
/// Blocks are separated by blank lines; page references show their cached
/// value and tables are tab-separated.
pub fn to_text(doc: &Document, options: &RenderOptions) -> Result<String> {
    let body_start = doc.body_start();
    let output = doc
        .blocks
        .iter()
        .enumerate()
        .filter(|(i, block)| {
            options.include_index
                || *i >= body_start
                || block.as_paragraph().is_some_and(|p| p.heading_level() == Some(0))
        })
        .filter_map(|(_, block)| Block::plain_text(block))
        .filter(|text| !text.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");

    Ok(output.trim().to_string())
}
