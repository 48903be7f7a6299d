//! Document model types for the assembled specification.
//!
//! This module defines the intermediate representation that bridges
//! document assembly and rendering. The model is format-agnostic: the
//! docx writer, the Markdown preview and the JSON dump all consume it.

mod block;
mod document;
mod field;
mod paragraph;
mod resource;
mod table;

pub use block::Block;
pub use document::{Document, IndexEntry, Metadata, Placeholder};
pub use field::{Bookmark, Field, FieldCode, TocField};
pub use paragraph::{
    InlineContent, Paragraph, ParagraphStyle, TabAlignment, TabLeader, TabStop, TextRun,
};
pub use resource::Resource;
pub use table::{Table, TableCell, TableRow, TableStyle};
