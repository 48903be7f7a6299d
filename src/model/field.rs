//! Bookmarks and word-processor fields.
//!
//! Page numbers are not known while the document is being assembled, so the
//! index refers to headings through `PAGEREF` fields bound to bookmarks. The
//! field carries a cached result that a later pagination pass replaces.

use serde::{Deserialize, Serialize};
use std::fmt::Write as FmtWrite;

/// A named anchor in the document body.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bookmark {
    /// Numeric bookmark id (unique within the document)
    pub id: u32,

    /// Bookmark name referenced by fields
    pub name: String,
}

impl Bookmark {
    /// Create a new bookmark.
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A field instance: instruction plus cached result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    /// What the field computes
    pub code: FieldCode,

    /// Cached display value (stale until the field is updated)
    pub result: Option<String>,

    /// Whether the consumer should recompute this field
    pub dirty: bool,
}

impl Field {
    /// A page reference to `bookmark` showing `placeholder` until resolved.
    pub fn page_ref(bookmark: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            code: FieldCode::PageRef {
                bookmark: bookmark.into(),
                hyperlink: true,
            },
            result: Some(placeholder.into()),
            dirty: true,
        }
    }

    /// A native table-of-contents field.
    pub fn toc(toc: TocField) -> Self {
        Self {
            code: FieldCode::TableOfContents(toc),
            result: None,
            dirty: true,
        }
    }

    /// The field instruction text, e.g. `PAGEREF sec_1 \h`.
    pub fn instruction(&self) -> String {
        self.code.instruction()
    }

    /// Bookmark targeted by this field, if it is a page reference.
    pub fn bookmark_target(&self) -> Option<&str> {
        match &self.code {
            FieldCode::PageRef { bookmark, .. } => Some(bookmark),
            FieldCode::TableOfContents(_) => None,
        }
    }
}

/// Supported field codes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldCode {
    /// Page number of a bookmark
    PageRef {
        /// Target bookmark name
        bookmark: String,
        /// Make the result a hyperlink to the bookmark (`\h`)
        hyperlink: bool,
    },

    /// Table of contents built from heading styles
    TableOfContents(TocField),
}

impl FieldCode {
    /// Build the instruction string for this field code.
    pub fn instruction(&self) -> String {
        match self {
            FieldCode::PageRef {
                bookmark,
                hyperlink,
            } => {
                let mut instruction = format!("PAGEREF {}", bookmark);
                if *hyperlink {
                    instruction.push_str(" \\h");
                }
                instruction
            }
            FieldCode::TableOfContents(toc) => toc.instruction(),
        }
    }
}

/// Switches for a `TOC` field.
///
/// Default: `TOC \o "1-3" \h \z \u`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocField {
    /// First heading level included
    pub start_level: u8,
    /// Last heading level included
    pub end_level: u8,
    /// Entries link to headings (`\h`)
    pub hyperlinks: bool,
    /// Hide tab leader and page numbers in web layout (`\z`)
    pub hide_in_web_layout: bool,
    /// Also use paragraph outline levels (`\u`)
    pub use_outline_levels: bool,
}

impl TocField {
    /// Create a TOC field with default switches.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading levels to include.
    pub fn with_levels(mut self, start: u8, end: u8) -> Self {
        self.start_level = start.clamp(1, 9);
        self.end_level = end.clamp(self.start_level, 9);
        self
    }

    /// Build the field instruction string.
    pub fn instruction(&self) -> String {
        let mut instruction = String::from("TOC");
        // Writing into a String cannot fail.
        let _ = write!(
            &mut instruction,
            r#" \o "{}-{}""#,
            self.start_level, self.end_level
        );
        if self.hyperlinks {
            instruction.push_str(" \\h");
        }
        if self.hide_in_web_layout {
            instruction.push_str(" \\z");
        }
        if self.use_outline_levels {
            instruction.push_str(" \\u");
        }
        instruction
    }
}

impl Default for TocField {
    fn default() -> Self {
        Self {
            start_level: 1,
            end_level: 3,
            hyperlinks: true,
            hide_in_web_layout: true,
            use_outline_levels: true,
        }
    }
}
