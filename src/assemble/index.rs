//! Index lines and heading bookmarks.
//!
//! Each section gets a bookmark on its heading and an index line whose page
//! number is a `PAGEREF` field. The field shows a placeholder until a
//! pagination pass updates it; page numbers are never computed here.

use super::AssembleOptions;
use crate::model::{Bookmark, Field, IndexEntry, Paragraph, TabStop};
use crate::request::SectionSpec;

/// Allocates bookmarks and builds the paragraphs that use them.
#[derive(Debug, Clone)]
pub struct IndexBuilder {
    prefix: String,
    tab_stop_in: f32,
    placeholder: String,
    entries: Vec<IndexEntry>,
}

impl IndexBuilder {
    /// Create an empty index.
    pub fn new(options: &AssembleOptions) -> Self {
        Self {
            prefix: options.bookmark_prefix.clone(),
            tab_stop_in: options.index_tab_stop_in,
            placeholder: options.page_placeholder.clone(),
            entries: Vec::new(),
        }
    }

    /// Allocate one entry per section, in order.
    ///
    /// Ordinals continue from any entries already allocated, so bookmark
    /// names and ids stay unique.
    pub fn allocate(mut self, sections: &[SectionSpec]) -> Self {
        for section in sections {
            let ordinal = self.entries.len() as u32 + 1;
            let name = format!("{}{}", self.prefix, ordinal);
            self.entries.push(IndexEntry {
                ordinal,
                title: section.title.clone(),
                bookmark: Bookmark::new(ordinal, name),
            });
        }
        self
    }

    /// Allocated entries in section order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Number of allocated entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if no entries are allocated.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index-page line: label, tab to the dotted right stop, page reference.
    pub fn index_line(&self, entry: &IndexEntry) -> Paragraph {
        let mut line =
            Paragraph::with_text(entry.label()).with_tab_stop(TabStop::right_dotted(self.tab_stop_in));
        line.add_tab();
        line.add_field(Field::page_ref(entry.bookmark_id(), self.placeholder.as_str()));
        line
    }

    /// All index lines in order.
    pub fn lines(&self) -> impl Iterator<Item = Paragraph> + '_ {
        self.entries.iter().map(|entry| self.index_line(entry))
    }

    /// Level-1 section heading carrying the entry's bookmark.
    pub fn heading(&self, entry: &IndexEntry) -> Paragraph {
        Paragraph::heading(entry.label(), 1).with_bookmark(entry.bookmark.clone())
    }
}
