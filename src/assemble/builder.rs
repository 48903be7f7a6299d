//! Append-only document builder with explicit states.

use std::fmt;

use chrono::Utc;

use super::IndexBuilder;
use crate::error::{Error, Result};
use crate::model::{Block, Document, Field, IndexEntry, Paragraph, Resource, Table, TocField};

/// Where the builder is in the document layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildState {
    /// Nothing emitted
    Init,
    /// Title heading emitted
    HeaderEmitted,
    /// Index page and TOC emitted
    IndexEmitted,
    /// The first `n` section headings emitted
    SectionsEmitted(usize),
    /// Document handed off; nothing more can be appended
    Finalized,
}

impl fmt::Display for BuildState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildState::Init => write!(f, "init"),
            BuildState::HeaderEmitted => write!(f, "header emitted"),
            BuildState::IndexEmitted => write!(f, "index emitted"),
            BuildState::SectionsEmitted(n) => write!(f, "{} section(s) emitted", n),
            BuildState::Finalized => write!(f, "finalized"),
        }
    }
}

/// Builds a [`Document`] in layout order.
///
/// Blocks are only ever appended. Calls that do not fit the current state
/// fail with [`Error::InvalidState`] and leave the builder unchanged.
#[derive(Debug)]
pub struct DocumentBuilder {
    state: BuildState,
    document: Document,
    index: IndexBuilder,
    image_count: u32,
}

impl DocumentBuilder {
    /// Create a builder for the sections allocated in `index`.
    pub fn new(index: IndexBuilder) -> Self {
        Self {
            state: BuildState::Init,
            document: Document::new(),
            index,
            image_count: 0,
        }
    }

    /// Current state.
    pub fn state(&self) -> BuildState {
        self.state
    }

    /// Index entries this builder lays out.
    pub fn entries(&self) -> &[IndexEntry] {
        self.index.entries()
    }

    /// Emit the title heading.
    pub fn emit_header(&mut self, title: &str) -> Result<()> {
        self.require(BuildState::Init, "emit the header")?;
        self.push(Block::Paragraph(Paragraph::heading(title, 0)));
        self.document.metadata.title = Some(title.to_string());
        self.state = BuildState::HeaderEmitted;
        Ok(())
    }

    /// Emit the index heading, one line per section, a page break and the
    /// optional native table of contents.
    pub fn emit_index(&mut self, heading: &str, toc: Option<&TocField>) -> Result<()> {
        self.require(BuildState::HeaderEmitted, "emit the index")?;

        self.push(Block::Paragraph(Paragraph::heading(heading, 1)));
        let lines: Vec<Paragraph> = self.index.lines().collect();
        for line in lines {
            self.push(Block::Paragraph(line));
        }
        self.push(Block::PageBreak);

        if let Some(toc) = toc {
            let mut paragraph = Paragraph::new();
            paragraph.add_field(Field::toc(toc.clone()));
            self.push(Block::Paragraph(paragraph));
        }

        self.state = BuildState::IndexEmitted;
        Ok(())
    }

    /// Emit the heading of the next section and return its index entry.
    pub fn begin_section(&mut self) -> Result<IndexEntry> {
        let emitted = match self.state {
            BuildState::IndexEmitted => 0,
            BuildState::SectionsEmitted(n) => n,
            _ => return Err(self.invalid("begin a section")),
        };
        let Some(entry) = self.index.entries().get(emitted).cloned() else {
            return Err(Error::InvalidState(format!(
                "all {} section(s) already emitted",
                emitted
            )));
        };

        let heading = self.index.heading(&entry);
        self.push(Block::Paragraph(heading));
        self.state = BuildState::SectionsEmitted(emitted + 1);
        Ok(entry)
    }

    /// Append a body paragraph to the current section.
    pub fn push_paragraph(&mut self, paragraph: Paragraph) -> Result<()> {
        self.require_section("append a paragraph")?;
        self.push(Block::Paragraph(paragraph));
        Ok(())
    }

    /// Append a table to the current section.
    pub fn push_table(&mut self, table: Table) -> Result<()> {
        self.require_section("append a table")?;
        self.push(Block::Table(table));
        Ok(())
    }

    /// Register an image resource and place it at `width_in` inches wide.
    ///
    /// Returns the resource ID.
    pub fn push_image(
        &mut self,
        resource: Resource,
        alt_text: Option<String>,
        width_in: f64,
    ) -> Result<String> {
        self.require_section("append an image")?;
        self.image_count += 1;
        let id = format!("image{}", self.image_count);
        self.push(Block::image(
            id.clone(),
            alt_text,
            width_in,
            resource.aspect_ratio(),
        ));
        self.document.resources.insert(id.clone(), resource);
        Ok(id)
    }

    /// Close the document, appending the attribution line if given.
    ///
    /// Every allocated section must have been emitted.
    pub fn finalize(&mut self, attribution: Option<&str>) -> Result<Document> {
        let emitted = match self.state {
            BuildState::IndexEmitted => 0,
            BuildState::SectionsEmitted(n) => n,
            _ => return Err(self.invalid("finalize")),
        };
        if emitted != self.index.len() {
            return Err(Error::InvalidState(format!(
                "cannot finalize with {} of {} section(s) emitted",
                emitted,
                self.index.len()
            )));
        }

        if let Some(text) = attribution {
            let mut paragraph = Paragraph::new();
            paragraph.add_line_break();
            paragraph.add_text(text);
            self.push(Block::Paragraph(paragraph));
        }

        let mut document = std::mem::take(&mut self.document);
        document.index = self.index.entries().to_vec();
        document.metadata.section_count = document.index.len() as u32;
        document.metadata.created = Some(Utc::now());

        self.state = BuildState::Finalized;
        log::debug!(
            "Finalized document: {} blocks, {} sections, {} images",
            document.block_count(),
            document.metadata.section_count,
            document.resources.len()
        );
        Ok(document)
    }

    fn push(&mut self, block: Block) {
        self.document.blocks.push(block);
    }

    fn require(&self, expected: BuildState, action: &str) -> Result<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(self.invalid(action))
        }
    }

    fn require_section(&self, action: &str) -> Result<()> {
        match self.state {
            BuildState::SectionsEmitted(_) => Ok(()),
            _ => Err(self.invalid(action)),
        }
    }

    fn invalid(&self, action: &str) -> Error {
        Error::InvalidState(format!("cannot {} when {}", action, self.state))
    }
}
