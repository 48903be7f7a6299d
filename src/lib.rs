//! # techspec
//!
//! Assembles Technical Specification documents (`.docx`) from generated
//! section content.
//!
//! Section text is loosely structured markdown: prose with the occasional
//! pipe table. The assembler splits it into paragraphs and tables, builds a
//! navigable index whose page numbers are word-processor fields, embeds a
//! rendered flow diagram, and writes an OOXML package.
//!
//! ## Quick Start
//!
//! ```no_run
//! use techspec::{GenerationRequest, TechSpec};
//!
//! fn main() -> techspec::Result<()> {
//!     let json = std::fs::read_to_string("request.json")?;
//!     let request = GenerationRequest::from_json(&json)?;
//!
//!     TechSpec::new()
//!         .with_title("ZSD_ORDER_REPORT")
//!         .build(&request)?
//!         .save("Technical Specification Document.docx")?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Markdown segmentation**: lazy split into text and table chunks
//! - **Best-effort tables**: unusable tables fall back to plain text
//! - **Index with page references**: bookmarks plus `PAGEREF` placeholders
//! - **Flow diagrams**: pluggable renderer, Graphviz bundled
//! - **Previews**: Markdown, plain text and JSON views of the same model

pub mod assemble;
pub mod detect;
pub mod diagram;
pub mod error;
pub mod fields;
pub mod model;
pub mod parser;
pub mod render;
pub mod request;

#[cfg(test)]
mod testdata;

// Re-export commonly used types
pub use assemble::{AssembleOptions, Assembler, BuildState, DocumentBuilder, IndexBuilder};
pub use detect::{detect_format_from_bytes, image_dimensions, ImageFormat};
pub use diagram::{render_flow_diagram, DiagramOutcome, DiagramRenderer, GraphvizRenderer};
pub use error::{Error, Result};
pub use fields::{resolve_with_retry, CommandResolver, FieldResolver, RetryPolicy};
pub use model::{
    Block, Bookmark, Document, Field, FieldCode, IndexEntry, InlineContent, Metadata,
    Paragraph, Placeholder, Resource, Table, TableCell, TableRow, TableStyle,
};
pub use parser::{classify_table, extract_flow_line, parse_markdown_table, segment, Chunk};
pub use render::{DocumentStats, DocxOptions, JsonFormat, RenderOptions};
pub use request::{GenerationRequest, SectionContent, SectionKind, SectionSpec, TemplateSection};

use std::path::Path;
use std::sync::Arc;

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Assemble a document from a request with default options.
///
/// # Example
///
/// ```
/// use techspec::{build_document, GenerationRequest};
///
/// let request = GenerationRequest::from_json(r#"{
///     "results": [{"section_name": "Overview", "content": "Reads orders."}],
///     "template_sections": [{"title": "Overview", "content": ""}]
/// }"#).unwrap();
///
/// let doc = build_document(&request).unwrap();
/// assert_eq!(doc.metadata.section_count, 1);
/// ```
pub fn build_document(request: &GenerationRequest) -> Result<Document> {
    Assembler::new(AssembleOptions::default()).build(&request.results, &request.sections())
}

/// Assemble a document and serialize it to `.docx` bytes.
pub fn build_docx(request: &GenerationRequest) -> Result<Vec<u8>> {
    let doc = build_document(request)?;
    render::to_docx(&doc, &DocxOptions::default())
}

/// Assemble a document from a JSON request and write it to `path`.
///
/// # Example
///
/// ```no_run
/// let json = std::fs::read_to_string("request.json").unwrap();
/// techspec::build_docx_file(&json, "spec.docx").unwrap();
/// ```
pub fn build_docx_file<P: AsRef<Path>>(json: &str, path: P) -> Result<()> {
    let request = GenerationRequest::from_json(json)?;
    let doc = build_document(&request)?;
    render::write_docx(&doc, path, &DocxOptions::default())
}

/// Builder-style API for document generation.
///
/// # Example
///
/// ```no_run
/// use techspec::{GenerationRequest, GraphvizRenderer, TechSpec};
///
/// let request = GenerationRequest::from_json(&std::fs::read_to_string("request.json")?)?;
/// let markdown = TechSpec::new()
///     .with_diagram_renderer(GraphvizRenderer::new())
///     .with_frontmatter()
///     .build(&request)?
///     .to_markdown()?;
/// # Ok::<(), techspec::Error>(())
/// ```
pub struct TechSpec {
    assemble_options: AssembleOptions,
    render_options: RenderOptions,
    docx_options: DocxOptions,
    renderer: Option<Arc<dyn DiagramRenderer>>,
}

impl TechSpec {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            assemble_options: AssembleOptions::default(),
            render_options: RenderOptions::default(),
            docx_options: DocxOptions::default(),
            renderer: None,
        }
    }

    /// Replace the assembly options.
    pub fn with_options(mut self, options: AssembleOptions) -> Self {
        self.assemble_options = options;
        self
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.assemble_options = self.assemble_options.with_title(title);
        self
    }

    /// Set the attribution line.
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.assemble_options = self.assemble_options.with_attribution(attribution);
        self
    }

    /// Omit the attribution line.
    pub fn without_attribution(mut self) -> Self {
        self.assemble_options = self.assemble_options.without_attribution();
        self
    }

    /// Render the flow-diagram section with `renderer`.
    pub fn with_diagram_renderer(mut self, renderer: impl DiagramRenderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Set the display width of embedded diagrams in inches.
    pub fn with_diagram_width(mut self, inches: f64) -> Self {
        self.assemble_options = self.assemble_options.with_diagram_width(inches);
        self
    }

    /// Enable frontmatter in Markdown output.
    pub fn with_frontmatter(mut self) -> Self {
        self.render_options = self.render_options.with_frontmatter(true);
        self
    }

    /// Set the preview render options.
    pub fn with_render_options(mut self, options: RenderOptions) -> Self {
        self.render_options = options;
        self
    }

    /// Enable or disable the update-fields-on-open request.
    pub fn with_update_fields(mut self, update: bool) -> Self {
        self.docx_options = self.docx_options.with_update_fields(update);
        self
    }

    /// Set the creator recorded in the package.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.docx_options = self.docx_options.with_creator(creator);
        self
    }

    /// Assemble the document for a request.
    pub fn build(self, request: &GenerationRequest) -> Result<TechSpecResult> {
        let sections = request.sections();
        self.build_sections(&request.results, &sections)
    }

    /// Assemble the document for an explicit section list.
    pub fn build_sections(
        self,
        results: &[SectionContent],
        sections: &[SectionSpec],
    ) -> Result<TechSpecResult> {
        let mut assembler = Assembler::new(self.assemble_options);
        if let Some(renderer) = self.renderer {
            assembler = assembler.with_shared_renderer(renderer);
        }
        let document = assembler.build(results, sections)?;
        Ok(TechSpecResult {
            document,
            render_options: self.render_options,
            docx_options: self.docx_options,
        })
    }
}

impl Default for TechSpec {
    fn default() -> Self {
        Self::new()
    }
}

/// An assembled document with its output options.
pub struct TechSpecResult {
    /// The assembled document
    pub document: Document,
    render_options: RenderOptions,
    docx_options: DocxOptions,
}

impl TechSpecResult {
    /// Serialize to `.docx` bytes.
    pub fn to_docx(&self) -> Result<Vec<u8>> {
        render::to_docx(&self.document, &self.docx_options)
    }

    /// Write the `.docx` package to `path`.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        render::write_docx(&self.document, path, &self.docx_options)
    }

    /// Convert to Markdown.
    pub fn to_markdown(&self) -> Result<String> {
        render::to_markdown(&self.document, &self.render_options)
    }

    /// Convert to plain text.
    pub fn to_text(&self) -> Result<String> {
        render::to_text(&self.document, &self.render_options)
    }

    /// Convert to JSON.
    pub fn to_json(&self, format: JsonFormat) -> Result<String> {
        render::to_json(&self.document, format)
    }

    /// Document statistics.
    pub fn stats(&self) -> DocumentStats {
        DocumentStats::from_document(&self.document)
    }

    /// Page references awaiting pagination.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        self.document.placeholders()
    }

    /// Get the document.
    pub fn document(&self) -> &Document {
        &self.document
    }
}
