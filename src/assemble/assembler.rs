//! Section-by-section document assembly.

use std::sync::Arc;

use super::{AssembleOptions, DocumentBuilder, IndexBuilder};
use crate::diagram::{render_flow_diagram, DiagramOutcome, DiagramRenderer};
use crate::error::Result;
use crate::model::{Document, Paragraph, Table, TableStyle};
use crate::parser::{classify_table, extract_flow_line, segment, Chunk, TableParse};
use crate::request::{find_section_content, normalize_title, SectionContent, SectionSpec};

/// Turns generated section content into a [`Document`].
///
/// Malformed content never fails a build: tables that cannot be parsed are
/// kept as text and diagram failures become a placeholder paragraph.
///
/// # Example
///
/// ```
/// use techspec::assemble::{AssembleOptions, Assembler};
/// use techspec::request::{SectionContent, SectionSpec};
///
/// let results = vec![SectionContent::new("Overview", "Reads sales orders.")];
/// let sections = vec![SectionSpec::new("Overview")];
///
/// let doc = Assembler::new(AssembleOptions::default())
///     .build(&results, &sections)
///     .unwrap();
/// assert_eq!(doc.index.len(), 1);
/// ```
#[derive(Clone)]
pub struct Assembler {
    options: AssembleOptions,
    renderer: Option<Arc<dyn DiagramRenderer>>,
}

impl Assembler {
    /// Create an assembler without a diagram renderer.
    pub fn new(options: AssembleOptions) -> Self {
        Self {
            options,
            renderer: None,
        }
    }

    /// Use `renderer` for the flow-diagram section.
    pub fn with_diagram_renderer(mut self, renderer: impl DiagramRenderer + 'static) -> Self {
        self.renderer = Some(Arc::new(renderer));
        self
    }

    /// Use a shared renderer for the flow-diagram section.
    pub fn with_shared_renderer(mut self, renderer: Arc<dyn DiagramRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Get the assembly options.
    pub fn options(&self) -> &AssembleOptions {
        &self.options
    }

    /// Assemble the document for `sections`, taking content from `results`.
    pub fn build(&self, results: &[SectionContent], sections: &[SectionSpec]) -> Result<Document> {
        let index = IndexBuilder::new(&self.options).allocate(sections);
        let mut builder = DocumentBuilder::new(index);

        builder.emit_header(&self.options.title)?;
        builder.emit_index(&self.options.index_heading, self.options.toc.as_ref())?;

        let flow_key = normalize_title(&self.options.flow_section_title);
        for section in sections {
            let entry = builder.begin_section()?;
            let content = find_section_content(results, &section.title);
            if content.is_none() {
                log::debug!("No content for section '{}'", section.title);
            }

            if normalize_title(&section.title) == flow_key {
                self.emit_diagram(&mut builder, &section.title, content)?;
            } else if let Some(content) = content {
                emit_chunks(&mut builder, content)?;
            }
            log::debug!("Emitted section {}", entry.label());
        }

        let mut document = builder.finalize(self.options.attribution.as_deref())?;
        document.metadata.subject = Some("Technical Specification".to_string());
        Ok(document)
    }

    fn emit_diagram(
        &self,
        builder: &mut DocumentBuilder,
        title: &str,
        content: Option<&str>,
    ) -> Result<()> {
        match render_flow_diagram(self.renderer.as_deref(), content) {
            DiagramOutcome::Image(resource) => {
                let alt = content
                    .and_then(extract_flow_line)
                    .map(str::to_string)
                    .or_else(|| Some(title.to_string()));
                builder.push_image(resource, alt, self.options.diagram_width_in)?;
            }
            DiagramOutcome::Unavailable(reason) => {
                log::warn!("Flow diagram not embedded: {}", reason);
                builder.push_paragraph(Paragraph::with_text(
                    self.options.diagram_placeholder.as_str(),
                ))?;
            }
        }
        Ok(())
    }
}

impl std::fmt::Debug for Assembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Assembler")
            .field("options", &self.options)
            .field("renderer", &self.renderer.as_ref().map(|r| r.name().to_string()))
            .finish()
    }
}

/// Append the chunks of one section's content.
fn emit_chunks(builder: &mut DocumentBuilder, content: &str) -> Result<()> {
    for chunk in segment(content) {
        match chunk {
            Chunk::Text(text) => builder.push_paragraph(Paragraph::with_text(text))?,
            Chunk::Table(raw) => match classify_table(raw) {
                TableParse::Parsed(table) => {
                    log::debug!(
                        "Table with {} columns and {} rows",
                        table.column_count(),
                        table.row_count()
                    );
                    builder.push_table(
                        Table::with_columns(&table.columns, &table.rows)
                            .styled(TableStyle::LightList),
                    )?;
                }
                TableParse::Fallback(raw) => {
                    log::debug!("Table chunk kept as text");
                    builder.push_paragraph(Paragraph::with_text(raw))?;
                }
            },
        }
    }
    Ok(())
}
