//! Markdown preview of an assembled document.

use std::fmt::Write as _;

use crate::error::Result;
use crate::model::{Block, Document, FieldCode, InlineContent, Paragraph, Table};

use super::{DocumentStats, RenderOptions, RenderResult};

/// Convert a document to Markdown.
pub fn to_markdown(doc: &Document, options: &RenderOptions) -> Result<String> {
    MarkdownRenderer::new(options.clone()).render(doc)
}

/// Convert a document to Markdown with statistics.
pub fn to_markdown_with_stats(doc: &Document, options: &RenderOptions) -> Result<RenderResult> {
    let mut options = options.clone();
    options.collect_stats = true;
    MarkdownRenderer::new(options).render_with_stats(doc)
}

/// Markdown renderer.
///
/// Headings shift down one level so the title becomes `#` and section
/// headings `##`. Page references become links to heading anchors.
pub struct MarkdownRenderer {
    options: RenderOptions,
}

impl MarkdownRenderer {
    /// Create a new Markdown renderer.
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    /// Render a document to Markdown.
    pub fn render(&self, doc: &Document) -> Result<String> {
        self.render_internal(doc)
    }

    /// Render a document to Markdown with statistics.
    pub fn render_with_stats(&self, doc: &Document) -> Result<RenderResult> {
        let content = self.render_internal(doc)?;
        let stats = if self.options.collect_stats {
            DocumentStats::from_document(doc)
        } else {
            DocumentStats::default()
        };
        Ok(RenderResult::new(content, doc.metadata.clone(), stats))
    }

    fn render_internal(&self, doc: &Document) -> Result<String> {
        let mut output = String::new();

        if self.options.include_frontmatter {
            output.push_str(&doc.metadata.to_yaml_frontmatter());
        }

        let body_start = doc.body_start();
        for (i, block) in doc.blocks.iter().enumerate() {
            if !self.options.include_index && i < body_start && !is_title(block) {
                continue;
            }
            self.render_block(&mut output, doc, block)?;
        }

        Ok(output.trim().to_string())
    }

    fn render_block(&self, output: &mut String, doc: &Document, block: &Block) -> Result<()> {
        match block {
            Block::Paragraph(p) => self.render_paragraph(output, p)?,
            Block::Table(t) => self.render_table(output, t)?,
            Block::Image {
                resource_id,
                alt_text,
                ..
            } => {
                let alt = alt_text.as_deref().unwrap_or("");
                let file = doc
                    .get_resource(resource_id)
                    .map(|r| format!("{}.{}", resource_id, r.extension()))
                    .unwrap_or_else(|| resource_id.clone());
                writeln!(output, "![{}]({}{})\n", alt, self.options.image_path_prefix, file)?;
            }
            Block::PageBreak => output.push_str("---\n\n"),
        }
        Ok(())
    }

    fn render_paragraph(&self, output: &mut String, para: &Paragraph) -> Result<()> {
        if para.is_toc() {
            output.push_str("[TOC]\n\n");
            return Ok(());
        }
        if para.is_empty() {
            return Ok(());
        }

        if let Some(level) = para.heading_level() {
            let level = (level + 1).min(self.options.max_heading_level);
            output.push_str(&"#".repeat(level as usize));
            output.push(' ');
            self.render_inline(output, &para.content)?;
            if let Some(ref bookmark) = para.bookmark {
                write!(output, " {{#{}}}", bookmark.name)?;
            }
            output.push_str("\n\n");
            return Ok(());
        }

        self.render_inline(output, &para.content)?;
        output.push_str("\n\n");
        Ok(())
    }

    fn render_inline(&self, output: &mut String, content: &[InlineContent]) -> Result<()> {
        for item in content {
            match item {
                InlineContent::Text(run) => {
                    let text = if self.options.escape_special_chars {
                        escape_markdown(&run.text)
                    } else {
                        run.text.clone()
                    };
                    if self.options.preserve_line_breaks {
                        output.push_str(&text.replace('\n', "  \n"));
                    } else {
                        output.push_str(&text.replace('\n', " "));
                    }
                }
                InlineContent::Tab => output.push_str(" ... "),
                InlineContent::LineBreak => {
                    if self.options.preserve_line_breaks {
                        output.push_str("  \n");
                    } else {
                        output.push(' ');
                    }
                }
                InlineContent::Field(field) => {
                    let shown = field.result.as_deref().unwrap_or("");
                    match &field.code {
                        FieldCode::PageRef { bookmark, .. } => {
                            write!(output, "[{}](#{})", shown, bookmark)?;
                        }
                        FieldCode::TableOfContents(_) => output.push_str(shown),
                    }
                }
            }
        }
        Ok(())
    }

    fn render_table(&self, output: &mut String, table: &Table) -> Result<()> {
        let col_count = table.column_count();
        if table.is_empty() || col_count == 0 {
            return Ok(());
        }

        for (i, row) in table.rows.iter().enumerate() {
            output.push('|');
            for c in 0..col_count {
                let text = row.cells.get(c).map(|cell| cell.text.as_str()).unwrap_or("");
                write!(output, " {} |", escape_cell(text))?;
            }
            output.push('\n');

            if i == 0 {
                output.push('|');
                output.push_str(&" --- |".repeat(col_count));
                output.push('\n');
            }
        }
        output.push('\n');
        Ok(())
    }
}

fn is_title(block: &Block) -> bool {
    block
        .as_paragraph()
        .is_some_and(|p| p.heading_level() == Some(0))
}

/// Escape characters that could be misread as Markdown syntax.
fn escape_markdown(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '`' | '*' | '_' | '[' | ']' | '|' => {
                result.push('\\');
                result.push(c);
            }
            _ => result.push(c),
        }
    }
    result
}

fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bookmark, Field, TableStyle, TocField};

    fn sample() -> Document {
        let mut doc = Document::new();
        doc.metadata.title = Some("Spec".to_string());
        doc.blocks.push(Block::Paragraph(Paragraph::heading("Spec", 0)));
        doc.blocks.push(Block::Paragraph(Paragraph::heading("Index", 1)));
        let mut line = Paragraph::with_text("1. Data");
        line.add_tab();
        line.add_field(Field::page_ref("sec_1", "1"));
        doc.blocks.push(Block::Paragraph(line));
        doc.blocks.push(Block::PageBreak);
        let mut toc = Paragraph::new();
        toc.add_field(Field::toc(TocField::default()));
        doc.blocks.push(Block::Paragraph(toc));
        doc.blocks.push(Block::Paragraph(
            Paragraph::heading("1. Data", 1).with_bookmark(Bookmark::new(1, "sec_1")),
        ));
        doc.blocks.push(Block::Table(
            Table::with_columns(&["Field", "Type"], &[vec!["MATNR", "CHAR"]])
                .styled(TableStyle::LightList),
        ));
        doc
    }

    #[test]
    fn test_escape_markdown() {
        assert_eq!(escape_markdown("Hello *world*"), "Hello \\*world\\*");
        assert_eq!(escape_markdown("[link]"), "\\[link\\]");
    }

    #[test]
    fn test_render_index_and_sections() {
        let md = to_markdown(&sample(), &RenderOptions::new()).unwrap();
        assert!(md.starts_with("# Spec"));
        assert!(md.contains("## Index"));
        assert!(md.contains("1. Data ... [1](#sec_1)"));
        assert!(md.contains("[TOC]"));
        assert!(md.contains("## 1. Data {#sec_1}"));
        assert!(md.contains("| Field | Type |\n| --- | --- |\n| MATNR | CHAR |"));
    }

    #[test]
    fn test_render_without_index() {
        let md = to_markdown(&sample(), &RenderOptions::new().with_index(false)).unwrap();
        assert!(md.starts_with("# Spec"));
        assert!(!md.contains("## Index"));
        assert!(!md.contains("[TOC]"));
        assert!(md.contains("## 1. Data"));
    }

    #[test]
    fn test_render_with_frontmatter_and_stats() {
        let options = RenderOptions::new().with_frontmatter(true);
        let result = to_markdown_with_stats(&sample(), &options).unwrap();
        assert!(result.content.starts_with("---"));
        assert!(result.content.contains("title: \"Spec\""));
        assert_eq!(result.stats.table_count, 1);
        assert_eq!(result.stats.placeholder_count, 1);
    }
}
