//! Main document part (`word/document.xml`).

use std::fmt::Write;

use super::escape_xml;
use crate::error::Result;
use crate::model::{
    Block, Document, Field, InlineContent, Paragraph, TabAlignment, TabLeader, Table, TableRow,
};

const NAMESPACES: &str = concat!(
    r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main" "#,
    r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
    r#"xmlns:wp="http://schemas.openxmlformats.org/drawingml/2006/wordprocessingDrawing" "#,
    r#"xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
    r#"xmlns:pic="http://schemas.openxmlformats.org/drawingml/2006/picture""#,
);

/// US Letter, one-inch margins, in twips.
const SECTION_PROPERTIES: &str = concat!(
    r#"<w:sectPr><w:pgSz w:w="12240" w:h="15840"/>"#,
    r#"<w:pgMar w:top="1440" w:right="1440" w:bottom="1440" w:left="1440" w:header="720" w:footer="720" w:gutter="0"/>"#,
    "</w:sectPr>",
);

/// Serialize the document body.
///
/// `image_rels` maps resource IDs to relationship IDs (`(resource, rel, target)`).
pub(super) fn write_document(doc: &Document, image_rels: &[(String, String, String)]) -> Result<String> {
    let mut writer = BodyWriter {
        xml: String::with_capacity(4096 + doc.block_count() * 256),
        image_rels,
        drawing_id: 0,
    };

    writer.xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    write!(writer.xml, "<w:document {}><w:body>", NAMESPACES)?;
    for block in &doc.blocks {
        writer.write_block(block)?;
    }
    writer.xml.push_str(SECTION_PROPERTIES);
    writer.xml.push_str("</w:body></w:document>");
    Ok(writer.xml)
}

struct BodyWriter<'a> {
    xml: String,
    image_rels: &'a [(String, String, String)],
    drawing_id: u32,
}

impl BodyWriter<'_> {
    fn write_block(&mut self, block: &Block) -> Result<()> {
        match block {
            Block::Paragraph(p) => self.write_paragraph(p),
            Block::Table(t) => self.write_table(t),
            Block::Image {
                resource_id,
                alt_text,
                width_emu,
                height_emu,
            } => self.write_image(resource_id, alt_text.as_deref(), *width_emu, *height_emu),
            Block::PageBreak => {
                self.xml.push_str(r#"<w:p><w:r><w:br w:type="page"/></w:r></w:p>"#);
                Ok(())
            }
        }
    }

    fn write_paragraph(&mut self, para: &Paragraph) -> Result<()> {
        self.xml.push_str("<w:p>");
        self.write_paragraph_properties(para)?;

        // Collapsed bookmark at the start of the paragraph.
        if let Some(ref bookmark) = para.bookmark {
            write!(
                self.xml,
                r#"<w:bookmarkStart w:id="{}" w:name="{}"/><w:bookmarkEnd w:id="{}"/>"#,
                bookmark.id,
                escape_xml(&bookmark.name),
                bookmark.id
            )?;
        }

        for item in &para.content {
            match item {
                InlineContent::Text(run) => self.write_text_run(&run.text),
                InlineContent::Tab => self.xml.push_str("<w:r><w:tab/></w:r>"),
                InlineContent::LineBreak => self.xml.push_str("<w:r><w:br/></w:r>"),
                InlineContent::Field(field) => self.write_field(field)?,
            }
        }

        self.xml.push_str("</w:p>");
        Ok(())
    }

    fn write_paragraph_properties(&mut self, para: &Paragraph) -> Result<()> {
        let style = para.heading_level().map(|level| match level {
            0 => "Title".to_string(),
            n => format!("Heading{}", n),
        });
        if style.is_none() && para.style.tab_stops.is_empty() {
            return Ok(());
        }

        self.xml.push_str("<w:pPr>");
        if let Some(style) = style {
            write!(self.xml, r#"<w:pStyle w:val="{}"/>"#, style)?;
        }
        if !para.style.tab_stops.is_empty() {
            self.xml.push_str("<w:tabs>");
            for stop in &para.style.tab_stops {
                let alignment = match stop.alignment {
                    TabAlignment::Left => "left",
                    TabAlignment::Center => "center",
                    TabAlignment::Right => "right",
                };
                write!(self.xml, r#"<w:tab w:val="{}""#, alignment)?;
                match stop.leader {
                    TabLeader::None => {}
                    TabLeader::Dot => self.xml.push_str(r#" w:leader="dot""#),
                    TabLeader::Hyphen => self.xml.push_str(r#" w:leader="hyphen""#),
                }
                write!(self.xml, r#" w:pos="{}"/>"#, stop.position)?;
            }
            self.xml.push_str("</w:tabs>");
        }
        self.xml.push_str("</w:pPr>");
        Ok(())
    }

    /// Text run; embedded newlines become line breaks.
    fn write_text_run(&mut self, text: &str) {
        self.xml.push_str("<w:r>");
        for (i, line) in text.split('\n').enumerate() {
            if i > 0 {
                self.xml.push_str("<w:br/>");
            }
            let line = line.strip_suffix('\r').unwrap_or(line);
            if !line.is_empty() {
                self.xml.push_str(r#"<w:t xml:space="preserve">"#);
                self.xml.push_str(&escape_xml(line));
                self.xml.push_str("</w:t>");
            }
        }
        self.xml.push_str("</w:r>");
    }

    /// Complex field: begin, instruction, separate, cached result, end.
    fn write_field(&mut self, field: &Field) -> Result<()> {
        if field.dirty {
            self.xml
                .push_str(r#"<w:r><w:fldChar w:fldCharType="begin" w:dirty="true"/></w:r>"#);
        } else {
            self.xml
                .push_str(r#"<w:r><w:fldChar w:fldCharType="begin"/></w:r>"#);
        }
        write!(
            self.xml,
            r#"<w:r><w:instrText xml:space="preserve"> {} </w:instrText></w:r>"#,
            escape_xml(&field.instruction())
        )?;
        self.xml
            .push_str(r#"<w:r><w:fldChar w:fldCharType="separate"/></w:r>"#);
        if let Some(ref result) = field.result {
            write!(self.xml, "<w:r><w:t>{}</w:t></w:r>", escape_xml(result))?;
        }
        self.xml
            .push_str(r#"<w:r><w:fldChar w:fldCharType="end"/></w:r>"#);
        Ok(())
    }

    fn write_table(&mut self, table: &Table) -> Result<()> {
        let columns = table.column_count();
        if columns == 0 {
            return Ok(());
        }

        self.xml.push_str("<w:tbl><w:tblPr>");
        write!(self.xml, r#"<w:tblStyle w:val="{}"/>"#, table.style.style_id())?;
        self.xml.push_str(r#"<w:tblW w:w="5000" w:type="pct"/>"#);
        self.xml.push_str(
            r#"<w:tblLook w:val="04A0" w:firstRow="1" w:lastRow="0" w:firstColumn="1" w:lastColumn="0" w:noHBand="0" w:noVBand="1"/>"#,
        );
        self.xml.push_str("</w:tblPr><w:tblGrid>");
        for _ in 0..columns {
            self.xml.push_str("<w:gridCol/>");
        }
        self.xml.push_str("</w:tblGrid>");

        for row in &table.rows {
            self.write_row(row, columns);
        }
        self.xml.push_str("</w:tbl>");

        // A table directly followed by another table would merge with it.
        self.xml.push_str("<w:p/>");
        Ok(())
    }

    /// Row padded to `columns` cells.
    fn write_row(&mut self, row: &TableRow, columns: usize) {
        self.xml.push_str("<w:tr>");
        if row.is_header {
            self.xml.push_str("<w:trPr><w:tblHeader/></w:trPr>");
        }
        for i in 0..columns {
            self.xml.push_str("<w:tc><w:p>");
            if let Some(cell) = row.cells.get(i).filter(|c| !c.is_empty()) {
                self.write_text_run(&cell.text);
            }
            self.xml.push_str("</w:p></w:tc>");
        }
        self.xml.push_str("</w:tr>");
    }

    fn write_image(
        &mut self,
        resource_id: &str,
        alt_text: Option<&str>,
        cx: i64,
        cy: i64,
    ) -> Result<()> {
        let Some((_, rel_id, _)) = self.image_rels.iter().find(|(id, _, _)| id == resource_id)
        else {
            log::warn!("Image block references unknown resource '{}'", resource_id);
            return Ok(());
        };

        self.drawing_id += 1;
        let descr = escape_xml(alt_text.unwrap_or(""));
        write!(
            self.xml,
            concat!(
                r#"<w:p><w:r><w:drawing><wp:inline distT="0" distB="0" distL="0" distR="0">"#,
                r#"<wp:extent cx="{cx}" cy="{cy}"/><wp:effectExtent l="0" t="0" r="0" b="0"/>"#,
                r#"<wp:docPr id="{id}" name="Picture {id}" descr="{descr}"/>"#,
                r#"<wp:cNvGraphicFramePr><a:graphicFrameLocks noChangeAspect="1"/></wp:cNvGraphicFramePr>"#,
                r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/picture">"#,
                r#"<pic:pic><pic:nvPicPr><pic:cNvPr id="0" name="{name}" descr="{descr}"/><pic:cNvPicPr/></pic:nvPicPr>"#,
                r#"<pic:blipFill><a:blip r:embed="{rel}"/><a:stretch><a:fillRect/></a:stretch></pic:blipFill>"#,
                r#"<pic:spPr><a:xfrm><a:off x="0" y="0"/><a:ext cx="{cx}" cy="{cy}"/></a:xfrm>"#,
                r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom></pic:spPr></pic:pic>"#,
                r#"</a:graphicData></a:graphic></wp:inline></w:drawing></w:r></w:p>"#,
            ),
            cx = cx,
            cy = cy,
            id = self.drawing_id,
            descr = descr,
            name = escape_xml(resource_id),
            rel = rel_id,
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Bookmark, TabStop, TableStyle};

    fn render(blocks: Vec<Block>) -> String {
        let mut doc = Document::new();
        doc.blocks = blocks;
        write_document(&doc, &[("image1".into(), "rId3".into(), "media/image1.png".into())]).unwrap()
    }

    #[test]
    fn test_index_line_xml() {
        let mut line =
            Paragraph::with_text("1. Overview").with_tab_stop(TabStop::right_dotted(6.0));
        line.add_tab();
        line.add_field(Field::page_ref("sec_1", "1"));
        let xml = render(vec![Block::Paragraph(line)]);

        assert!(xml.contains(r#"<w:tab w:val="right" w:leader="dot" w:pos="8640"/>"#));
        assert!(xml.contains(r#"<w:fldChar w:fldCharType="begin" w:dirty="true"/>"#));
        assert!(xml.contains(r#"<w:instrText xml:space="preserve"> PAGEREF sec_1 \h </w:instrText>"#));
        assert!(xml.contains(r#"<w:fldChar w:fldCharType="separate"/></w:r><w:r><w:t>1</w:t>"#));
        assert!(xml.contains(r#"<w:fldChar w:fldCharType="end"/>"#));
    }

    #[test]
    fn test_heading_bookmark_xml() {
        let heading = Paragraph::heading("1. Overview", 1).with_bookmark(Bookmark::new(1, "sec_1"));
        let xml = render(vec![Block::Paragraph(heading)]);
        assert!(xml.contains(r#"<w:pStyle w:val="Heading1"/>"#));
        assert!(xml.contains(r#"<w:bookmarkStart w:id="1" w:name="sec_1"/><w:bookmarkEnd w:id="1"/>"#));
    }

    #[test]
    fn test_title_and_page_break() {
        let xml = render(vec![
            Block::Paragraph(Paragraph::heading("Spec", 0)),
            Block::PageBreak,
        ]);
        assert!(xml.contains(r#"<w:pStyle w:val="Title"/>"#));
        assert!(xml.contains(r#"<w:br w:type="page"/>"#));
        assert!(xml.ends_with("</w:sectPr></w:body></w:document>"));
    }

    #[test]
    fn test_multiline_text_and_escaping() {
        let xml = render(vec![Block::Paragraph(Paragraph::with_text("a < b\nc & d"))]);
        assert!(xml.contains(
            r#"<w:t xml:space="preserve">a &lt; b</w:t><w:br/><w:t xml:space="preserve">c &amp; d</w:t>"#
        ));
    }

    #[test]
    fn test_table_xml_pads_rows() {
        let table = Table::with_columns(&["Field", "Type"], &[vec!["MATNR"]])
            .styled(TableStyle::LightList);
        let xml = render(vec![Block::Table(table)]);
        assert!(xml.contains(r#"<w:tblStyle w:val="LightList"/>"#));
        assert!(xml.contains("<w:trPr><w:tblHeader/></w:trPr>"));
        assert_eq!(xml.matches("<w:tc>").count(), 4);
        assert_eq!(xml.matches("<w:gridCol/>").count(), 2);
    }

    #[test]
    fn test_image_xml() {
        let xml = render(vec![Block::image("image1", Some("A -> B".into()), 5.5, 0.5)]);
        assert!(xml.contains(r#"<wp:extent cx="5029200" cy="2514600"/>"#));
        assert!(xml.contains(r#"<a:blip r:embed="rId3"/>"#));
        assert!(xml.contains(r#"descr="A -&gt; B""#));
    }

    #[test]
    fn test_unknown_image_is_skipped() {
        let xml = render(vec![Block::image("image9", None, 5.5, 0.5)]);
        assert!(!xml.contains("<w:drawing>"));
    }
}
