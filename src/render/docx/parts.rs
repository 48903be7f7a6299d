//! Fixed package parts: relationships, styles, settings, properties.

use std::fmt::Write;

use chrono::{SecondsFormat, Utc};

use super::escape_xml;
use crate::error::Result;
use crate::model::Metadata;

pub(super) const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
pub(super) const CT_STYLES: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
pub(super) const CT_SETTINGS: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml";
pub(super) const CT_CORE: &str = "application/vnd.openxmlformats-package.core-properties+xml";
pub(super) const CT_APP: &str =
    "application/vnd.openxmlformats-officedocument.extended-properties+xml";

const XML_DECL: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#;
const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const REL_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_TYPE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(super) fn package_rels() -> String {
    format!(
        concat!(
            "{decl}<Relationships xmlns=\"{ns}\">",
            r#"<Relationship Id="rId1" Type="{rt}/officeDocument" Target="word/document.xml"/>"#,
            r#"<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties" Target="docProps/core.xml"/>"#,
            r#"<Relationship Id="rId3" Type="{rt}/extended-properties" Target="docProps/app.xml"/>"#,
            "</Relationships>",
        ),
        decl = XML_DECL,
        ns = REL_NS,
        rt = REL_TYPE,
    )
}

/// Relationships of the main document part.
pub(super) fn document_rels(image_rels: &[(String, String, String)]) -> Result<String> {
    let mut xml = String::with_capacity(512 + image_rels.len() * 160);
    write!(xml, "{}<Relationships xmlns=\"{}\">", XML_DECL, REL_NS)?;
    write!(
        xml,
        r#"<Relationship Id="rId1" Type="{}/styles" Target="styles.xml"/>"#,
        REL_TYPE
    )?;
    write!(
        xml,
        r#"<Relationship Id="rId2" Type="{}/settings" Target="settings.xml"/>"#,
        REL_TYPE
    )?;
    for (_, rel_id, target) in image_rels {
        write!(
            xml,
            r#"<Relationship Id="{}" Type="{}/image" Target="{}"/>"#,
            rel_id,
            REL_TYPE,
            escape_xml(target)
        )?;
    }
    xml.push_str("</Relationships>");
    Ok(xml)
}

pub(super) fn settings(update_fields: bool) -> String {
    let mut xml = format!("{}<w:settings xmlns:w=\"{}\">", XML_DECL, W_NS);
    if update_fields {
        xml.push_str(r#"<w:updateFields w:val="true"/>"#);
    }
    xml.push_str(r#"<w:defaultTabStop w:val="720"/>"#);
    xml.push_str(r#"<w:characterSpacingControl w:val="doNotCompress"/>"#);
    xml.push_str(r#"<w:compat><w:compatSetting w:name="compatibilityMode" w:uri="http://schemas.microsoft.com/office/word" w:val="15"/></w:compat>"#);
    xml.push_str("</w:settings>");
    xml
}

/// Paragraph styles for title and headings, table styles for parsed tables.
pub(super) fn styles() -> String {
    let mut xml = format!("{}<w:styles xmlns:w=\"{}\">", XML_DECL, W_NS);
    xml.push_str(concat!(
        "<w:docDefaults><w:rPrDefault><w:rPr>",
        r#"<w:rFonts w:ascii="Calibri" w:hAnsi="Calibri" w:eastAsia="Calibri" w:cs="Calibri"/>"#,
        r#"<w:sz w:val="22"/><w:szCs w:val="22"/><w:lang w:val="en-US"/>"#,
        "</w:rPr></w:rPrDefault><w:pPrDefault><w:pPr>",
        r#"<w:spacing w:after="160" w:line="259" w:lineRule="auto"/>"#,
        "</w:pPr></w:pPrDefault></w:docDefaults>",
        r#"<w:style w:type="paragraph" w:default="1" w:styleId="Normal"><w:name w:val="Normal"/><w:qFormat/></w:style>"#,
        r#"<w:style w:type="paragraph" w:styleId="Title"><w:name w:val="Title"/><w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:qFormat/>"#,
        r#"<w:pPr><w:spacing w:after="80" w:line="240" w:lineRule="auto"/><w:contextualSpacing/></w:pPr>"#,
        r#"<w:rPr><w:rFonts w:ascii="Calibri Light" w:hAnsi="Calibri Light"/><w:spacing w:val="-10"/><w:kern w:val="28"/><w:sz w:val="56"/><w:szCs w:val="56"/></w:rPr></w:style>"#,
    ));

    for (level, size, color) in [(1u8, 32u8, "2F5496"), (2, 26, "2F5496"), (3, 24, "1F3763")] {
        let _ = write!(
            xml,
            concat!(
                r#"<w:style w:type="paragraph" w:styleId="Heading{l}"><w:name w:val="heading {l}"/>"#,
                r#"<w:basedOn w:val="Normal"/><w:next w:val="Normal"/><w:uiPriority w:val="9"/><w:qFormat/>"#,
                r#"<w:pPr><w:keepNext/><w:keepLines/><w:spacing w:before="240" w:after="0"/><w:outlineLvl w:val="{o}"/></w:pPr>"#,
                r#"<w:rPr><w:rFonts w:ascii="Calibri Light" w:hAnsi="Calibri Light"/><w:color w:val="{c}"/><w:sz w:val="{s}"/><w:szCs w:val="{s}"/></w:rPr></w:style>"#,
            ),
            l = level,
            o = level - 1,
            c = color,
            s = size,
        );
    }

    xml.push_str(concat!(
        r#"<w:style w:type="paragraph" w:styleId="TOCHeading"><w:name w:val="TOC Heading"/><w:basedOn w:val="Heading1"/><w:next w:val="Normal"/><w:uiPriority w:val="39"/><w:unhideWhenUsed/><w:qFormat/><w:pPr><w:outlineLvl w:val="9"/></w:pPr></w:style>"#,
        r#"<w:style w:type="table" w:default="1" w:styleId="TableNormal"><w:name w:val="Normal Table"/><w:uiPriority w:val="99"/><w:semiHidden/><w:unhideWhenUsed/>"#,
        r#"<w:tblPr><w:tblInd w:w="0" w:type="dxa"/><w:tblCellMar><w:top w:w="0" w:type="dxa"/><w:left w:w="108" w:type="dxa"/><w:bottom w:w="0" w:type="dxa"/><w:right w:w="108" w:type="dxa"/></w:tblCellMar></w:tblPr></w:style>"#,
        r#"<w:style w:type="table" w:styleId="TableGrid"><w:name w:val="Table Grid"/><w:basedOn w:val="TableNormal"/><w:uiPriority w:val="39"/>"#,
        r#"<w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr><w:tblPr><w:tblBorders>"#,
        r#"<w:top w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:left w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:bottom w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:right w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        r#"<w:insideH w:val="single" w:sz="4" w:space="0" w:color="auto"/><w:insideV w:val="single" w:sz="4" w:space="0" w:color="auto"/>"#,
        "</w:tblBorders></w:tblPr></w:style>",
        r#"<w:style w:type="table" w:styleId="LightList"><w:name w:val="Light List"/><w:basedOn w:val="TableNormal"/><w:uiPriority w:val="61"/>"#,
        r#"<w:pPr><w:spacing w:after="0" w:line="240" w:lineRule="auto"/></w:pPr><w:tblPr><w:tblStyleRowBandSize w:val="1"/><w:tblStyleColBandSize w:val="1"/><w:tblBorders>"#,
        r#"<w:top w:val="single" w:sz="8" w:space="0" w:color="000000"/><w:left w:val="single" w:sz="8" w:space="0" w:color="000000"/>"#,
        r#"<w:bottom w:val="single" w:sz="8" w:space="0" w:color="000000"/><w:right w:val="single" w:sz="8" w:space="0" w:color="000000"/>"#,
        "</w:tblBorders></w:tblPr>",
        r#"<w:tblStylePr w:type="firstRow"><w:pPr><w:spacing w:before="0" w:after="0"/></w:pPr><w:rPr><w:b/><w:bCs/><w:color w:val="FFFFFF"/></w:rPr>"#,
        r#"<w:tcPr><w:shd w:val="clear" w:color="auto" w:fill="000000"/></w:tcPr></w:tblStylePr>"#,
        r#"<w:tblStylePr w:type="band1Horz"><w:tblPr/><w:tcPr><w:tcBorders>"#,
        r#"<w:top w:val="single" w:sz="8" w:space="0" w:color="000000"/><w:bottom w:val="single" w:sz="8" w:space="0" w:color="000000"/>"#,
        "</w:tcBorders></w:tcPr></w:tblStylePr></w:style>",
        "</w:styles>",
    ));
    xml
}

/// Core properties; `creator` is used when the metadata has none.
pub(super) fn core_properties(metadata: &Metadata, creator: &str) -> Result<String> {
    let created = metadata
        .created
        .unwrap_or_else(Utc::now)
        .to_rfc3339_opts(SecondsFormat::Secs, true);
    let creator = metadata.creator.as_deref().unwrap_or(creator);

    let mut xml = String::with_capacity(1024);
    xml.push_str(XML_DECL);
    xml.push_str(concat!(
        r#"<cp:coreProperties xmlns:cp="http://schemas.openxmlformats.org/package/2006/metadata/core-properties" "#,
        r#"xmlns:dc="http://purl.org/dc/elements/1.1/" xmlns:dcterms="http://purl.org/dc/terms/" "#,
        r#"xmlns:dcmitype="http://purl.org/dc/dcmitype/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance">"#,
    ));
    if let Some(ref title) = metadata.title {
        write!(xml, "<dc:title>{}</dc:title>", escape_xml(title))?;
    }
    if let Some(ref subject) = metadata.subject {
        write!(xml, "<dc:subject>{}</dc:subject>", escape_xml(subject))?;
    }
    write!(xml, "<dc:creator>{}</dc:creator>", escape_xml(creator))?;
    if let Some(ref description) = metadata.description {
        write!(xml, "<dc:description>{}</dc:description>", escape_xml(description))?;
    }
    write!(
        xml,
        r#"<dcterms:created xsi:type="dcterms:W3CDTF">{0}</dcterms:created><dcterms:modified xsi:type="dcterms:W3CDTF">{0}</dcterms:modified>"#,
        created
    )?;
    xml.push_str("</cp:coreProperties>");
    Ok(xml)
}

pub(super) fn app_properties() -> String {
    format!(
        concat!(
            "{}",
            r#"<Properties xmlns="http://schemas.openxmlformats.org/officeDocument/2006/extended-properties" "#,
            r#"xmlns:vt="http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes">"#,
            "<Application>techspec {}</Application></Properties>",
        ),
        XML_DECL,
        crate::VERSION
    )
}
