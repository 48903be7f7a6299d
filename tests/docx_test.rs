//! Integration tests for the .docx package writer.

use std::io::{Cursor, Read};

use techspec::error::Result;
use techspec::render::{self, DocxOptions};
use techspec::{AssembleOptions, Assembler, Document, SectionContent, SectionSpec, TechSpec};
use zip::ZipArchive;

/// A valid 4x2 transparent PNG.
const PNG_4X2: &[u8] = &[
    0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44, 0x52,
    0x00, 0x00, 0x00, 0x04, 0x00, 0x00, 0x00, 0x02, 0x08, 0x06, 0x00, 0x00, 0x00, 0x7F, 0xA8, 0x7D,
    0x63, 0x00, 0x00, 0x00, 0x0B, 0x49, 0x44, 0x41, 0x54, 0x78, 0xDA, 0x63, 0x60, 0x20, 0x04, 0x00,
    0x00, 0x22, 0x00, 0x01, 0xCD, 0x1C, 0x56, 0x3C, 0x00, 0x00, 0x00, 0x00, 0x49, 0x45, 0x4E, 0x44,
    0xAE, 0x42, 0x60, 0x82,
];

fn png_renderer(_flow: &str) -> Result<Vec<u8>> {
    Ok(PNG_4X2.to_vec())
}

fn build() -> Document {
    let results = vec![
        SectionContent::new("Overview", "Lists open orders & deliveries."),
        SectionContent::new("Flow Diagram", "Selection -> Read -> Output"),
        SectionContent::new("Data", "| Field | Type |\n|---|---|\n| VBELN | CHAR10 |"),
    ];
    let sections: Vec<SectionSpec> = ["Overview", "Flow Diagram", "Data"]
        .iter()
        .map(|t| SectionSpec::new(*t))
        .collect();
    Assembler::new(AssembleOptions::default())
        .with_diagram_renderer(png_renderer)
        .build(&results, &sections)
        .unwrap()
}

fn read_part(bytes: &[u8], name: &str) -> String {
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut part = archive.by_name(name).unwrap();
    let mut xml = String::new();
    part.read_to_string(&mut xml).unwrap();
    xml
}

#[test]
fn test_document_xml_contents() {
    let bytes = render::to_docx(&build(), &DocxOptions::default()).unwrap();
    let xml = read_part(&bytes, "word/document.xml");

    for n in 1..=3 {
        assert!(xml.contains(&format!(
            r#"<w:instrText xml:space="preserve"> PAGEREF sec_{} \h </w:instrText>"#,
            n
        )));
        assert!(xml.contains(&format!(
            r#"<w:bookmarkStart w:id="{n}" w:name="sec_{n}"/>"#,
            n = n
        )));
    }
    assert!(xml.contains("TOC \\o"));
    assert!(xml.contains(r#"<w:tblStyle w:val="LightList"/>"#));
    assert!(xml.contains(r#"<a:blip r:embed="rId3"/>"#));
    assert!(xml.contains("Lists open orders &amp; deliveries."));
    assert!(xml.contains(r#"<w:t xml:space="preserve">1. Overview</w:t>"#));
    assert!(xml.contains("Document generated by AI-powered ABAP Tech Spec Assistant."));
}

#[test]
fn test_package_parts() {
    let bytes = render::to_docx(&build(), &DocxOptions::default()).unwrap();
    let archive = ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
    let names: Vec<&str> = archive.file_names().collect();

    for part in [
        "[Content_Types].xml",
        "_rels/.rels",
        "word/document.xml",
        "word/_rels/document.xml.rels",
        "word/styles.xml",
        "word/settings.xml",
        "word/media/image1.png",
        "docProps/core.xml",
        "docProps/app.xml",
    ] {
        assert!(names.contains(&part), "missing part {}", part);
    }

    let content_types = read_part(&bytes, "[Content_Types].xml");
    assert!(content_types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));

    let rels = read_part(&bytes, "word/_rels/document.xml.rels");
    assert!(rels.contains(r#"Target="media/image1.png""#));

    let settings = read_part(&bytes, "word/settings.xml");
    assert!(settings.contains(r#"<w:updateFields w:val="true"/>"#));

    let core = read_part(&bytes, "docProps/core.xml");
    assert!(core.contains("Technical Specification Document"));
}

#[test]
fn test_embedded_image_bytes_unchanged() {
    let bytes = render::to_docx(&build(), &DocxOptions::default()).unwrap();
    let mut archive = ZipArchive::new(Cursor::new(bytes)).unwrap();
    let mut media = archive.by_name("word/media/image1.png").unwrap();
    let mut data = Vec::new();
    media.read_to_end(&mut data).unwrap();
    assert_eq!(data, PNG_4X2);
}

#[test]
fn test_update_fields_disabled() {
    let options = DocxOptions::default().with_update_fields(false);
    let bytes = render::to_docx(&build(), &options).unwrap();
    let settings = read_part(&bytes, "word/settings.xml");
    assert!(!settings.contains("updateFields"));
}

#[test]
fn test_save_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(render::DEFAULT_FILE_NAME);

    let request = techspec::GenerationRequest {
        results: vec![SectionContent::new("Overview", "Text")],
        template_sections: vec![techspec::TemplateSection {
            title: "Overview".to_string(),
            content: String::new(),
        }],
    };
    TechSpec::new()
        .with_creator("integration test")
        .build(&request)
        .unwrap()
        .save(&path)
        .unwrap();

    let bytes = std::fs::read(&path).unwrap();
    let core = read_part(&bytes, "docProps/core.xml");
    assert!(core.contains("integration test"));
}
