//! Integration tests for document assembly.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU32, Ordering};

use techspec::error::{Error, Result};
use techspec::{
    AssembleOptions, Assembler, Block, Document, GenerationRequest, SectionContent, SectionSpec,
    TableStyle, TechSpec,
};

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

fn sections(titles: &[&str]) -> Vec<SectionSpec> {
    titles.iter().map(|t| SectionSpec::new(*t)).collect()
}

/// Blocks from the first section heading up to, not including, the attribution.
fn body(doc: &Document) -> &[Block] {
    let start = doc.body_start();
    &doc.blocks[start..doc.blocks.len() - 1]
}

fn scenario() -> Vec<SectionContent> {
    vec![
        SectionContent::new("Overview", "This program lists open sales orders."),
        SectionContent::new("Flow Diagram", "Start -> Read orders -> Print list"),
        SectionContent::new("Data", "| Field | Type |\n|---|---|\n| VBELN | CHAR10 |"),
    ]
}

#[test]
fn test_overview_flow_data_scenario() {
    let doc = Assembler::new(AssembleOptions::default())
        .with_diagram_renderer(png_renderer)
        .build(&scenario(), &sections(&["Overview", "Flow Diagram", "Data"]))
        .unwrap();

    let body = body(&doc);
    assert_eq!(body.len(), 6);

    assert_eq!(body[0].plain_text().as_deref(), Some("1. Overview"));
    assert!(!body[1].is_heading());
    assert_eq!(
        body[1].plain_text().as_deref(),
        Some("This program lists open sales orders.")
    );

    assert_eq!(body[2].plain_text().as_deref(), Some("2. Flow Diagram"));
    match &body[3] {
        Block::Image {
            resource_id,
            width_emu,
            height_emu,
            ..
        } => {
            assert!(doc.get_resource(resource_id).is_some());
            // 4x2 image keeps its aspect ratio
            assert_eq!(*width_emu, 2 * *height_emu);
        }
        other => panic!("expected image, got {:?}", other),
    }

    assert_eq!(body[4].plain_text().as_deref(), Some("3. Data"));
    let table = body[5].as_table().expect("table block");
    assert_eq!(table.style, TableStyle::LightList);
    assert_eq!(table.column_count(), 2);
    let header: Vec<&str> = table.header()[0]
        .cells
        .iter()
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(header, vec!["Field", "Type"]);
    assert_eq!(table.body().len(), 1);
    let row: Vec<&str> = table.body()[0]
        .cells
        .iter()
        .map(|c| c.text.as_str())
        .collect();
    assert_eq!(row, vec!["VBELN", "CHAR10"]);
}

#[test]
fn test_failing_renderer_uses_placeholder() {
    let calls = AtomicU32::new(0);
    let failing = move |_: &str| -> Result<Vec<u8>> {
        calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::Diagram("renderer offline".to_string()))
    };

    let doc = Assembler::new(AssembleOptions::default())
        .with_diagram_renderer(failing)
        .build(&scenario(), &sections(&["Overview", "Flow Diagram", "Data"]))
        .unwrap();

    assert_eq!(doc.image_count(), 0);
    let body = body(&doc);
    assert_eq!(
        body[3].plain_text().as_deref(),
        Some("[Flow diagram not available]")
    );
    assert_eq!(doc.tables().count(), 1);
}

#[test]
fn test_no_renderer_uses_placeholder() {
    let doc = Assembler::new(
        AssembleOptions::default().with_diagram_placeholder("Diagram pending"),
    )
    .build(&scenario(), &sections(&["Flow Diagram"]))
    .unwrap();

    assert_eq!(body(&doc)[1].plain_text().as_deref(), Some("Diagram pending"));
}

#[test]
fn test_distinct_bookmarks_in_index_order() {
    let titles = ["Overview", "Selection Screen", "Processing", "Output", "Errors"];
    let doc = Assembler::new(AssembleOptions::default())
        .build(&[], &sections(&titles))
        .unwrap();

    let index: Vec<&str> = doc.index.iter().map(|e| e.bookmark_id()).collect();
    assert_eq!(index, vec!["sec_1", "sec_2", "sec_3", "sec_4", "sec_5"]);

    let headings: Vec<&str> = doc
        .paragraphs()
        .filter_map(|p| p.bookmark.as_ref())
        .map(|b| b.name.as_str())
        .collect();
    assert_eq!(headings, index);

    let ids: HashSet<u32> = doc.index.iter().map(|e| e.bookmark.id).collect();
    assert_eq!(ids.len(), titles.len());

    let targets: Vec<String> = doc
        .placeholders()
        .into_iter()
        .map(|p| p.bookmark)
        .collect();
    assert_eq!(targets, index);
}

#[test]
fn test_header_only_table_falls_back_to_text() {
    let raw = "| Field | Type |\n|---|---|";
    let results = vec![SectionContent::new("Data", raw)];
    let doc = Assembler::new(AssembleOptions::default())
        .build(&results, &sections(&["Data"]))
        .unwrap();

    assert_eq!(doc.tables().count(), 0);
    assert_eq!(body(&doc)[1].plain_text().as_deref(), Some(raw));
}

#[test]
fn test_mixed_content_keeps_order() {
    let content = "Fields read:\n\n| Field | Type |\n|---|---|\n| MATNR | CHAR18 |\n\nAll fields are mandatory.";
    let results = vec![SectionContent::new("Data", content)];
    let doc = Assembler::new(AssembleOptions::default())
        .build(&results, &sections(&["Data"]))
        .unwrap();

    let body = body(&doc);
    assert_eq!(body.len(), 4);
    assert_eq!(body[1].plain_text().as_deref(), Some("Fields read:"));
    assert!(body[2].as_table().is_some());
    assert_eq!(
        body[3].plain_text().as_deref(),
        Some("All fields are mandatory.")
    );
}

#[test]
fn test_section_without_result_is_heading_only() {
    let results = vec![SectionContent::empty("Overview")];
    let doc = Assembler::new(AssembleOptions::default())
        .build(&results, &sections(&["Overview", "Data"]))
        .unwrap();

    let body = body(&doc);
    assert_eq!(body.len(), 2);
    assert!(body.iter().all(Block::is_heading));
}

#[test]
fn test_request_round_trip_through_builder() {
    let json = r#"{
        "results": [
            {"section_name": "overview", "content": "Short description."},
            {"section_name": "Flow Diagram", "content": "Selection -> Output"}
        ],
        "template_sections": [
            {"title": "Overview", "content": "Describe the report"},
            {"title": "Flow Diagram", "content": "A -> B"}
        ]
    }"#;
    let request = GenerationRequest::from_json(json).unwrap();
    let result = TechSpec::new()
        .with_title("ZSD_OPEN_ORDERS")
        .with_diagram_renderer(png_renderer)
        .build(&request)
        .unwrap();

    let doc = result.document();
    assert_eq!(doc.metadata.title.as_deref(), Some("ZSD_OPEN_ORDERS"));
    assert_eq!(doc.metadata.section_count, 2);
    assert_eq!(doc.image_count(), 1);
    assert!(doc
        .paragraphs()
        .any(|p| p.plain_text() == "Short description."));
}
