//! OOXML word-processing package (`.docx`) output.
//!
//! The package holds the main document part, styles, settings, document
//! properties and one media part per embedded image. Page references are
//! written as complex fields with their placeholder result; with
//! [`DocxOptions::update_fields_on_open`] the settings part asks the word
//! processor to refresh them when the file is opened.

mod body;
mod package;
mod parts;

use std::path::Path;

use crate::error::Result;
use crate::model::Document;

use package::Package;

/// Default file name for the generated document.
pub const DEFAULT_FILE_NAME: &str = "Technical Specification Document.docx";

/// Options for writing a `.docx` package.
#[derive(Debug, Clone)]
pub struct DocxOptions {
    /// Ask the word processor to update fields when the file is opened
    pub update_fields_on_open: bool,

    /// Author recorded in the core properties (falls back to metadata)
    pub creator: String,
}

impl DocxOptions {
    /// Create new options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable the update-fields-on-open request.
    pub fn with_update_fields(mut self, update: bool) -> Self {
        self.update_fields_on_open = update;
        self
    }

    /// Set the creator.
    pub fn with_creator(mut self, creator: impl Into<String>) -> Self {
        self.creator = creator.into();
        self
    }
}

impl Default for DocxOptions {
    fn default() -> Self {
        Self {
            update_fields_on_open: true,
            creator: "techspec".to_string(),
        }
    }
}

/// Serialize a document to `.docx` bytes.
pub fn to_docx(doc: &Document, options: &DocxOptions) -> Result<Vec<u8>> {
    let mut package = Package::new();

    // Relationship IDs: rId1 styles, rId2 settings, images from rId3.
    let mut image_rels = Vec::with_capacity(doc.resources.len());
    for (i, (id, resource)) in doc.resources.iter().enumerate() {
        let rel_id = format!("rId{}", i + 3);
        let target = format!("media/{}.{}", id, resource.extension());
        package.add_default(resource.extension(), resource.mime_type());
        package.add_part(format!("word/{}", target), resource.data.clone());
        image_rels.push((id.clone(), rel_id, target));
    }

    let document_xml = body::write_document(doc, &image_rels)?;

    package.add_override("/word/document.xml", parts::CT_DOCUMENT);
    package.add_override("/word/styles.xml", parts::CT_STYLES);
    package.add_override("/word/settings.xml", parts::CT_SETTINGS);
    package.add_override("/docProps/core.xml", parts::CT_CORE);
    package.add_override("/docProps/app.xml", parts::CT_APP);

    package.add_part("_rels/.rels", parts::package_rels().into_bytes());
    package.add_part("word/document.xml", document_xml.into_bytes());
    package.add_part(
        "word/_rels/document.xml.rels",
        parts::document_rels(&image_rels)?.into_bytes(),
    );
    package.add_part("word/styles.xml", parts::styles().into_bytes());
    package.add_part(
        "word/settings.xml",
        parts::settings(options.update_fields_on_open).into_bytes(),
    );
    package.add_part(
        "docProps/core.xml",
        parts::core_properties(&doc.metadata, &options.creator)?.into_bytes(),
    );
    package.add_part("docProps/app.xml", parts::app_properties().into_bytes());

    log::debug!(
        "Writing docx package: {} blocks, {} images",
        doc.block_count(),
        image_rels.len()
    );
    package.finish()
}

/// Write a document to a `.docx` file.
pub fn write_docx<P: AsRef<Path>>(doc: &Document, path: P, options: &DocxOptions) -> Result<()> {
    let bytes = to_docx(doc, options)?;
    std::fs::write(path, bytes)?;
    Ok(())
}

/// Escape XML special characters.
pub(crate) fn escape_xml(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            // Control characters other than tab/newline are not allowed in XML 1.0.
            c if (c as u32) < 0x20 && c != '\t' && c != '\n' && c != '\r' => {}
            c => escaped.push(c),
        }
    }
    escaped
}
