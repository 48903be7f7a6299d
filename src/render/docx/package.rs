//! Zip container and content-type registry.

use std::collections::BTreeMap;
use std::io::{Cursor, Write};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use super::escape_xml;
use crate::error::Result;

const CT_RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_XML: &str = "application/xml";

/// Parts of a package waiting to be zipped.
pub(super) struct Package {
    parts: Vec<(String, Vec<u8>)>,
    defaults: BTreeMap<String, String>,
    overrides: BTreeMap<String, String>,
}

impl Package {
    pub(super) fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), CT_RELATIONSHIPS.to_string());
        defaults.insert("xml".to_string(), CT_XML.to_string());
        Self {
            parts: Vec::new(),
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    /// Map a file extension to a content type.
    pub(super) fn add_default(&mut self, extension: &str, content_type: &str) {
        self.defaults
            .insert(extension.to_string(), content_type.to_string());
    }

    /// Map a specific part name (leading `/`) to a content type.
    pub(super) fn add_override(&mut self, part_name: &str, content_type: &str) {
        self.overrides
            .insert(part_name.to_string(), content_type.to_string());
    }

    pub(super) fn add_part(&mut self, name: impl Into<String>, data: Vec<u8>) {
        self.parts.push((name.into(), data));
    }

    fn content_types(&self) -> String {
        let mut xml = String::with_capacity(1024);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push('\n');
        xml.push_str(r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#);
        for (ext, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(ext),
                escape_xml(content_type)
            ));
        }
        for (part, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(part),
                escape_xml(content_type)
            ));
        }
        xml.push_str("</Types>");
        xml
    }

    /// Zip everything, `[Content_Types].xml` first.
    pub(super) fn finish(self) -> Result<Vec<u8>> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

        writer.start_file("[Content_Types].xml", options)?;
        writer.write_all(self.content_types().as_bytes())?;

        for (name, data) in &self.parts {
            writer.start_file(name.as_str(), options)?;
            writer.write_all(data)?;
        }

        let cursor = writer.finish()?;
        Ok(cursor.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_types_xml() {
        let mut package = Package::new();
        package.add_default("png", "image/png");
        package.add_override("/word/document.xml", "application/test");
        let xml = package.content_types();

        assert!(xml.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(xml.contains(r#"<Default Extension="rels""#));
        assert!(xml.contains(r#"<Override PartName="/word/document.xml" ContentType="application/test"/>"#));
    }

    #[test]
    fn test_finish_produces_zip() {
        let mut package = Package::new();
        package.add_part("word/document.xml", b"<w:document/>".to_vec());
        let bytes = package.finish().unwrap();
        assert_eq!(&bytes[..2], b"PK");

        let archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);
    }
}
