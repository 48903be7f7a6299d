//! Assembly options and configuration.

use crate::model::TocField;

/// Default document title.
pub const DEFAULT_TITLE: &str = "Technical Specification Document";

/// Default attribution line appended after the last section.
pub const DEFAULT_ATTRIBUTION: &str = "Document generated by AI-powered ABAP Tech Spec Assistant.";

/// Options controlling document assembly.
#[derive(Debug, Clone)]
pub struct AssembleOptions {
    /// Title heading text
    pub title: String,

    /// Heading above the index lines
    pub index_heading: String,

    /// Closing attribution paragraph (`None` omits it)
    pub attribution: Option<String>,

    /// Section title that triggers diagram handling (compared normalized)
    pub flow_section_title: String,

    /// Paragraph shown when no diagram can be produced
    pub diagram_placeholder: String,

    /// Display width of embedded diagrams, in inches
    pub diagram_width_in: f64,

    /// Right tab stop of index lines, in inches
    pub index_tab_stop_in: f32,

    /// Bookmark name prefix; the ordinal is appended
    pub bookmark_prefix: String,

    /// Cached value shown by page references before pagination
    pub page_placeholder: String,

    /// Native table of contents (`None` omits it)
    pub toc: Option<TocField>,
}

impl AssembleOptions {
    /// Create new assembly options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the document title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the index heading.
    pub fn with_index_heading(mut self, heading: impl Into<String>) -> Self {
        self.index_heading = heading.into();
        self
    }

    /// Set the attribution line.
    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    /// Omit the attribution line.
    pub fn without_attribution(mut self) -> Self {
        self.attribution = None;
        self
    }

    /// Set the title of the diagram section.
    pub fn with_flow_section_title(mut self, title: impl Into<String>) -> Self {
        self.flow_section_title = title.into();
        self
    }

    /// Set the diagram placeholder text.
    pub fn with_diagram_placeholder(mut self, text: impl Into<String>) -> Self {
        self.diagram_placeholder = text.into();
        self
    }

    /// Set the diagram display width in inches.
    pub fn with_diagram_width(mut self, inches: f64) -> Self {
        if inches > 0.0 {
            self.diagram_width_in = inches;
        }
        self
    }

    /// Set the index tab stop in inches.
    pub fn with_index_tab_stop(mut self, inches: f32) -> Self {
        if inches > 0.0 {
            self.index_tab_stop_in = inches;
        }
        self
    }

    /// Set the bookmark prefix.
    pub fn with_bookmark_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.bookmark_prefix = prefix.into();
        self
    }

    /// Set the TOC heading range.
    pub fn with_toc_levels(mut self, start: u8, end: u8) -> Self {
        self.toc = Some(self.toc.unwrap_or_default().with_levels(start, end));
        self
    }

    /// Omit the native table of contents.
    pub fn without_toc(mut self) -> Self {
        self.toc = None;
        self
    }
}

impl Default for AssembleOptions {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            index_heading: "Index".to_string(),
            attribution: Some(DEFAULT_ATTRIBUTION.to_string()),
            flow_section_title: "Flow Diagram".to_string(),
            diagram_placeholder: "[Flow diagram not available]".to_string(),
            diagram_width_in: 5.5,
            index_tab_stop_in: 6.0,
            bookmark_prefix: "sec_".to_string(),
            page_placeholder: "1".to_string(),
            toc: Some(TocField::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = AssembleOptions::default();
        assert_eq!(options.title, DEFAULT_TITLE);
        assert_eq!(options.diagram_width_in, 5.5);
        assert_eq!(options.bookmark_prefix, "sec_");
        assert!(options.toc.is_some());
    }

    #[test]
    fn test_builder() {
        let options = AssembleOptions::new()
            .with_title("ZSD_ORDERS")
            .without_attribution()
            .with_diagram_width(-1.0)
            .with_toc_levels(1, 2)
            .with_bookmark_prefix("ref_");

        assert_eq!(options.title, "ZSD_ORDERS");
        assert!(options.attribution.is_none());
        assert_eq!(options.diagram_width_in, 5.5);
        assert_eq!(options.toc.map(|t| t.end_level), Some(2));
        assert_eq!(options.bookmark_prefix, "ref_");
    }
}
