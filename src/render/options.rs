//! Preview rendering options.

/// Options for the Markdown and plain-text previews.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Include the index page (index lines and TOC)
    pub include_index: bool,

    /// Prefix for image paths in output (e.g., "./media/")
    pub image_path_prefix: String,

    /// Maximum heading level (1-6)
    pub max_heading_level: u8,

    /// Include YAML frontmatter with metadata
    pub include_frontmatter: bool,

    /// Keep line breaks inside paragraphs as hard breaks
    pub preserve_line_breaks: bool,

    /// Escape special Markdown characters
    pub escape_special_chars: bool,

    /// Collect statistics during rendering
    pub collect_stats: bool,
}

impl RenderOptions {
    /// Create new render options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Include or skip the index page.
    pub fn with_index(mut self, include: bool) -> Self {
        self.include_index = include;
        self
    }

    /// Set the image path prefix.
    pub fn with_image_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.image_path_prefix = prefix.into();
        self
    }

    /// Set the maximum heading level.
    pub fn with_max_heading(mut self, level: u8) -> Self {
        self.max_heading_level = level.clamp(1, 6);
        self
    }

    /// Enable or disable frontmatter.
    pub fn with_frontmatter(mut self, include: bool) -> Self {
        self.include_frontmatter = include;
        self
    }

    /// Enable or disable line break preservation.
    pub fn with_line_breaks(mut self, preserve: bool) -> Self {
        self.preserve_line_breaks = preserve;
        self
    }

    /// Enable or disable Markdown escaping.
    pub fn with_escaping(mut self, escape: bool) -> Self {
        self.escape_special_chars = escape;
        self
    }

    /// Enable statistics collection during rendering.
    pub fn with_stats(mut self, collect: bool) -> Self {
        self.collect_stats = collect;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_index: true,
            image_path_prefix: String::new(),
            max_heading_level: 6,
            include_frontmatter: false,
            preserve_line_breaks: true,
            escape_special_chars: false,
            collect_stats: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_options_builder() {
        let options = RenderOptions::new()
            .with_frontmatter(true)
            .with_max_heading(9)
            .with_index(false)
            .with_image_prefix("./media/");

        assert!(options.include_frontmatter);
        assert_eq!(options.max_heading_level, 6);
        assert!(!options.include_index);
        assert_eq!(options.image_path_prefix, "./media/");
    }
}
