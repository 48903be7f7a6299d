//! Resource types for embedded content.

use serde::{Deserialize, Serialize};

use crate::detect::{self, ImageFormat};
use crate::error::Result;

/// An embedded image resource.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    /// Raw binary data
    #[serde(skip_serializing, default)]
    pub data: Vec<u8>,

    /// Detected image format
    pub format: ImageFormat,

    /// Original filename if known
    pub filename: Option<String>,

    /// Width in pixels
    pub width: u32,

    /// Height in pixels
    pub height: u32,
}

impl Resource {
    /// Create an image resource, sniffing the format and pixel size.
    pub fn image(data: Vec<u8>) -> Result<Self> {
        let format = detect::detect_format_from_bytes(&data)?;
        let (width, height) = detect::image_dimensions(&data)?;
        Ok(Self {
            data,
            format,
            filename: None,
            width,
            height,
        })
    }

    /// Set filename.
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// MIME type of the image.
    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    /// Get the size of the resource data in bytes.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Height/width ratio, 0.75 when the image reports a zero width.
    pub fn aspect_ratio(&self) -> f64 {
        if self.width == 0 {
            return 0.75;
        }
        self.height as f64 / self.width as f64
    }

    /// Get a suggested filename based on the resource ID.
    pub fn suggested_filename(&self, id: &str) -> String {
        if let Some(ref filename) = self.filename {
            return filename.clone();
        }
        format!("{}.{}", id, self.extension())
    }

    /// Get the file extension based on the format.
    pub fn extension(&self) -> &'static str {
        self.format.extension()
    }
}
