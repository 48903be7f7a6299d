//! Image format detection for embedded diagram data.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::io::Cursor;

/// Image formats that can be embedded in the package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// Portable Network Graphics
    Png,
    /// JPEG
    Jpeg,
    /// Graphics Interchange Format
    Gif,
    /// Windows bitmap
    Bmp,
    /// Tagged Image File Format
    Tiff,
}

impl ImageFormat {
    /// MIME type of the format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Gif => "image/gif",
            ImageFormat::Bmp => "image/bmp",
            ImageFormat::Tiff => "image/tiff",
        }
    }

    /// File extension used for package part names.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg => "jpeg",
            ImageFormat::Gif => "gif",
            ImageFormat::Bmp => "bmp",
            ImageFormat::Tiff => "tiff",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.extension().to_uppercase())
    }
}

/// Detect image format from magic bytes.
///
/// # Returns
/// * `Ok(ImageFormat)` if the data starts with a supported image signature
/// * `Err(Error::Image)` for unknown or unsupported formats
pub fn detect_format_from_bytes(data: &[u8]) -> Result<ImageFormat> {
    match image::guess_format(data)? {
        image::ImageFormat::Png => Ok(ImageFormat::Png),
        image::ImageFormat::Jpeg => Ok(ImageFormat::Jpeg),
        image::ImageFormat::Gif => Ok(ImageFormat::Gif),
        image::ImageFormat::Bmp => Ok(ImageFormat::Bmp),
        image::ImageFormat::Tiff => Ok(ImageFormat::Tiff),
        other => Err(Error::Image(format!(
            "{:?} images cannot be embedded",
            other
        ))),
    }
}

/// Read pixel dimensions (width, height) from encoded image data.
pub fn image_dimensions(data: &[u8]) -> Result<(u32, u32)> {
    let reader = image::ImageReader::new(Cursor::new(data)).with_guessed_format()?;
    Ok(reader.into_dimensions()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::testdata::PNG_4X2;

    #[test]
    fn test_detect_png() {
        assert_eq!(detect_format_from_bytes(PNG_4X2).unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    }

    #[test]
    fn test_detect_jpeg() {
        let data = [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46];
        assert_eq!(detect_format_from_bytes(&data).unwrap(), ImageFormat::Jpeg);
    }

    #[test]
    fn test_detect_tiff_and_bmp() {
        let tiff = [0x49, 0x49, 0x2A, 0x00, 0x08, 0x00, 0x00, 0x00];
        assert_eq!(detect_format_from_bytes(&tiff).unwrap(), ImageFormat::Tiff);
        assert_eq!(
            detect_format_from_bytes(b"BM\x3A\x00\x00\x00\x00\x00").unwrap(),
            ImageFormat::Bmp
        );
    }

    #[test]
    fn test_detect_gif() {
        assert_eq!(
            detect_format_from_bytes(b"GIF89a\x01\x00\x01\x00").unwrap(),
            ImageFormat::Gif
        );
    }

    #[test]
    fn test_detect_invalid_format() {
        let result = detect_format_from_bytes(b"<svg xmlns=\"http://www.w3.org/2000/svg\"/>");
        assert!(matches!(result, Err(Error::Image(_))));
    }

    #[test]
    fn test_detect_empty() {
        assert!(matches!(detect_format_from_bytes(b""), Err(Error::Image(_))));
    }

    #[test]
    fn test_detect_unsupported_format() {
        let webp = b"RIFF\x24\x00\x00\x00WEBPVP8 ";
        assert!(matches!(detect_format_from_bytes(webp), Err(Error::Image(_))));
    }

    #[test]
    fn test_png_dimensions() {
        assert_eq!(image_dimensions(PNG_4X2).unwrap(), (4, 2));
    }
}
