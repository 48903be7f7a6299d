//! Rendering an assembled document to output formats.
//!
//! [`docx`] writes the word-processing package; the Markdown, text and JSON
//! renderers are previews of the same model.

pub mod docx;
mod json;
mod markdown;
mod options;
mod result;
mod text;

pub use docx::{to_docx, write_docx, DocxOptions, DEFAULT_FILE_NAME};
pub use json::{to_json, JsonFormat};
pub use markdown::{to_markdown, to_markdown_with_stats, MarkdownRenderer};
pub use options::RenderOptions;
pub use result::{DocumentStats, RenderResult};
pub use text::to_text;
