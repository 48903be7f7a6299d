//! Parsing of loosely structured section text.
//!
//! Section content arrives as markdown-like text from an upstream writer.
//! Nothing here fails: input without recognisable structure degrades to
//! plain text.

pub mod flow;
pub mod markdown_table;
pub mod segment;

pub use flow::{extract_flow_line, flow_nodes};
pub use markdown_table::{classify_table, parse_markdown_table, ParsedTable, TableParse};
pub use segment::{segment, Chunk, Segments};
