//! Splitting section text into text and table chunks.
//!
//! A table is a run of two or more consecutive lines starting with `|`
//! whose second line is a delimiter row (`|---|:--:|`). Everything else is
//! text. Chunks borrow from the input and are produced lazily.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

/// Delimiter row: pipes, dashes, colons and whitespace, at least one dash or
/// colon.
static DELIMITER_ROW: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\|[\s:|-]*[-:][\s:|-]*$").expect("delimiter row pattern"));

/// A classified span of section text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "content", rename_all = "snake_case")]
pub enum Chunk<'a> {
    /// Plain text, trimmed
    Text(&'a str),

    /// Raw markdown table, trimmed
    Table(&'a str),
}

impl<'a> Chunk<'a> {
    /// The chunk's text.
    pub fn as_str(&self) -> &'a str {
        match self {
            Chunk::Text(s) | Chunk::Table(s) => s,
        }
    }

    /// Check if this chunk is a table.
    pub fn is_table(&self) -> bool {
        matches!(self, Chunk::Table(_))
    }
}

/// Segment section text into chunks.
///
/// `None`, empty and whitespace-only input yield no chunks.
///
/// # Example
///
/// ```
/// use techspec::parser::{segment, Chunk};
///
/// let text = "Intro\n| A | B |\n|---|---|\n| 1 | 2 |\nOutro";
/// let chunks: Vec<Chunk> = segment(text).collect();
/// assert_eq!(
///     chunks,
///     vec![
///         Chunk::Text("Intro"),
///         Chunk::Table("| A | B |\n|---|---|\n| 1 | 2 |"),
///         Chunk::Text("Outro"),
///     ]
/// );
/// ```
pub fn segment<'a>(text: impl Into<Option<&'a str>>) -> Segments<'a> {
    Segments {
        text: text.into().unwrap_or(""),
        pos: 0,
        pending: None,
    }
}

/// Lazy iterator over the chunks of a text. Created by [`segment`].
#[derive(Debug, Clone)]
pub struct Segments<'a> {
    text: &'a str,
    /// Start of the unconsumed input, always at a line boundary
    pos: usize,
    /// Table span found while emitting the text before it
    pending: Option<(usize, usize)>,
}

impl<'a> Iterator for Segments<'a> {
    type Item = Chunk<'a>;

    fn next(&mut self) -> Option<Chunk<'a>> {
        loop {
            if let Some((start, end)) = self.pending.take() {
                self.pos = end;
                return Some(Chunk::Table(self.text[start..end].trim()));
            }

            if self.pos >= self.text.len() {
                return None;
            }

            match find_table(self.text, self.pos) {
                Some((start, end)) => {
                    self.pending = Some((start, end));
                    let before = self.text[self.pos..start].trim();
                    if !before.is_empty() {
                        return Some(Chunk::Text(before));
                    }
                }
                None => {
                    let rest = self.text[self.pos..].trim();
                    self.pos = self.text.len();
                    if rest.is_empty() {
                        return None;
                    }
                    return Some(Chunk::Text(rest));
                }
            }
        }
    }
}

impl std::iter::FusedIterator for Segments<'_> {}

/// A run of consecutive pipe-prefixed lines.
struct Run {
    start: usize,
    end: usize,
    lines: usize,
    delimited: bool,
}

impl Run {
    fn is_table(&self) -> bool {
        self.lines >= 2 && self.delimited
    }
}

/// Byte span of the first table at or after `from`.
fn find_table(text: &str, from: usize) -> Option<(usize, usize)> {
    let mut offset = from;
    let mut run: Option<Run> = None;

    for line in text[from..].split_inclusive('\n') {
        let line_start = offset;
        offset += line.len();

        if is_pipe_line(line) {
            let r = run.get_or_insert(Run {
                start: line_start,
                end: line_start,
                lines: 0,
                delimited: false,
            });
            r.lines += 1;
            if r.lines == 2 {
                r.delimited = is_delimiter_row(line);
            }
            r.end = offset;
        } else if let Some(r) = run.take() {
            if r.is_table() {
                return Some((r.start, r.end));
            }
        }
    }

    run.filter(Run::is_table).map(|r| (r.start, r.end))
}

/// Check if a line starts a table row.
pub(crate) fn is_pipe_line(line: &str) -> bool {
    line.trim_start().starts_with('|')
}

/// Check if a line is a markdown table delimiter row.
pub(crate) fn is_delimiter_row(line: &str) -> bool {
    DELIMITER_ROW.is_match(line.trim())
}
