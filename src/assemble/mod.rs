//! Document assembly.
//!
//! [`Assembler`] walks the template sections in order and drives a
//! [`DocumentBuilder`] through its states:
//!
//! ```text
//! Init -> HeaderEmitted -> IndexEmitted -> SectionsEmitted(i) -> Finalized
//! ```
//!
//! [`IndexBuilder`] allocates the bookmarks that tie index lines to section
//! headings.

mod assembler;
mod builder;
mod index;
mod options;

pub use assembler::Assembler;
pub use builder::{BuildState, DocumentBuilder};
pub use index::IndexBuilder;
pub use options::{AssembleOptions, DEFAULT_ATTRIBUTION, DEFAULT_TITLE};
