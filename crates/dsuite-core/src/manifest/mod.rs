//! # Dsuite Core Manifest Writer
//!
//! Serializes ordered key/value sections into the JAR manifest text layout:
//! lines of at most 72 bytes including the terminator, continuation lines
//! introduced by a single space, a blank line after each section, and named
//! sub-sections written in sorted order after the main section.
//!
//! - [`write_key_val`](writer::write_key_val): the line-wrapping primitive.
//! - [`ManifestSection`](section::ManifestSection): one ordered section.
//! - [`Manifest`](document::Manifest): the main section plus sub-sections.
pub mod document;
pub mod error;
pub mod section;
pub mod writer;

pub use document::Manifest;
pub use error::ManifestError;
pub use section::{ManifestSection, NAME_KEY, VERSION_KEY};
pub use writer::{write_key_val, LINE_SEPARATOR, MANIFEST_LINE_LENGTH, MAX_KEY_LENGTH};

#[cfg(test)]
mod tests;
