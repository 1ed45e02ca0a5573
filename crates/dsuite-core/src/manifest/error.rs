//! # Dsuite Core Manifest Errors
//!
//! Defines [`ManifestError`], the error type returned while serializing a
//! manifest. Key-length violations are not recoverable locally and are meant
//! to propagate to whoever asked for the manifest bytes.
use thiserror::Error;

use crate::manifest::writer::MAX_KEY_LENGTH;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("bad key length: '{key}' is {} bytes, expected 1..={max}", .key.len(), max = MAX_KEY_LENGTH)]
    BadKeyLength { key: String },

    #[error("I/O error while writing manifest: {0}")]
    Io(#[from] std::io::Error),
}
