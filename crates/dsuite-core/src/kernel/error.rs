//! # Dsuite Core Kernel Errors
//!
//! Defines the crate-wide [`Error`] type and the [`Result`] alias.
//!
//! Each subsystem owns a typed error enum ([`ManifestError`],
//! [`RegistryError`], [`StorageSystemError`]); this module folds them into a
//! single enum so callers that touch several subsystems can use `?` freely.
use std::path::PathBuf;
use std::result::Result as StdResult;

use crate::manifest::error::ManifestError;
use crate::registry::error::RegistryError;
use crate::storage::error::StorageSystemError;
use thiserror::Error as ThisError;

/// Custom error type for the dsuite core library
#[derive(Debug, ThisError)]
pub enum Error {
    /// Manifest serialization error
    #[error("Manifest error: {0}")]
    Manifest(#[from] ManifestError),

    /// Test registry or suite resolution error
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// Storage and configuration error
    #[error("Storage system error: {0}")]
    StorageSystem(#[from] StorageSystemError),

    /// Generic error with message
    #[error("Error: {0}")]
    Other(String),
}

/// Shorthand for Result with our Error type
pub type Result<T> = StdResult<T, Error>;

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::Other(msg.to_string())
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::Other(msg)
    }
}

// Helper to create an Io error with context, wraps StorageSystemError::Io
impl Error {
    pub fn io(source: std::io::Error, operation: impl Into<String>, path: PathBuf) -> Self {
        Error::StorageSystem(StorageSystemError::io(source, operation, path))
    }
}
