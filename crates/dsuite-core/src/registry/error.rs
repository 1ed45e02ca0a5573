//! # Dsuite Core Registry Errors
//!
//! Defines [`RegistryError`], raised while loading datasource definitions
//! and registry files or while resolving suite expressions.
use thiserror::Error;

use crate::storage::error::StorageSystemError;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Required section '{section}' is missing")]
    MissingSection { section: String },

    #[error("Required key '{key}' is missing from section '{section}'")]
    MissingKey { section: String, key: String },

    #[error("Section '{section}' could not be read: {source}")]
    InvalidSection {
        section: String,
        #[source]
        source: StorageSystemError,
    },

    #[error("Suite '{suite}' references itself through {}", .chain.join(" -> "))]
    CyclicSuiteReference { suite: String, chain: Vec<String> },

    #[error("Unknown platform '{0}', expected one of: windows, mac, linux")]
    UnknownPlatform(String),
}
