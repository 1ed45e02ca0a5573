//! # Dsuite Core Storage
//!
//! File access and configuration loading for the registry and the manifest
//! writer: the [`StorageProvider`] abstraction with its local filesystem
//! implementation, configuration formats and documents, and local-first
//! configuration lookup.
pub mod config;
pub mod error;
pub mod local;
pub mod provider;

/// Re-export key types
pub use config::{ConfigData, ConfigFile, ConfigFormat, ConfigLocator, ConfigScope, ConfigSection};
pub use error::StorageSystemError;
pub use local::LocalStorageProvider;
pub use provider::StorageProvider;

// Test module declaration
#[cfg(test)]
mod tests;
