pub mod kernel;
pub mod manifest;
pub mod registry;
pub mod storage;

// Re-export key public types for easier use by the binary
pub use kernel::error::{Error, Result};
pub use manifest::{Manifest, ManifestError, ManifestSection};
pub use registry::{Platform, RegistryError, SuiteMember, TestConfig, TestRegistry};
pub use storage::{ConfigData, ConfigLocator, LocalStorageProvider, StorageProvider};
