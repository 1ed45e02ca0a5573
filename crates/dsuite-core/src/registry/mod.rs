//! # Dsuite Core Test Registry
//!
//! Loads datasource test configurations and the suites that group them, and
//! resolves suite expressions such as `standard,extras` into the flat list
//! of datasources to run.
//!
//! - [`TestRegistry`](test_registry::TestRegistry): registered datasources plus suites.
//! - [`load_test`](loader::load_test): one datasource definition to a [`TestConfig`].
//! - [`SuiteMap`](suite::SuiteMap): recursive suite expansion with cycle detection.
//! - [`Platform`](platform::Platform): selects the registry file to load.
pub mod error;
pub mod loader;
pub mod platform;
pub mod suite;
pub mod test_config;
pub mod test_registry;

pub use error::RegistryError;
pub use loader::load_test;
pub use platform::Platform;
pub use suite::{parse_expression, SuiteMap, SuiteMember};
pub use test_config::{TestConfig, TestSet};
pub use test_registry::TestRegistry;

#[cfg(test)]
mod tests;
