//! # Dsuite Core Kernel
//!
//! Crate-wide plumbing shared by the manifest writer and the test registry:
//!
//! - **Error Handling**: the unified [`Error`](error::Error) type and the
//!   `Result` alias in the `error` submodule.
//! - **Core Constants**: directory names, section names and reserved tokens
//!   in the `constants` submodule.
pub mod constants;
pub mod error;

pub use error::{Error, Result};
