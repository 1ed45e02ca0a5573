use std::fmt;
use std::str::FromStr;

use crate::registry::error::RegistryError;

/// Host platforms with their own registry file. Registries differ only in
/// which file they load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Mac,
    Linux,
}

impl Platform {
    /// Registry file name (without extension) for this platform
    pub fn registry_name(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Mac => "mac",
            Platform::Linux => "linux",
        }
    }

    /// Platform of the running build
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Mac
        } else {
            Platform::Linux
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.registry_name())
    }
}

impl FromStr for Platform {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" => Ok(Platform::Windows),
            "mac" | "macos" => Ok(Platform::Mac),
            "linux" => Ok(Platform::Linux),
            _ => Err(RegistryError::UnknownPlatform(s.to_string())),
        }
    }
}
