use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, LazyLock};

use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::kernel::error::Result;
use crate::storage::error::StorageSystemError;
use crate::storage::local::LocalStorageProvider;
use crate::storage::StorageProvider;

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON format (.json)
    Json,
    /// YAML format (.yaml, .yml) - requires "yaml-config" feature
    #[cfg(feature = "yaml-config")]
    Yaml,
    /// TOML format (.toml) - requires "toml-config" feature
    #[cfg(feature = "toml-config")]
    Toml,
}

impl ConfigFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ConfigFormat::Json => "json",
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => "yaml",
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => "toml",
        }
    }

    /// Every extension recognized by [`ConfigFormat::from_path`], in lookup order
    pub fn known_extensions() -> Vec<&'static str> {
        let mut extensions = Vec::new();
        #[cfg(feature = "toml-config")]
        extensions.push("toml");
        #[cfg(feature = "yaml-config")]
        extensions.extend(["yaml", "yml"]);
        extensions.push("json");
        extensions
    }

    /// Determine format from file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "json" => Some(ConfigFormat::Json),
                #[cfg(feature = "yaml-config")]
                "yaml" | "yml" => Some(ConfigFormat::Yaml),
                #[cfg(feature = "toml-config")]
                "toml" => Some(ConfigFormat::Toml),
                _ => None,
            })
    }
}

/// In-memory representation of a configuration document.
///
/// Top-level keys keep their document order. Keys whose value is a table are
/// treated as named sections, which is how datasource and registry files
/// are laid out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigData {
    #[serde(flatten)]
    values: Map<String, Value>,
}

impl ConfigData {
    /// Create a new empty configuration
    pub fn new() -> Self {
        Self { values: Map::new() }
    }

    /// Get a configuration value
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Option<T> {
        self.values
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    /// Get a configuration value with default
    pub fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Set a configuration value
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| StorageSystemError::SerializationError {
            format: "json".to_string(),
            source: Box::new(e),
        })?;
        self.values.insert(key.to_string(), json_value);
        Ok(())
    }

    /// Remove a configuration value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.values.remove(key)
    }

    /// Check if key exists
    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Get all top-level keys in document order
    pub fn keys(&self) -> Vec<String> {
        self.values.keys().cloned().collect()
    }

    /// Merge with another config, overriding existing values
    pub fn merge(&mut self, other: &ConfigData) {
        for (key, value) in &other.values {
            self.values.insert(key.clone(), value.clone());
        }
    }

    /// Names of every top-level table, in document order. A key with a null
    /// value (`LODTests:` in YAML) counts as an empty table.
    pub fn section_names(&self) -> Vec<String> {
        self.values
            .iter()
            .filter(|(_, value)| is_section(value))
            .map(|(key, _)| key.clone())
            .collect()
    }

    /// Check if a section with this name exists
    pub fn has_section(&self, name: &str) -> bool {
        self.values.get(name).is_some_and(is_section)
    }

    /// Borrow a section by name
    pub fn section(&self, name: &str) -> Option<ConfigSection<'_>> {
        match self.values.get_key_value(name) {
            Some((key, Value::Object(values))) => Some(ConfigSection { name: key, values }),
            Some((key, Value::Null)) => Some(ConfigSection {
                name: key,
                values: &EMPTY_SECTION,
            }),
            _ => None,
        }
    }

    /// Serialize to string based on format
    pub fn serialize(&self, format: ConfigFormat) -> Result<String> {
        let serialized = match format {
            ConfigFormat::Json => serde_json::to_string_pretty(&self).map_err(boxed),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::to_string(&self).map_err(boxed),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::to_string_pretty(&self).map_err(boxed),
        };
        serialized.map_err(|source| {
            StorageSystemError::SerializationError {
                format: format.extension().to_string(),
                source,
            }
            .into()
        })
    }

    /// Deserialize from string based on format
    pub fn deserialize(data: &str, format: ConfigFormat) -> Result<Self> {
        let parsed = match format {
            ConfigFormat::Json => serde_json::from_str(data).map_err(boxed),
            #[cfg(feature = "yaml-config")]
            ConfigFormat::Yaml => serde_yaml::from_str(data).map_err(boxed),
            #[cfg(feature = "toml-config")]
            ConfigFormat::Toml => toml::from_str(data).map_err(boxed),
        };
        parsed.map_err(|source| {
            StorageSystemError::DeserializationError {
                format: format.extension().to_string(),
                source,
            }
            .into()
        })
    }
}

static EMPTY_SECTION: LazyLock<Map<String, Value>> = LazyLock::new(Map::new);

fn is_section(value: &Value) -> bool {
    value.is_object() || value.is_null()
}

fn boxed<E: std::error::Error + Send + Sync + 'static>(e: E) -> Box<dyn std::error::Error + Send + Sync> {
    Box::new(e)
}

/// Read-only view of one named table inside a [`ConfigData`]
#[derive(Debug, Clone, Copy)]
pub struct ConfigSection<'a> {
    name: &'a str,
    values: &'a Map<String, Value>,
}

impl<'a> ConfigSection<'a> {
    pub fn name(&self) -> &'a str {
        self.name
    }

    /// Keys of this section in document order
    pub fn keys(&self) -> Vec<&'a str> {
        self.values.keys().map(String::as_str).collect()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Read a value as text. Numbers and booleans are rendered as text;
    /// tables, arrays and nulls are rejected.
    pub fn get_str(&self, key: &str) -> std::result::Result<Option<String>, StorageSystemError> {
        match self.values.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(Value::Number(n)) => Ok(Some(n.to_string())),
            Some(Value::Bool(b)) => Ok(Some(b.to_string())),
            Some(_) => Err(self.invalid(key, "a text value")),
        }
    }

    /// Read a value as text, falling back to `default` when absent
    pub fn get_str_or(&self, key: &str, default: &str) -> std::result::Result<String, StorageSystemError> {
        Ok(self.get_str(key)?.unwrap_or_else(|| default.to_string()))
    }

    /// Read a list of tokens. Accepts a comma-separated string or an array of
    /// strings; surrounding whitespace is trimmed and empty tokens dropped.
    pub fn get_list(&self, key: &str) -> std::result::Result<Option<Vec<String>>, StorageSystemError> {
        let raw: Vec<String> = match self.values.get(key) {
            None => return Ok(None),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.clone()),
                    _ => Err(self.invalid(key, "an array of strings")),
                })
                .collect::<std::result::Result<_, _>>()?,
            Some(_) => match self.get_str(key)? {
                Some(joined) => joined.split(',').map(str::to_string).collect(),
                None => Vec::new(),
            },
        };

        Ok(Some(
            raw.iter()
                .map(|token| token.trim())
                .filter(|token| !token.is_empty())
                .map(str::to_string)
                .collect(),
        ))
    }

    fn invalid(&self, key: &str, expected: &str) -> StorageSystemError {
        StorageSystemError::InvalidValue {
            section: self.name.to_string(),
            key: key.to_string(),
            expected: expected.to_string(),
        }
    }
}

/// Which configuration root a file was found in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigScope {
    /// Configuration shipped with the application
    Default,
    /// Local configuration (overrides default)
    Local,
}

/// A configuration file located by [`ConfigLocator`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    pub scope: ConfigScope,
    /// Path relative to the root of `scope`
    pub path: PathBuf,
}

/// Local-first lookup of configuration files across two roots.
///
/// A file in the local root shadows a file with the same name in the
/// default root.
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    local: Arc<dyn StorageProvider>,
    default: Arc<dyn StorageProvider>,
}

impl ConfigLocator {
    /// Create a locator over two storage providers
    pub fn new(local: Arc<dyn StorageProvider>, default: Arc<dyn StorageProvider>) -> Self {
        Self { local, default }
    }

    /// Create a locator over two local directories
    pub fn from_roots(local_root: PathBuf, default_root: PathBuf) -> Self {
        Self::new(
            Arc::new(LocalStorageProvider::new(local_root)),
            Arc::new(LocalStorageProvider::new(default_root)),
        )
    }

    /// Get the provider backing a scope
    pub fn provider(&self, scope: ConfigScope) -> &dyn StorageProvider {
        match scope {
            ConfigScope::Default => self.default.as_ref(),
            ConfigScope::Local => self.local.as_ref(),
        }
    }

    /// List every configuration file directly inside `dir`, local files
    /// shadowing default files of the same name. Sorted by file name.
    pub fn find_all(&self, dir: &Path) -> Result<Vec<ConfigFile>> {
        let mut found: BTreeMap<String, ConfigFile> = BTreeMap::new();

        // Default first so local entries overwrite them
        for scope in [ConfigScope::Default, ConfigScope::Local] {
            let provider = self.provider(scope);
            if !provider.is_dir(dir) {
                continue;
            }

            for path in provider.read_dir(dir)? {
                if !provider.is_file(&path) || ConfigFormat::from_path(&path).is_none() {
                    continue;
                }
                if let Some(file_name) = path.file_name().and_then(|n| n.to_str()) {
                    found.insert(file_name.to_string(), ConfigFile { scope, path: path.clone() });
                }
            }
        }

        Ok(found.into_values().collect())
    }

    /// Find a single configuration file named `name` inside `dir`. A name
    /// without an extension is tried with every known extension. The local
    /// root is searched before the default root.
    pub fn find_one(&self, dir: &Path, name: &str) -> Option<ConfigFile> {
        let candidates: Vec<PathBuf> = if Path::new(name).extension().is_some() {
            vec![dir.join(name)]
        } else {
            ConfigFormat::known_extensions()
                .into_iter()
                .map(|ext| dir.join(format!("{}.{}", name, ext)))
                .collect()
        };

        for scope in [ConfigScope::Local, ConfigScope::Default] {
            let provider = self.provider(scope);
            if let Some(path) = candidates.iter().find(|path| provider.is_file(path)) {
                return Some(ConfigFile { scope, path: path.clone() });
            }
        }
        None
    }

    /// Read and parse a located file
    pub fn load(&self, file: &ConfigFile) -> Result<ConfigData> {
        let format = ConfigFormat::from_path(&file.path).ok_or_else(|| {
            StorageSystemError::UnsupportedConfigFormat(file.path.display().to_string())
        })?;

        debug!("Reading {:?} config file [{}]", file.scope, file.path.display());
        let content = self.provider(file.scope).read_to_string(&file.path)?;
        ConfigData::deserialize(&content, format)
    }
}
