use std::io::Write;

use crate::manifest::error::ManifestError;
use crate::manifest::writer::{write_key_val, LINE_SEPARATOR};

/// Primary key of the main manifest section
pub const VERSION_KEY: &str = "Manifest-Version";

/// Primary key of a named sub-section
pub const NAME_KEY: &str = "Name";

/// One block of `key: value` entries terminated by a blank line.
///
/// Entries are kept as an ordered list because serialization order is part
/// of the output format. The primary entry is simply the first one inserted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManifestSection {
    entries: Vec<(String, String)>,
}

impl ManifestSection {
    /// Create a main section whose first entry is `Manifest-Version`
    pub fn new(version: &str) -> Self {
        Self::with_primary(VERSION_KEY, version)
    }

    /// Create a sub-section whose first entry is `Name`
    pub fn named(name: &str) -> Self {
        Self::with_primary(NAME_KEY, name)
    }

    /// Create a section starting with an arbitrary primary entry
    pub fn with_primary(key: &str, value: &str) -> Self {
        Self {
            entries: vec![(key.to_string(), value.to_string())],
        }
    }

    /// Add an entry, or overwrite it in place if the key is already present
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
        self
    }

    /// Get the value stored under `key`
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Remove an entry, returning its value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    /// Iterate over entries in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Write every entry in insertion order followed by a blank line
    pub fn store<W: Write + ?Sized>(
        &self,
        stream: &mut W,
        line_separator: &str,
    ) -> Result<(), ManifestError> {
        for (key, value) in &self.entries {
            write_key_val(stream, key, value, line_separator)?;
        }
        stream.write_all(line_separator.as_bytes())?;
        Ok(())
    }

    /// Serialize just this section
    pub fn get_data(&self, line_separator: Option<&str>) -> Result<Vec<u8>, ManifestError> {
        let mut buffer = Vec::new();
        self.store(&mut buffer, line_separator.unwrap_or(LINE_SEPARATOR))?;
        Ok(buffer)
    }

    /// Remove every entry, the primary one included
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
