use std::collections::BTreeMap;
use std::io::Write;
use std::path::Path;

use log::debug;

use crate::kernel::error::Result;
use crate::manifest::error::ManifestError;
use crate::manifest::section::ManifestSection;
use crate::manifest::writer::LINE_SEPARATOR;
use crate::storage::StorageProvider;

/// A JAR-style manifest: a main section plus named sub-sections.
///
/// Entries inside a section are written in insertion order, while the
/// sub-sections themselves are always written sorted by name, after the main
/// section.
#[derive(Debug, Clone)]
pub struct Manifest {
    main_section: ManifestSection,
    sub_sections: BTreeMap<String, ManifestSection>,
    line_separator: Option<String>,
}

impl Manifest {
    /// Create a manifest whose main section starts with `Manifest-Version: <version>`
    pub fn new(version: &str) -> Self {
        Self {
            main_section: ManifestSection::new(version),
            sub_sections: BTreeMap::new(),
            line_separator: None,
        }
    }

    /// Use `line_separator` instead of the host default when storing
    pub fn with_line_separator(mut self, line_separator: impl Into<String>) -> Self {
        self.line_separator = Some(line_separator.into());
        self
    }

    pub fn line_separator(&self) -> Option<&str> {
        self.line_separator.as_deref()
    }

    pub fn set_line_separator(&mut self, line_separator: Option<String>) {
        self.line_separator = line_separator;
    }

    pub fn main_section(&self) -> &ManifestSection {
        &self.main_section
    }

    pub fn main_section_mut(&mut self) -> &mut ManifestSection {
        &mut self.main_section
    }

    /// Set an entry of the main section
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.main_section.set(key, value);
        self
    }

    /// Get an entry of the main section
    pub fn get(&self, key: &str) -> Option<&str> {
        self.main_section.get(key)
    }

    /// Look up a named sub-section
    pub fn section(&self, name: &str) -> Option<&ManifestSection> {
        self.sub_sections.get(name)
    }

    /// Get a named sub-section, creating it (with its `Name` entry) on first use
    pub fn section_mut(&mut self, name: &str) -> &mut ManifestSection {
        self.sub_sections
            .entry(name.to_string())
            .or_insert_with(|| ManifestSection::named(name))
    }

    /// Insert a prepared sub-section, replacing any section with the same name
    pub fn add_section(&mut self, name: impl Into<String>, section: ManifestSection) -> Option<ManifestSection> {
        self.sub_sections.insert(name.into(), section)
    }

    /// Remove a sub-section
    pub fn remove_section(&mut self, name: &str) -> Option<ManifestSection> {
        self.sub_sections.remove(name)
    }

    /// Sub-section names in output order
    pub fn section_names(&self) -> Vec<String> {
        self.sub_sections.keys().cloned().collect()
    }

    /// Pick the separator: explicit argument, then instance default, then host default.
    /// Empty strings count as unset.
    fn effective_separator<'a>(&'a self, line_separator: Option<&'a str>) -> &'a str {
        line_separator
            .filter(|sep| !sep.is_empty())
            .or_else(|| self.line_separator.as_deref().filter(|sep| !sep.is_empty()))
            .unwrap_or(LINE_SEPARATOR)
    }

    /// Serialize the whole manifest to `stream`
    pub fn store<W: Write + ?Sized>(
        &self,
        stream: &mut W,
        line_separator: Option<&str>,
    ) -> std::result::Result<(), ManifestError> {
        let line_separator = self.effective_separator(line_separator);

        self.main_section.store(stream, line_separator)?;
        for section in self.sub_sections.values() {
            section.store(stream, line_separator)?;
        }
        Ok(())
    }

    /// Serialize the whole manifest and return it as bytes
    pub fn get_data(&self, line_separator: Option<&str>) -> std::result::Result<Vec<u8>, ManifestError> {
        let mut buffer = Vec::new();
        self.store(&mut buffer, line_separator)?;
        Ok(buffer)
    }

    /// Serialize the manifest and persist it through `provider`
    pub fn write_to_path(&self, provider: &dyn StorageProvider, path: &Path) -> Result<()> {
        let data = self.get_data(None)?;
        debug!("Writing manifest ({} bytes) to {:?}", data.len(), path);
        provider.write_bytes(path, &data)
    }

    /// Clear and drop every sub-section, then clear the main section
    pub fn clear(&mut self) {
        for section in self.sub_sections.values_mut() {
            section.clear();
        }
        self.sub_sections.clear();
        self.main_section.clear();
    }
}

impl Default for Manifest {
    fn default() -> Self {
        Self::new(crate::kernel::constants::DEFAULT_MANIFEST_VERSION)
    }
}

impl Drop for Manifest {
    fn drop(&mut self) {
        self.clear();
    }
}
