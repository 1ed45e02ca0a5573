use std::fmt;
use std::path::Path;

use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::kernel::constants::{CONFIG_DIR, DEFAULT_SUITE, REGISTRY_DIR, REGISTRY_SECTION, WILDCARD_TOKEN};
use crate::kernel::error::Result;
use crate::registry::error::RegistryError;
use crate::registry::loader::load_test;
use crate::registry::platform::Platform;
use crate::registry::suite::{SuiteMap, SuiteMember};
use crate::registry::test_config::TestConfig;
use crate::storage::config::{ConfigData, ConfigLocator};

/// Datasource test configurations plus the suites that group them
pub struct TestRegistry {
    /// Test configurations by datasource name, in registration order
    dsnames: IndexMap<String, TestConfig>,
    suite_map: SuiteMap,
}

impl fmt::Debug for TestRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TestRegistry")
            .field("datasources", &self.datasource_names())
            .field("suites", &self.suite_map.names())
            .finish()
    }
}

impl TestRegistry {
    /// Create an empty registry with no datasources and no suites
    pub fn new() -> Self {
        Self {
            dsnames: IndexMap::new(),
            suite_map: SuiteMap::new(),
        }
    }

    /// Load every datasource definition, then the registry file `registry_name`
    pub fn load(locator: &ConfigLocator, registry_name: &str) -> Result<Self> {
        let mut registry = Self::new();
        registry.load_datasources(locator)?;
        registry.load_registry_file(locator, registry_name)?;
        info!(
            "Loaded {} datasources and {} suites",
            registry.dsnames.len(),
            registry.suite_map.len()
        );
        Ok(registry)
    }

    /// Load the registry for a specific platform
    pub fn for_platform(locator: &ConfigLocator, platform: Platform) -> Result<Self> {
        Self::load(locator, platform.registry_name())
    }

    /// Register one test configuration per definition file found under the
    /// config directory. Files that fail to parse or lack required keys are
    /// logged and skipped.
    pub fn load_datasources(&mut self, locator: &ConfigLocator) -> Result<()> {
        for file in locator.find_all(Path::new(CONFIG_DIR))? {
            debug!("Reading datasource definition [{}]", file.path.display());

            let config = match locator.load(&file) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Skipping datasource definition {}: {}", file.path.display(), e);
                    continue;
                }
            };

            match load_test(&config) {
                Ok(test_config) => self.add_test(test_config),
                Err(e) => warn!("Skipping datasource definition {}: {}", file.path.display(), e),
            }
        }
        Ok(())
    }

    /// Locate and load the registry file. A missing file falls back to the
    /// default suite; a file that exists but cannot be parsed is an error.
    pub fn load_registry_file(&mut self, locator: &ConfigLocator, registry_name: &str) -> Result<()> {
        match locator.find_one(Path::new(REGISTRY_DIR), registry_name) {
            Some(file) => {
                debug!("Reading registry file [{}]", file.path.display());
                let config = locator.load(&file)?;
                self.load_registry(&config)?;
            }
            None => {
                debug!("No registry file named '{}', using the default suite", registry_name);
                self.add_default_suite();
            }
        }
        Ok(())
    }

    /// Read suite definitions from the `DatasourceRegistry` section of
    /// `config`, or fall back to the default suite if the section is absent.
    pub fn load_registry(&mut self, config: &ConfigData) -> std::result::Result<(), RegistryError> {
        let Some(section) = config.section(REGISTRY_SECTION) else {
            debug!("No '{}' section, using the default suite", REGISTRY_SECTION);
            self.add_default_suite();
            return Ok(());
        };

        for suite_name in section.keys() {
            let tokens = section
                .get_list(suite_name)
                .map_err(|source| RegistryError::InvalidSection {
                    section: REGISTRY_SECTION.to_string(),
                    source,
                })?
                .unwrap_or_default();
            let members = tokens.iter().map(|token| SuiteMember::parse(token)).collect();
            self.suite_map.insert(suite_name, members);
        }
        Ok(())
    }

    fn add_default_suite(&mut self) {
        self.suite_map.insert(DEFAULT_SUITE, vec![SuiteMember::Wildcard]);
    }

    /// Expand the wildcard list `*` into every registered datasource name,
    /// comma-joined; any other list is returned unchanged
    pub fn interpret_ds_list(&self, ds_list: &str) -> String {
        if ds_list == WILDCARD_TOKEN {
            return self.datasource_names().join(",");
        }
        ds_list.to_string()
    }

    /// Register a test configuration. Re-registering a name replaces the
    /// configuration but keeps its original position.
    pub fn add_test(&mut self, test_config: TestConfig) {
        self.dsnames.insert(test_config.dsname.clone(), test_config);
    }

    /// Define or replace a suite
    pub fn add_suite(&mut self, name: &str, members: Vec<SuiteMember>) {
        self.suite_map.insert(name, members);
    }

    pub fn get_datasource_info(&self, dsname: &str) -> Option<&TestConfig> {
        self.dsnames.get(dsname)
    }

    /// Registered datasource names in registration order
    pub fn datasource_names(&self) -> Vec<String> {
        self.dsnames.keys().cloned().collect()
    }

    pub fn suite_names(&self) -> Vec<String> {
        self.suite_map.names()
    }

    pub fn suite_members(&self, suite: &str) -> Option<&[SuiteMember]> {
        self.suite_map.get(suite)
    }

    /// Resolve a comma-separated suite expression into datasource names.
    ///
    /// An empty or absent expression resolves to nothing. Unknown names are
    /// passed through as datasource names; use [`TestRegistry::unknown_datasources`]
    /// to check them.
    pub fn get_datasources(&self, suite: Option<&str>) -> std::result::Result<Vec<String>, RegistryError> {
        match suite {
            Some(expression) if !expression.trim().is_empty() => {
                self.suite_map.resolve(expression, &self.datasource_names())
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Names in `resolved` that have no registered test configuration
    pub fn unknown_datasources(&self, resolved: &[String]) -> Vec<String> {
        resolved
            .iter()
            .filter(|name| !self.dsnames.contains_key(name.as_str()))
            .cloned()
            .collect()
    }
}

impl Default for TestRegistry {
    fn default() -> Self {
        Self::new()
    }
}
