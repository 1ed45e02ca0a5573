use std::fmt;

/// One group of tests to run against a datasource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestSet {
    /// Name prefix joined with the datasource name, e.g. `logical.calcs.postgres`
    pub config_name: String,
    /// Datasource (TDS) file the tests run against
    pub tds_name: String,
    /// Raw comma-separated exclusion patterns
    pub exclusions: String,
    /// Test file path or glob pattern
    pub test_path: String,
}

impl TestSet {
    pub fn new(dsname: &str, name: &str, tds: &str, exclusions: &str, test_path: &str) -> Self {
        Self {
            config_name: build_config_name(name, dsname),
            tds_name: build_tds_name(tds, dsname),
            exclusions: exclusions.to_string(),
            test_path: test_path.to_string(),
        }
    }

    /// Exclusion patterns split on commas, trimmed, empties dropped
    pub fn exclusion_list(&self) -> Vec<&str> {
        self.exclusions
            .split(',')
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .collect()
    }
}

/// `logical.calcs.` + `postgres` -> `logical.calcs.postgres`
pub fn build_config_name(prefix: &str, dsname: &str) -> String {
    format!("{}{}", prefix, dsname)
}

/// `cast_calcs.` + `postgres` -> `cast_calcs.postgres.tds`. Complete file
/// names (ending in `.tds`) and empty values are kept as given.
pub fn build_tds_name(tds: &str, dsname: &str) -> String {
    if tds.is_empty() || tds.ends_with(".tds") {
        tds.to_string()
    } else {
        format!("{}{}.tds", tds, dsname)
    }
}

/// Test configuration of a single datasource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TestConfig {
    pub dsname: String,
    pub logical_query_format: String,
    pub command_line_override: String,
    logical_tests: Vec<TestSet>,
    expression_tests: Vec<TestSet>,
    unparsed_sections: Vec<String>,
}

impl TestConfig {
    pub fn new(dsname: &str, logical_query_format: &str, command_line_override: &str) -> Self {
        Self {
            dsname: dsname.to_string(),
            logical_query_format: logical_query_format.to_string(),
            command_line_override: command_line_override.to_string(),
            logical_tests: Vec::new(),
            expression_tests: Vec::new(),
            unparsed_sections: Vec::new(),
        }
    }

    pub fn add_logical_test(&mut self, name: &str, tds: &str, exclusions: &str, test_path: &str) {
        let set = TestSet::new(&self.dsname, name, tds, exclusions, test_path);
        self.logical_tests.push(set);
    }

    pub fn add_expression_test(&mut self, name: &str, tds: &str, exclusions: &str, test_path: &str) {
        let set = TestSet::new(&self.dsname, name, tds, exclusions, test_path);
        self.expression_tests.push(set);
    }

    /// Logical test files are stored per query format:
    /// `logicaltests/setup/calcs/setup.*.` -> `logicaltests/setup/calcs/setup.*.<format>.xml`
    pub fn get_logical_test_path(&self, path: &str) -> String {
        format!("{}{}.xml", path, self.logical_query_format)
    }

    pub fn logical_tests(&self) -> &[TestSet] {
        &self.logical_tests
    }

    pub fn expression_tests(&self) -> &[TestSet] {
        &self.expression_tests
    }

    /// Sections of the definition file that no loader rule consumed
    pub fn unparsed_sections(&self) -> &[String] {
        &self.unparsed_sections
    }

    pub(crate) fn set_unparsed_sections(&mut self, sections: Vec<String>) {
        self.unparsed_sections = sections;
    }
}

impl fmt::Display for TestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "TestConfig({}, format={}, logical={}, expression={}",
            self.dsname,
            self.logical_query_format,
            self.logical_tests.len(),
            self.expression_tests.len()
        )?;
        if !self.command_line_override.is_empty() {
            write!(f, ", override='{}'", self.command_line_override)?;
        }
        write!(f, ")")
    }
}
