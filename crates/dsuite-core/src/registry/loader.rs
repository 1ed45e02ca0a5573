//! Builds a [`TestConfig`] from a sectioned datasource definition.
//!
//! ```toml
//! [Datasource]
//! Name = "bigquery"
//! LogicalQueryFormat = "bool_"
//! CommandLineOverride = ""
//!
//! [StandardTests]
//! LogicalExclusions_Staples = "Filter.Trademark"
//! ExpressionExclusions_Standard = "string.char,dateparse"
//!
//! [LODTests]
//!
//! [NewExpressionTest1]
//! Name = "expression_test_dates."
//! TDS = "cast_calcs.bigquery_sql_dates.tds"
//! Exclusions = "string.ascii"
//! TestPath = "exprtests/standard/"
//! ```
use log::debug;

use crate::registry::error::RegistryError;
use crate::registry::test_config::TestConfig;
use crate::storage::config::{ConfigData, ConfigSection};
use crate::storage::error::StorageSystemError;

pub const DATASOURCE_SECTION: &str = "Datasource";
pub const STANDARD_TESTS_SECTION: &str = "StandardTests";
pub const LOD_TESTS_SECTION: &str = "LODTests";
pub const STAPLES_DATA_TEST_SECTION: &str = "StaplesDataTest";
pub const UNION_TEST_SECTION: &str = "UnionTest";
/// Any section whose name contains this adds an extra expression test
pub const NEW_EXPRESSION_TEST_MARKER: &str = "NewExpressionTest";
/// Any section whose name contains this adds an extra logical test
pub const NEW_LOGICAL_TEST_MARKER: &str = "NewLogicalTest";

const CALCS_TDS: &str = "cast_calcs.";
const STAPLES_TDS: &str = "Staples.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TestGroup {
    Logical,
    Expression,
}

/// A test set read from a section, applied only once the whole section parsed
struct PendingTest {
    group: TestGroup,
    name: String,
    tds: String,
    exclusions: String,
    test_path: String,
}

impl PendingTest {
    fn new(group: TestGroup, name: &str, tds: &str, exclusions: String, test_path: String) -> Self {
        Self {
            group,
            name: name.to_string(),
            tds: tds.to_string(),
            exclusions,
            test_path,
        }
    }
}

type SectionResult = Result<Vec<PendingTest>, StorageSystemError>;

/// Parse one datasource definition.
///
/// The `Datasource` section and its `Name` and `LogicalQueryFormat` keys are
/// required. Optional sections that fail to parse are logged and skipped.
pub fn load_test(config: &ConfigData) -> Result<TestConfig, RegistryError> {
    // Whatever is left here at the end was not recognized
    let mut remaining = config.section_names();

    let datasource = config
        .section(DATASOURCE_SECTION)
        .ok_or_else(|| RegistryError::MissingSection {
            section: DATASOURCE_SECTION.to_string(),
        })?;
    remaining.retain(|s| s != DATASOURCE_SECTION);

    let dsname = required(&datasource, "Name")?;
    let logical_query_format = required(&datasource, "LogicalQueryFormat")?;
    let command_line_override = datasource
        .get_str_or("CommandLineOverride", "")
        .map_err(|source| RegistryError::InvalidSection {
            section: DATASOURCE_SECTION.to_string(),
            source,
        })?;

    let mut test_config = TestConfig::new(&dsname, &logical_query_format, &command_line_override);

    apply_section(config, STANDARD_TESTS_SECTION, &mut remaining, &mut test_config, |s, tc| {
        Ok(vec![
            PendingTest::new(
                TestGroup::Logical,
                "logical.calcs.",
                CALCS_TDS,
                s.get_str_or("LogicalExclusions_Calcs", "")?,
                tc.get_logical_test_path("logicaltests/setup/calcs/setup.*."),
            ),
            PendingTest::new(
                TestGroup::Logical,
                "logical.staples.",
                STAPLES_TDS,
                s.get_str_or("LogicalExclusions_Staples", "")?,
                tc.get_logical_test_path("logicaltests/setup/staples/setup.*."),
            ),
            PendingTest::new(
                TestGroup::Expression,
                "expression.standard.",
                CALCS_TDS,
                s.get_str_or("ExpressionExclusions_Standard", "")?,
                "exprtests/standard/".to_string(),
            ),
        ])
    });

    apply_section(config, LOD_TESTS_SECTION, &mut remaining, &mut test_config, |s, tc| {
        Ok(vec![
            PendingTest::new(
                TestGroup::Logical,
                "logical.lod.",
                STAPLES_TDS,
                s.get_str_or("LogicalExclusions_Staples", "")?,
                tc.get_logical_test_path("logicaltests/setup/lod/setup.*."),
            ),
            PendingTest::new(
                TestGroup::Expression,
                "expression.lod.",
                CALCS_TDS,
                s.get_str_or("ExpressionExclusions_Calcs", "")?,
                "exprtests/lodcalcs/setup.*.txt".to_string(),
            ),
        ])
    });

    apply_section(config, STAPLES_DATA_TEST_SECTION, &mut remaining, &mut test_config, |_, _| {
        Ok(vec![PendingTest::new(
            TestGroup::Expression,
            "expression.staples.",
            STAPLES_TDS,
            String::new(),
            "exprtests/staples/setup.*.txt".to_string(),
        )])
    });

    // Union tests run through the expression runner but use logical test files
    apply_section(config, UNION_TEST_SECTION, &mut remaining, &mut test_config, |_, tc| {
        Ok(vec![PendingTest::new(
            TestGroup::Expression,
            "logical.union.",
            CALCS_TDS,
            String::new(),
            tc.get_logical_test_path("logicaltests/setup/union/setup.*."),
        )])
    });

    for (marker, group) in [
        (NEW_EXPRESSION_TEST_MARKER, TestGroup::Expression),
        (NEW_LOGICAL_TEST_MARKER, TestGroup::Logical),
    ] {
        let matching: Vec<String> = config
            .section_names()
            .into_iter()
            .filter(|name| name.contains(marker))
            .collect();
        for section in matching {
            apply_section(config, &section, &mut remaining, &mut test_config, |s, _| {
                Ok(vec![PendingTest {
                    group,
                    name: s.get_str_or("Name", "")?,
                    tds: s.get_str_or("TDS", "")?,
                    exclusions: s.get_str_or("Exclusions", "")?,
                    test_path: s.get_str_or("TestPath", "")?,
                }])
            });
        }
    }

    if !remaining.is_empty() {
        debug!("Found unparsed sections in the definition of '{}'.", test_config.dsname);
        for section in &remaining {
            debug!("Unparsed section: {}", section);
        }
    }
    test_config.set_unparsed_sections(remaining);

    debug!("{}", test_config);
    Ok(test_config)
}

fn required(section: &ConfigSection<'_>, key: &str) -> Result<String, RegistryError> {
    section
        .get_str(key)
        .map_err(|source| RegistryError::InvalidSection {
            section: section.name().to_string(),
            source,
        })?
        .ok_or_else(|| RegistryError::MissingKey {
            section: section.name().to_string(),
            key: key.to_string(),
        })
}

/// Run `read` against an optional section and add its tests. A section that
/// fails to read is skipped as a whole.
fn apply_section<F>(
    config: &ConfigData,
    name: &str,
    remaining: &mut Vec<String>,
    test_config: &mut TestConfig,
    read: F,
) where
    F: FnOnce(&ConfigSection<'_>, &TestConfig) -> SectionResult,
{
    let Some(section) = config.section(name) else {
        return;
    };
    remaining.retain(|s| s != name);

    match read(&section, test_config) {
        Ok(pending) => {
            for test in pending {
                match test.group {
                    TestGroup::Logical => test_config.add_logical_test(
                        &test.name,
                        &test.tds,
                        &test.exclusions,
                        &test.test_path,
                    ),
                    TestGroup::Expression => test_config.add_expression_test(
                        &test.name,
                        &test.tds,
                        &test.exclusions,
                        &test.test_path,
                    ),
                }
            }
        }
        Err(e) => debug!("Skipping section '{}': {}", name, e),
    }
}
