use crate::registry::error::RegistryError;
use crate::registry::suite::{parse_expression, SuiteMap, SuiteMember};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

fn members(list: &[&str]) -> Vec<SuiteMember> {
    list.iter().map(|s| SuiteMember::parse(s)).collect()
}

#[test]
fn test_parse_expression() {
    assert_eq!(
        parse_expression(" ds1, *,,suite ,"),
        vec![
            SuiteMember::Name("ds1".to_string()),
            SuiteMember::Wildcard,
            SuiteMember::Name("suite".to_string()),
        ]
    );
    assert!(parse_expression("").is_empty());
    assert!(parse_expression(" , ,").is_empty());
}

#[test]
fn test_member_display() {
    assert_eq!(SuiteMember::Wildcard.to_string(), "*");
    assert_eq!(SuiteMember::Name("mysql".to_string()).to_string(), "mysql");
}

#[test]
fn test_nested_suite_expands_in_order() -> Result<(), RegistryError> {
    let mut suites = SuiteMap::new();
    suites.insert("all", members(&["ds1", "ds2"]));
    suites.insert("group", members(&["all", "ds3"]));

    assert_eq!(suites.resolve("group", &[])?, names(&["ds1", "ds2", "ds3"]));
    Ok(())
}

#[test]
fn test_unknown_tokens_pass_through() -> Result<(), RegistryError> {
    let suites = SuiteMap::new();
    assert_eq!(
        suites.resolve("not_registered, also_unknown", &[])?,
        names(&["not_registered", "also_unknown"])
    );
    Ok(())
}

#[test]
fn test_duplicates_are_kept() -> Result<(), RegistryError> {
    let mut suites = SuiteMap::new();
    suites.insert("a", members(&["shared", "x"]));
    suites.insert("b", members(&["shared", "y"]));

    assert_eq!(
        suites.resolve("a,b,shared", &[])?,
        names(&["shared", "x", "shared", "y", "shared"])
    );
    Ok(())
}

#[test]
fn test_wildcard_expands_once_per_occurrence() -> Result<(), RegistryError> {
    let registered = names(&["mysql", "postgres"]);
    let mut suites = SuiteMap::new();
    suites.insert("everything", vec![SuiteMember::Wildcard]);
    suites.insert("twice", members(&["everything", "*"]));

    assert_eq!(suites.resolve("everything", &registered)?, registered);
    assert_eq!(
        suites.resolve("twice", &registered)?,
        names(&["mysql", "postgres", "mysql", "postgres"])
    );
    // Also at the top level
    assert_eq!(suites.resolve("*", &registered)?, registered);
    Ok(())
}

#[test]
fn test_diamond_is_not_a_cycle() -> Result<(), RegistryError> {
    let mut suites = SuiteMap::new();
    suites.insert("base", members(&["ds1"]));
    suites.insert("left", members(&["base"]));
    suites.insert("right", members(&["base"]));
    suites.insert("top", members(&["left", "right"]));

    assert_eq!(suites.resolve("top", &[])?, names(&["ds1", "ds1"]));
    Ok(())
}

#[test]
fn test_cycle_is_reported() {
    let mut suites = SuiteMap::new();
    suites.insert("a", members(&["ds1", "b"]));
    suites.insert("b", members(&["a"]));

    match suites.resolve("a", &[]) {
        Err(RegistryError::CyclicSuiteReference { suite, chain }) => {
            assert_eq!(suite, "a");
            assert_eq!(chain, names(&["a", "b", "a"]));
        }
        other => panic!("expected CyclicSuiteReference, got {:?}", other),
    }
}

#[test]
fn test_self_reference_is_a_cycle() {
    let mut suites = SuiteMap::new();
    suites.insert("bigquery", members(&["bigquery"]));

    let err = suites.resolve("bigquery", &[]).unwrap_err();
    assert!(matches!(err, RegistryError::CyclicSuiteReference { .. }));
    assert_eq!(
        err.to_string(),
        "Suite 'bigquery' references itself through bigquery -> bigquery"
    );
}

#[test]
fn test_suite_map_accessors() {
    let mut suites = SuiteMap::new();
    assert!(suites.is_empty());
    suites.insert("b", members(&["x"]));
    suites.insert("a", vec![]);

    assert_eq!(suites.len(), 2);
    assert!(suites.contains("a"));
    assert_eq!(suites.names(), names(&["a", "b"]));
    assert_eq!(suites.get("b"), Some(&[SuiteMember::Name("x".to_string())][..]));

    suites.clear();
    assert!(suites.is_empty());
}
