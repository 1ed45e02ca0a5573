//! Command implementations for the `dsuite` binary.
//!
//! Each command returns `Ok(true)` on success, `Ok(false)` when it ran but
//! the outcome should produce a failing exit code.
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use dsuite_core::kernel::error::{Error, Result};
use dsuite_core::manifest::Manifest;
use dsuite_core::registry::{Platform, TestRegistry};
use dsuite_core::storage::{ConfigLocator, LocalStorageProvider};
use log::info;

/// Parse `KEY=VALUE`
pub fn parse_attr(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", s))?;
    Ok((key.trim().to_string(), value.to_string()))
}

/// Parse `NAME:KEY=VALUE`
pub fn parse_section_attr(s: &str) -> std::result::Result<(String, String, String), String> {
    let (name, attr) = s
        .split_once(':')
        .ok_or_else(|| format!("expected NAME:KEY=VALUE, got '{}'", s))?;
    let (key, value) = parse_attr(attr)?;
    Ok((name.to_string(), key, value))
}

pub fn resolve(locator: &ConfigLocator, platform: Platform, expression: &str, check: bool) -> Result<bool> {
    let registry = TestRegistry::for_platform(locator, platform)?;
    let datasources = registry.get_datasources(Some(expression))?;
    info!("'{}' resolved to {} datasources", expression, datasources.len());

    let mut stdout = io::stdout().lock();
    for ds in &datasources {
        writeln!(stdout, "{}", ds).map_err(|e| Error::io(e, "write_stdout", PathBuf::from("<stdout>")))?;
    }

    if check {
        let unknown = registry.unknown_datasources(&datasources);
        if !unknown.is_empty() {
            eprintln!("Unknown datasources: {}", unknown.join(", "));
            return Ok(false);
        }
    }
    Ok(true)
}

pub fn list(locator: &ConfigLocator, platform: Platform) -> Result<bool> {
    let registry = TestRegistry::for_platform(locator, platform)?;

    println!("Datasources ({} registry):", platform);
    let names = registry.datasource_names();
    if names.is_empty() {
        println!("  No datasources registered.");
    }
    for name in &names {
        if let Some(info) = registry.get_datasource_info(name) {
            println!("  - {}", info);
            for set in info.logical_tests().iter().chain(info.expression_tests()) {
                println!("      {} [{}] {}", set.config_name, set.tds_name, set.test_path);
            }
        }
    }

    println!("Suites:");
    for suite in registry.suite_names() {
        let members = registry
            .suite_members(&suite)
            .map(|members| members.iter().map(ToString::to_string).collect::<Vec<_>>().join(","))
            .unwrap_or_default();
        let expanded = registry.interpret_ds_list(&members);
        if expanded == members {
            println!("  - {} = {}", suite, members);
        } else {
            println!("  - {} = {} ({})", suite, members, expanded);
        }
    }
    Ok(true)
}

pub fn write_manifest(
    version: &str,
    attrs: &[(String, String)],
    sections: &[(String, String, String)],
    output: Option<&Path>,
) -> Result<bool> {
    let mut manifest = Manifest::new(version);
    for (key, value) in attrs {
        manifest.set(key.as_str(), value.as_str());
    }
    for (name, key, value) in sections {
        manifest.section_mut(name).set(key.as_str(), value.as_str());
    }

    match output {
        Some(path) => {
            let provider = LocalStorageProvider::new(PathBuf::from("."));
            manifest.write_to_path(&provider, path)?;
            info!("Manifest written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            manifest.store(&mut stdout, None)?;
            stdout
                .flush()
                .map_err(|e| Error::io(e, "flush_stdout", PathBuf::from("<stdout>")))?;
        }
    }
    Ok(true)
}
