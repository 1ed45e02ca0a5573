use std::collections::HashMap;
use std::fmt;

use crate::kernel::constants::{TOKEN_SEPARATOR, WILDCARD_TOKEN};
use crate::registry::error::RegistryError;

/// One element of a suite definition or suite expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SuiteMember {
    /// `*`: every registered datasource, in registration order
    Wildcard,
    /// A suite name if one is defined under it, a datasource name otherwise
    Name(String),
}

impl SuiteMember {
    /// Parse one token. The caller is expected to have trimmed it.
    pub fn parse(token: &str) -> Self {
        if token == WILDCARD_TOKEN {
            SuiteMember::Wildcard
        } else {
            SuiteMember::Name(token.to_string())
        }
    }
}

impl fmt::Display for SuiteMember {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SuiteMember::Wildcard => f.write_str(WILDCARD_TOKEN),
            SuiteMember::Name(name) => f.write_str(name),
        }
    }
}

/// Split a comma-separated expression into members, dropping empty tokens
pub fn parse_expression(expression: &str) -> Vec<SuiteMember> {
    expression
        .split(TOKEN_SEPARATOR)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(SuiteMember::parse)
        .collect()
}

/// Named suites and the members each one expands to
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SuiteMap {
    suites: HashMap<String, Vec<SuiteMember>>,
}

impl SuiteMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Define or replace a suite
    pub fn insert(&mut self, name: impl Into<String>, members: Vec<SuiteMember>) -> Option<Vec<SuiteMember>> {
        self.suites.insert(name.into(), members)
    }

    pub fn get(&self, name: &str) -> Option<&[SuiteMember]> {
        self.suites.get(name).map(Vec::as_slice)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.suites.contains_key(name)
    }

    /// Suite names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.suites.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.suites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.suites.is_empty()
    }

    pub fn clear(&mut self) {
        self.suites.clear();
    }

    /// Expand `expression` into datasource names, depth first and left to
    /// right. `datasources` is what the wildcard stands for. Duplicates are
    /// kept. A suite that is reached again while it is still being expanded
    /// is reported as a cycle.
    pub fn resolve(&self, expression: &str, datasources: &[String]) -> Result<Vec<String>, RegistryError> {
        let mut resolved = Vec::new();
        let mut chain = Vec::new();
        self.expand(&parse_expression(expression), datasources, &mut chain, &mut resolved)?;
        Ok(resolved)
    }

    fn expand(
        &self,
        members: &[SuiteMember],
        datasources: &[String],
        chain: &mut Vec<String>,
        resolved: &mut Vec<String>,
    ) -> Result<(), RegistryError> {
        for member in members {
            match member {
                SuiteMember::Wildcard => resolved.extend(datasources.iter().cloned()),
                SuiteMember::Name(name) => match self.suites.get(name) {
                    Some(nested) => {
                        if chain.contains(name) {
                            let mut cycle = chain.clone();
                            cycle.push(name.clone());
                            return Err(RegistryError::CyclicSuiteReference {
                                suite: name.clone(),
                                chain: cycle,
                            });
                        }
                        chain.push(name.clone());
                        self.expand(nested, datasources, chain, resolved)?;
                        chain.pop();
                    }
                    None => resolved.push(name.clone()),
                },
            }
        }
        Ok(())
    }
}
