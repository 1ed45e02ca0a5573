/// Application name
pub const APP_NAME: &str = "dsuite";

/// Directory (relative to a config root) holding datasource definitions
pub const CONFIG_DIR: &str = "config";

/// Directory (relative to a config root) holding platform registry files
pub const REGISTRY_DIR: &str = "config/registry";

/// Section of a registry file that maps suite names to member lists
pub const REGISTRY_SECTION: &str = "DatasourceRegistry";

/// Suite created when no registry file or section is available
pub const DEFAULT_SUITE: &str = "all";

/// Member token that stands for every registered datasource
pub const WILDCARD_TOKEN: &str = "*";

/// Separator between tokens in suite expressions and member lists
pub const TOKEN_SEPARATOR: char = ',';

/// Default manifest version written by the CLI
pub const DEFAULT_MANIFEST_VERSION: &str = "1.0";
