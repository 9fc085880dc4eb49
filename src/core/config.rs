//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.atlas/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::criteria::{Criteria, SortBy};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AtlasConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub filters: FilterConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct SourceConfig {
    pub endpoint: Option<String>,
    pub data_file: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FilterConfig {
    pub search: Option<String>,
    pub regions: Option<Vec<String>>,
    pub un_member: Option<bool>,
    pub independent: Option<bool>,
    pub sort_by: Option<SortBy>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_ENDPOINT: &str = "https://restcountries.com/v3.1/all";
pub const ENDPOINT_ENV_VAR: &str = "ATLAS_ENDPOINT";

// ============================================================================
// CLI overrides
// ============================================================================

/// Values taken from command-line flags. `None`/empty means "not given".
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub data_file: Option<PathBuf>,
    pub search: Option<String>,
    pub regions: Vec<String>,
    pub un_member: bool,
    pub independent: bool,
    pub sort_by: Option<SortBy>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub endpoint: String,
    /// Local JSON snapshot. When set it replaces the HTTP fetch.
    pub data_file: Option<PathBuf>,
    /// Criteria the session starts with.
    pub criteria: Criteria,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.atlas/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".atlas").join("config.toml"))
}

/// Load config from `~/.atlas/config.toml`.
pub fn load_config() -> Result<AtlasConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(AtlasConfig::default())
        }
    }
}

/// Load config from an explicit path.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `AtlasConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<AtlasConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(AtlasConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: AtlasConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG: &str = r#"# Atlas Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [source]
# endpoint = "https://restcountries.com/v3.1/all"   # Or set ATLAS_ENDPOINT. A URL with a query is used as-is
# data_file = "countries.json"       # Local snapshot, path relative to ~/.atlas/

# [filters]
# search = ""
# regions = ["Europe", "Asia"]       # Americas, Antarctic, Africa, Asia, Europe, Oceania
# un_member = false
# independent = false
# sort_by = "population"             # "name", "population" or "area"
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent()
        && let Err(e) = fs::create_dir_all(parent)
    {
        warn!("Failed to create config directory: {}", e);
        return;
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &AtlasConfig, cli: &CliOverrides) -> ResolvedConfig {
    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| std::env::var(ENDPOINT_ENV_VAR).ok())
        .or_else(|| config.source.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Snapshot file: CLI path as given, config path relative to ~/.atlas/
    let data_file = cli.data_file.clone().or_else(|| {
        config.source.data_file.as_ref().map(|file| {
            let path = PathBuf::from(file);
            if path.is_absolute() {
                path
            } else {
                dirs::home_dir()
                    .map(|h| h.join(".atlas").join(&path))
                    .unwrap_or(path)
            }
        })
    });

    let filters = &config.filters;
    let regions = if cli.regions.is_empty() {
        filters.regions.clone().unwrap_or_default()
    } else {
        cli.regions.clone()
    };

    let criteria = Criteria {
        search: cli
            .search
            .clone()
            .or_else(|| filters.search.clone())
            .unwrap_or_default(),
        selected_regions: regions.into_iter().collect(),
        // A CLI switch can only turn a filter on.
        un_member: cli.un_member || filters.un_member.unwrap_or(false),
        independent: cli.independent || filters.independent.unwrap_or(false),
        sort_by: cli.sort_by.or(filters.sort_by).unwrap_or_default(),
    };

    ResolvedConfig {
        endpoint,
        data_file,
        criteria,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_parses() {
        let config = AtlasConfig::default();
        assert!(config.source.endpoint.is_none());
        assert!(config.filters.sort_by.is_none());
    }

    #[test]
    fn test_generated_default_is_valid_toml() {
        let config: AtlasConfig = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert!(config.source.endpoint.is_none());
        assert!(config.filters.regions.is_none());
    }

    #[test]
    fn test_resolve_uses_defaults_when_empty() {
        let resolved = resolve(&AtlasConfig::default(), &CliOverrides::default());
        assert!(resolved.data_file.is_none());
        assert_eq!(resolved.criteria, Criteria::default());
    }

    #[test]
    fn test_resolve_config_values_override_defaults() {
        let config = AtlasConfig {
            source: SourceConfig {
                endpoint: None,
                data_file: Some("/tmp/countries.json".to_string()),
            },
            filters: FilterConfig {
                search: Some("island".to_string()),
                regions: Some(vec!["Oceania".to_string()]),
                un_member: Some(true),
                independent: None,
                sort_by: Some(SortBy::Area),
            },
        };
        let resolved = resolve(&config, &CliOverrides::default());
        assert_eq!(resolved.data_file, Some(PathBuf::from("/tmp/countries.json")));
        assert_eq!(resolved.criteria.search, "island");
        assert!(resolved.criteria.region_selected("oceania"));
        assert!(resolved.criteria.un_member);
        assert!(!resolved.criteria.independent);
        assert_eq!(resolved.criteria.sort_by, SortBy::Area);
    }

    #[test]
    fn test_resolve_cli_wins() {
        let config = AtlasConfig {
            source: SourceConfig {
                endpoint: Some("http://config.example/all".to_string()),
                data_file: None,
            },
            filters: FilterConfig {
                regions: Some(vec!["Asia".to_string()]),
                sort_by: Some(SortBy::Area),
                ..Default::default()
            },
        };
        let cli = CliOverrides {
            endpoint: Some("http://cli.example/all".to_string()),
            regions: vec!["Africa".to_string()],
            sort_by: Some(SortBy::Name),
            independent: true,
            ..Default::default()
        };
        let resolved = resolve(&config, &cli);
        assert_eq!(resolved.endpoint, "http://cli.example/all");
        assert!(resolved.criteria.region_selected("Africa"));
        assert!(!resolved.criteria.region_selected("Asia"));
        assert_eq!(resolved.criteria.sort_by, SortBy::Name);
        assert!(resolved.criteria.independent);
    }

    #[test]
    fn test_sparse_toml_parses() {
        let toml_str = r#"
[filters]
sort_by = "name"
"#;
        let config: AtlasConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.filters.sort_by, Some(SortBy::Name));
        assert!(config.filters.search.is_none());
        assert!(config.source.endpoint.is_none());
    }

    #[test]
    fn test_full_toml_parses() {
        let toml_str = r#"
[source]
endpoint = "http://localhost:8080/v3.1/all"

[filters]
search = "stan"
regions = ["Asia", "Europe"]
un_member = true
independent = true
sort_by = "area"
"#;
        let config: AtlasConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(
            config.source.endpoint.as_deref(),
            Some("http://localhost:8080/v3.1/all")
        );
        assert_eq!(config.filters.regions.as_ref().map(Vec::len), Some(2));
        assert_eq!(config.filters.un_member, Some(true));
        assert_eq!(config.filters.sort_by, Some(SortBy::Area));
    }

    #[test]
    fn test_missing_file_generates_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = load_config_from(&path).unwrap();
        assert!(config.source.endpoint.is_none());
        assert!(path.exists());
        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# Atlas Configuration"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[filters]\nsort_by = 42\n").unwrap();

        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("config parse error"));
    }
}
