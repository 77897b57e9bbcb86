//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! Command-line and environment values arrive together as [`ConfigOverrides`]
//! (the binary's argument parser merges them); this module layers them over
//! the TOML file and the compiled defaults.

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Directory name used under the platform config dir
const CONFIG_DIR_NAME: &str = "openactive-clubs";

/// Column limit of a Google Sheets tab (`A`..`ZZZ`)
pub const MAX_SHEET_COLUMNS: usize = 18_278;

/// Bootstrap configuration loaded from TOML file
///
/// Every field is optional; anything missing falls through to the
/// compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Listen address
    pub bind: Option<String>,
    /// HTTP server port
    pub port: Option<u16>,
    /// Path to the line-delimited spreadsheet identifier list
    pub spreadsheet_ids: Option<PathBuf>,
    /// Base URL of the Google Sheets API
    pub sheets_api_base: Option<String>,
    /// Pre-issued OAuth access token for the Sheets API
    pub access_token: Option<String>,
    /// API key for publicly readable spreadsheets
    pub api_key: Option<String>,
    /// Externally visible base URL used for `@id` and `next` links
    pub public_base_url: Option<String>,
    /// Number of leading rows (field names + metadata) before data begins
    pub header_rows: Option<usize>,
    /// Zero-based column holding each row's join code
    pub code_column: Option<usize>,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: Option<String>,
}

/// Compiled defaults used when no other source provides a value
#[derive(Debug, Clone)]
pub struct CompiledDefaults {
    pub bind: String,
    pub port: u16,
    pub spreadsheet_ids: PathBuf,
    pub sheets_api_base: String,
    pub header_rows: usize,
    pub code_column: usize,
    pub log_level: String,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0".to_string(),
            port: 8080,
            spreadsheet_ids: PathBuf::from("spreadsheetIds.txt"),
            sheets_api_base: "https://sheets.googleapis.com".to_string(),
            header_rows: 3,
            code_column: 0,
            log_level: "info".to_string(),
        }
    }
}

/// Values supplied on the command line or through environment variables
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub bind: Option<String>,
    pub port: Option<u16>,
    pub spreadsheet_ids: Option<PathBuf>,
    pub sheets_api_base: Option<String>,
    pub access_token: Option<String>,
    pub api_key: Option<String>,
    pub public_base_url: Option<String>,
    pub header_rows: Option<usize>,
    pub code_column: Option<usize>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub bind: String,
    pub port: u16,
    pub spreadsheet_ids: PathBuf,
    pub sheets_api_base: String,
    pub access_token: Option<String>,
    pub api_key: Option<String>,
    /// Stored without a trailing slash
    pub public_base_url: Option<String>,
    pub header_rows: usize,
    pub code_column: usize,
    pub log_level: String,
}

impl ServiceConfig {
    /// Layer overrides over the TOML file over compiled defaults
    pub fn resolve(overrides: ConfigOverrides, toml_config: TomlConfig) -> Result<Self> {
        let defaults = CompiledDefaults::default();

        let header_rows = overrides
            .header_rows
            .or(toml_config.header_rows)
            .unwrap_or(defaults.header_rows);
        if header_rows == 0 {
            return Err(Error::Config(
                "header_rows must be at least 1 (row 0 holds the field names)".to_string(),
            ));
        }

        let code_column = overrides
            .code_column
            .or(toml_config.code_column)
            .unwrap_or(defaults.code_column);
        if code_column >= MAX_SHEET_COLUMNS {
            return Err(Error::Config(format!(
                "code_column {} is beyond the last sheet column ({})",
                code_column,
                MAX_SHEET_COLUMNS - 1
            )));
        }

        let sheets_api_base = overrides
            .sheets_api_base
            .or(toml_config.sheets_api_base)
            .unwrap_or(defaults.sheets_api_base);

        Ok(Self {
            bind: overrides
                .bind
                .or(toml_config.bind)
                .unwrap_or(defaults.bind),
            port: overrides.port.or(toml_config.port).unwrap_or(defaults.port),
            spreadsheet_ids: overrides
                .spreadsheet_ids
                .or(toml_config.spreadsheet_ids)
                .unwrap_or(defaults.spreadsheet_ids),
            sheets_api_base: sheets_api_base.trim_end_matches('/').to_string(),
            access_token: non_blank(overrides.access_token.or(toml_config.access_token)),
            api_key: non_blank(overrides.api_key.or(toml_config.api_key)),
            public_base_url: non_blank(
                overrides.public_base_url.or(toml_config.public_base_url),
            )
            .map(|url| url.trim_end_matches('/').to_string()),
            header_rows,
            code_column,
            log_level: toml_config.logging.level.unwrap_or(defaults.log_level),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Platform default location of the TOML file
///
/// e.g. `~/.config/openactive-clubs/config.toml` on Linux
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(CONFIG_DIR_NAME).join("config.toml"))
}

/// Parse a TOML config file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
}

/// Where the TOML settings came from
///
/// Returned alongside the parsed file so the outcome can be logged once
/// the subscriber is installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// File named with `--config` / `OAC_CONFIG`
    Explicit(PathBuf),
    /// Platform default file, parsed
    Default(PathBuf),
    /// Platform default file exists but could not be loaded
    DefaultInvalid { path: PathBuf, error: String },
    /// No file; compiled defaults only
    CompiledDefaults,
}

impl ConfigSource {
    /// Report the outcome at info, or warn when a default file was ignored
    pub fn log(&self) {
        match self {
            ConfigSource::Explicit(path) => info!("Loaded config file {}", path.display()),
            ConfigSource::Default(path) => info!("Loaded config file {}", path.display()),
            ConfigSource::DefaultInvalid { path, error } => warn!(
                "Ignoring config file {} ({}) - using compiled defaults",
                path.display(),
                error
            ),
            ConfigSource::CompiledDefaults => info!("No config file found, using compiled defaults"),
        }
    }
}

/// Parsed TOML settings plus their origin
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    pub toml: TomlConfig,
    pub source: ConfigSource,
}

/// Locate and load the TOML config
///
/// An explicitly named file must exist and parse. The platform default file
/// is optional: if missing or unreadable the compiled defaults apply and
/// [`ConfigSource`] records why.
pub fn resolve_toml_config(explicit: Option<&Path>) -> Result<LoadedConfig> {
    if let Some(path) = explicit {
        return Ok(LoadedConfig {
            toml: load_toml_config(path)?,
            source: ConfigSource::Explicit(path.to_path_buf()),
        });
    }

    let loaded = match default_config_path() {
        Some(path) if path.exists() => match load_toml_config(&path) {
            Ok(toml) => LoadedConfig {
                toml,
                source: ConfigSource::Default(path),
            },
            Err(e) => LoadedConfig {
                toml: TomlConfig::default(),
                source: ConfigSource::DefaultInvalid {
                    path,
                    error: e.to_string(),
                },
            },
        },
        _ => LoadedConfig {
            toml: TomlConfig::default(),
            source: ConfigSource::CompiledDefaults,
        },
    };
    Ok(loaded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_when_nothing_set() {
        let config =
            ServiceConfig::resolve(ConfigOverrides::default(), TomlConfig::default()).unwrap();

        assert_eq!(config.bind, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.header_rows, 3);
        assert_eq!(config.code_column, 0);
        assert_eq!(config.spreadsheet_ids, PathBuf::from("spreadsheetIds.txt"));
        assert!(config.access_token.is_none());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_overrides_beat_toml() {
        let toml_config = TomlConfig {
            port: Some(9000),
            header_rows: Some(4),
            code_column: Some(1),
            ..Default::default()
        };
        let overrides = ConfigOverrides {
            port: Some(7000),
            ..Default::default()
        };

        let config = ServiceConfig::resolve(overrides, toml_config).unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.header_rows, 4);
        assert_eq!(config.code_column, 1);
    }

    #[test]
    fn test_zero_header_rows_rejected() {
        let overrides = ConfigOverrides {
            header_rows: Some(0),
            ..Default::default()
        };
        let result = ServiceConfig::resolve(overrides, TomlConfig::default());
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_out_of_range_code_column_rejected() {
        for code_column in [MAX_SHEET_COLUMNS, usize::MAX] {
            let overrides = ConfigOverrides {
                code_column: Some(code_column),
                ..Default::default()
            };
            let result = ServiceConfig::resolve(overrides, TomlConfig::default());
            assert!(matches!(result, Err(Error::Config(_))));
        }

        let overrides = ConfigOverrides {
            code_column: Some(MAX_SHEET_COLUMNS - 1),
            ..Default::default()
        };
        assert!(ServiceConfig::resolve(overrides, TomlConfig::default()).is_ok());
    }

    #[test]
    fn test_trailing_slashes_and_blank_secrets() {
        let overrides = ConfigOverrides {
            public_base_url: Some("https://clubs.example.org/".to_string()),
            sheets_api_base: Some("http://localhost:9999/".to_string()),
            access_token: Some("   ".to_string()),
            ..Default::default()
        };
        let config = ServiceConfig::resolve(overrides, TomlConfig::default()).unwrap();

        assert_eq!(config.public_base_url.as_deref(), Some("https://clubs.example.org"));
        assert_eq!(config.sheets_api_base, "http://localhost:9999");
        assert!(config.access_token.is_none());
    }

    #[test]
    fn test_toml_parsing() {
        let toml_str = r#"
            port = 8181
            spreadsheet_ids = "/srv/ids.txt"
            header_rows = 4

            [logging]
            level = "debug"
        "#;
        let parsed: TomlConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(parsed.port, Some(8181));
        assert_eq!(parsed.spreadsheet_ids, Some(PathBuf::from("/srv/ids.txt")));
        assert_eq!(parsed.logging.level.as_deref(), Some("debug"));
        assert!(parsed.bind.is_none());
    }
}
