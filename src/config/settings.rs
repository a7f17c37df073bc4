//! TOML-based configuration for the report extractor.
//!
//! Supports a config file (nau-reports.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [connection]
//! host = "mysql.internal"
//! port = 3306
//! database = "edxapp"
//! user = "read_only"
//! password = "${NAU_DB_PASSWORD}"
//! debug = false
//!
//! [sheets]
//! enabled = ["organizations", "course_runs", "summary"]
//! progress = true
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use super::connection::ConnectionSettings;

/// Environment variable pointing at an explicit config file.
pub const CONFIG_ENV_VAR: &str = "NAU_REPORTS_CONFIG";

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Missing required setting: {0}")]
    MissingField(&'static str),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// Database connection.
    pub connection: ConnectionSection,

    /// Which sheets (reports) to produce and how.
    pub sheets: SheetsSection,
}

/// `[connection]` section as written in the file.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ConnectionSection {
    pub host: String,
    pub port: u16,
    pub database: String,
    pub user: String,

    /// Supports ${ENV_VAR} expansion. Required.
    pub password: Option<String>,

    /// Log the resolved connection settings (password redacted).
    pub debug: bool,
}

impl Default for ConnectionSection {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 3306,
            database: "edxapp".to_string(),
            user: "read_only".to_string(),
            password: None,
            debug: false,
        }
    }
}

impl ConnectionSection {
    /// Expand environment variables and produce the immutable settings value.
    pub fn resolve(&self) -> Result<ConnectionSettings, SettingsError> {
        let password = self
            .password
            .as_deref()
            .ok_or(SettingsError::MissingField("connection.password"))?;

        Ok(ConnectionSettings::new(
            expand_env_vars(&self.host)?,
            self.port,
            expand_env_vars(&self.database)?,
            expand_env_vars(&self.user)?,
            expand_env_vars(password)?,
        ))
    }
}

/// A list of report keys, either as a TOML array or a comma-separated string.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum KeyList {
    List(Vec<String>),
    Csv(String),
}

impl KeyList {
    /// Normalized keys: trimmed, empty entries dropped.
    pub fn keys(&self) -> Vec<String> {
        let raw: Vec<&str> = match self {
            KeyList::List(items) => items.iter().map(String::as_str).collect(),
            KeyList::Csv(s) => s.split(',').collect(),
        };
        raw.into_iter()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// `[sheets]` section.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SheetsSection {
    /// Enabled report keys. `None` means every registered report.
    pub enabled: Option<KeyList>,

    /// Emit a progress notification before each report runs.
    pub progress: bool,
}

impl Default for SheetsSection {
    fn default() -> Self {
        Self {
            enabled: None,
            progress: true,
        }
    }
}

impl SheetsSection {
    /// The configured enabled keys, if the setting is present.
    pub fn enabled_keys(&self) -> Option<Vec<String>> {
        self.enabled.as_ref().map(KeyList::keys)
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Parse settings from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Load settings, preferring an explicit path.
    ///
    /// Searches in order:
    /// 1. `explicit`
    /// 2. Environment variable `NAU_REPORTS_CONFIG`
    /// 3. `./nau-reports.toml`
    /// 4. `~/.config/nau-reports/config.toml`
    pub fn load(explicit: Option<&Path>) -> Result<Self, SettingsError> {
        if let Some(path) = explicit {
            return Self::from_file(path);
        }

        if let Ok(path) = env::var(CONFIG_ENV_VAR) {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("nau-reports.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("nau-reports").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let mut result = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '$' {
            result.push(c);
            continue;
        }

        let mut var_name = String::new();
        if chars.peek() == Some(&'{') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == '}' {
                    break;
                }
                var_name.push(ch);
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if !(ch.is_alphanumeric() || ch == '_') {
                    break;
                }
                var_name.push(ch);
                chars.next();
            }
            if var_name.is_empty() {
                // Just a lone $, keep it
                result.push('$');
                continue;
            }
        }

        let value = env::var(&var_name).map_err(|_| SettingsError::MissingEnvVar(var_name))?;
        result.push_str(&value);
    }

    Ok(result)
}
