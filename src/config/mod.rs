//! Configuration module.
//!
//! Handles the settings file, environment variables, and the resolved
//! connection settings handed to the database layer.

mod connection;
mod settings;

pub use connection::ConnectionSettings;
pub use settings::{
    expand_env_vars, ConnectionSection, KeyList, Settings, SettingsError, SheetsSection,
    CONFIG_ENV_VAR,
};
