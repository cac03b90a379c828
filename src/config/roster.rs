//! Seed roster loading from config.toml
//!
//! This module provides functionality to load the initial employee roster from
//! a TOML configuration file. The employees defined in config.toml are used to
//! seed the database on first run or when employees are missing.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Deserialize)]
pub struct RosterConfig {
    /// List of employee seeds
    pub employees: Vec<EmployeeSeed>,
}

/// Configuration for a single employee
#[derive(Debug, Deserialize, Clone)]
pub struct EmployeeSeed {
    /// Full name of the employee
    pub name: String,
    /// Registration code used by HR (e.g., "NX001")
    pub registration: String,
    /// Job title
    pub role: String,
    /// Monthly base salary
    pub salary: f64,
    /// Whether the employee is already terminated (excluded from close runs)
    #[serde(default)]
    pub terminated: bool,
}

/// Loads the roster configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - Required fields are missing
pub fn load_roster<P: AsRef<Path>>(path: P) -> Result<RosterConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads the roster configuration from the default location (./config.toml)
pub fn load_default_roster() -> Result<RosterConfig> {
    load_roster("config.toml")
}
