//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading audit run
//! configurations from YAML files.

use std::fs;
use std::path::Path;

use crate::error::{EngineError, EngineResult};

use super::types::AuditConfig;

/// Loads and validates audit run configuration.
///
/// # File Format
///
/// ```text
/// period:
///   start_date: 2026-01-15
///   end_date: 2026-01-22
/// settings:                      # optional, every key has a default
///   minimum_confidence_threshold: 0.5
///   estimation_strategy: hybrid
/// ```
///
/// # Example
///
/// ```no_run
/// use timesheet_audit::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/audit.yaml").unwrap();
/// println!("Auditing from {}", loader.config().period.start_date);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: AuditConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified YAML file.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - The file is missing or unreadable (`ConfigNotFound`)
    /// - The file contains invalid YAML or misses a required field
    ///   (`ConfigParseError`)
    /// - The period or a setting is out of range (`InvalidPeriod`,
    ///   `InvalidSetting`)
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        Self::parse(&content, &path_str)
    }

    /// Parses configuration from YAML text.
    ///
    /// # Example
    ///
    /// ```
    /// use timesheet_audit::config::ConfigLoader;
    ///
    /// let yaml = "period:\n  start_date: 2026-01-15\n  end_date: 2026-01-16\n";
    /// let loader = ConfigLoader::from_yaml_str(yaml)?;
    /// assert_eq!(loader.config().period.day_count(), 2);
    /// # Ok::<(), timesheet_audit::error::EngineError>(())
    /// ```
    pub fn from_yaml_str(content: &str) -> EngineResult<Self> {
        Self::parse(content, "<inline>")
    }

    fn parse(content: &str, path: &str) -> EngineResult<Self> {
        let config: AuditConfig =
            serde_yaml::from_str(content).map_err(|e| EngineError::ConfigParseError {
                path: path.to_string(),
                message: e.to_string(),
            })?;

        config.validate()?;

        Ok(Self { config })
    }

    /// Returns the loaded configuration.
    pub fn config(&self) -> &AuditConfig {
        &self.config
    }

    /// Consumes the loader, returning the configuration.
    pub fn into_config(self) -> AuditConfig {
        self.config
    }
}
