//! Application state for the Timesheet Audit Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::config::{AuditSettings, ConfigLoader};

/// Shared application state.
///
/// Holds the audit settings applied to requests that do not carry their own.
#[derive(Clone, Default)]
pub struct AppState {
    default_settings: Arc<AuditSettings>,
}

impl AppState {
    /// Creates a new application state with the given default settings.
    pub fn new(default_settings: AuditSettings) -> Self {
        Self {
            default_settings: Arc::new(default_settings),
        }
    }

    /// Creates a state whose defaults are the settings of a loaded file.
    pub fn from_config(loader: &ConfigLoader) -> Self {
        Self::new(loader.config().settings.clone())
    }

    /// Returns the default audit settings.
    pub fn default_settings(&self) -> &AuditSettings {
        &self.default_settings
    }
}
