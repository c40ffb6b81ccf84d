//! Configuration loading and management for the Timesheet Audit Engine.
//!
//! This module provides the audit settings, the validated run configuration,
//! and a loader reading both from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use timesheet_audit::config::ConfigLoader;
//!
//! let config = ConfigLoader::load("./config/audit.yaml").unwrap();
//! println!("Strategy: {:?}", config.config().settings.estimation_strategy);
//! ```

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{AuditConfig, AuditSettings, EstimationStrategy};
