//! Timesheet Audit Engine
//!
//! This crate audits employee clock punches over a date range. For every
//! active employee and every day it checks that the mandatory punches are
//! present, and estimates missing punches from same-day, adjacent-day and
//! peer-employee evidence before marking them unrecoverable.

#![warn(missing_docs)]

pub mod api;
pub mod audit;
pub mod config;
pub mod error;
pub mod models;
pub mod store;
