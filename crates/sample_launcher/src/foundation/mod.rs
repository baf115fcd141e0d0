//! Foundation module - Core utilities and types
//!
//! - Collections and handle types for sample storage
//! - Logging utilities

pub mod collections;
pub mod logging;
