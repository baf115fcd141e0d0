//! # Core Launcher Module
//!
//! Shared configuration used by every launcher subsystem.
//!
//! ## Organization
//!
//! - **Config**: Unified configuration for ordering, native library and notifications
//! - **Foundation**: Low-level utilities (collections, logging)
//! - **Samples**: Sample index and tag filtering

pub mod config;

// Re-export foundation modules for convenience
pub use crate::foundation;
pub use crate::samples;

// Re-export commonly used config types
pub use config::{
    LauncherConfig,
    NativeConfig,
    NotificationConfig,
    OrderingConfig,
};
pub use crate::config::{Config, ConfigError};
