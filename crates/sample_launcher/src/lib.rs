//! # Sample Launcher
//!
//! Launcher shell for the native Vulkan samples application: lists the
//! samples reported by the native library as category tabs, narrows them
//! with a multi-select tag filter, and forwards a command line selecting a
//! sample, test or batch run to the native process.
//!
//! ## Features
//!
//! - **Sample Index**: category and tag lookups with a swappable tag filter
//! - **Filter Dialog**: uncommitted edits, committed only on apply
//! - **Launch Arguments**: sample, test and batch command lines with benchmark/headless flags
//! - **Platform Glue**: permission chain, notification id counter, modal error dialog handoff
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sample_launcher::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LauncherConfig::load_or_default("launcher.toml")?;
//!     let bridge = ManifestBridge::from_file("samples.toml");
//!     let mut launcher = Launcher::new(&config, bridge)?;
//!
//!     for (tab, title) in launcher.tabs().iter().enumerate() {
//!         println!("{title}: {} samples", launcher.rows(tab).len());
//!     }
//!
//!     launcher.launch_sample("hello_triangle")?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

// Core launcher modules
pub mod core;

pub mod config;
pub mod events;
pub mod foundation;
pub mod launch;
pub mod platform;
pub mod samples;

mod launcher;

pub use launcher::{IntentExtras, Launcher, LauncherError, LauncherView, NATIVE_LOAD_FAILED};

/// Common imports for launcher users
pub mod prelude {
    pub use crate::{
        IntentExtras, Launcher, LauncherError, LauncherView,
        core::config::LauncherConfig,
        config::{Config, ConfigError},
        events::{UiEvent, UiEventHandler, UiEventSystem, UiEventType},
        launch::{LaunchFlags, LaunchRequest, ManifestBridge, NativeBridge},
        platform::{Permission, PermissionStep},
        samples::{FilterDialog, PriorityOrder, Sample, SampleIndex, ANY_TAG},
    };
}
