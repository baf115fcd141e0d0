//! # Launcher Configuration
//!
//! Configuration for the sample launcher: how tabs and filter tags are
//! ordered, which native library provides the sample list, and where the
//! notification counter is persisted.
//!
//! ## Configuration Categories
//!
//! - **Ordering**: category and tag priority lists
//! - **Native**: native library name and launch defaults
//! - **Notifications**: channel id and the preferences file holding the id counter

use serde::{Serialize, Deserialize};
use std::path::PathBuf;

use crate::config::Config;
use crate::samples::{PriorityOrder, ANY_TAG};

/// # Ordering Configuration
///
/// Preferred ordering of tab titles and filter tags. Keys missing from a list
/// are sorted alphabetically after the listed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// Preferred category order
    pub category_priority: Vec<String>,
    /// Preferred tag order
    pub tag_priority: Vec<String>,
}

impl OrderingConfig {
    /// Category comparator
    pub fn category_order(&self) -> PriorityOrder {
        PriorityOrder::new(self.category_priority.iter().cloned())
    }

    /// Tag comparator
    pub fn tag_order(&self) -> PriorityOrder {
        PriorityOrder::new(self.tag_priority.iter().cloned())
    }
}

impl Default for OrderingConfig {
    fn default() -> Self {
        Self {
            category_priority: vec![
                "api".to_string(),
                "performance".to_string(),
                "extensions".to_string(),
            ],
            tag_priority: vec![ANY_TAG.to_string()],
        }
    }
}

/// # Native Configuration
///
/// Settings for the native samples library and the process it launches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NativeConfig {
    /// Name of the native library that reports samples
    pub library_name: String,
    /// Start with benchmark mode enabled
    pub benchmark: bool,
    /// Start with headless rendering enabled
    pub headless: bool,
}

impl Default for NativeConfig {
    fn default() -> Self {
        Self {
            library_name: "vulkan_samples".to_string(),
            benchmark: false,
            headless: false,
        }
    }
}

/// # Notification Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Channel notifications are posted to
    pub channel_id: String,
    /// Preferences file holding the id counter
    pub prefs_path: PathBuf,
    /// Key of the id counter inside the preferences file
    pub counter_key: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            channel_id: "vkb".to_string(),
            prefs_path: PathBuf::from("notification_prefs.toml"),
            counter_key: "NOTIFICATION_KEY".to_string(),
        }
    }
}

/// # Complete Launcher Configuration
///
/// Top-level configuration that encompasses all launcher subsystems.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Tab and tag ordering
    pub ordering: OrderingConfig,
    /// Native library settings
    pub native: NativeConfig,
    /// Notification settings
    pub notifications: NotificationConfig,
}

impl LauncherConfig {
    /// Create a configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the preferred category order
    pub fn with_category_priority<I, S>(mut self, priority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ordering.category_priority = priority.into_iter().map(Into::into).collect();
        self
    }

    /// Set the preferred tag order
    pub fn with_tag_priority<I, S>(mut self, priority: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ordering.tag_priority = priority.into_iter().map(Into::into).collect();
        self
    }

    /// Set the native library name
    pub fn with_library_name(mut self, name: impl Into<String>) -> Self {
        self.native.library_name = name.into();
        self
    }

    /// Set the initial benchmark and headless modes
    pub fn with_launch_modes(mut self, benchmark: bool, headless: bool) -> Self {
        self.native.benchmark = benchmark;
        self.native.headless = headless;
        self
    }

    /// Set the notification preferences file
    pub fn with_prefs_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.notifications.prefs_path = path.into();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.native.library_name.is_empty() {
            return Err("Native library name cannot be empty".to_string());
        }
        if self.notifications.channel_id.is_empty() {
            return Err("Notification channel id cannot be empty".to_string());
        }
        if self.notifications.counter_key.is_empty() {
            return Err("Notification counter key cannot be empty".to_string());
        }
        Ok(())
    }
}

impl Config for LauncherConfig {}
