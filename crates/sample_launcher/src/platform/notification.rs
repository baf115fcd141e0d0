//! Error notifications and their persisted id counter
//!
//! Every posted notification takes a fresh id from a counter kept in the
//! platform's key-value settings, so ids keep increasing across process
//! restarts. The counter is injected wherever it is needed.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::{Config, ConfigError};

/// Title used for every launcher notification
pub const NOTIFICATION_TITLE: &str = "Vulkan Samples Error";

/// Errors from a key-value store
#[derive(Error, Debug)]
pub enum StoreError {
    /// Backing file could not be read or written
    #[error("Settings store error: {0}")]
    Backing(#[from] ConfigError),

    /// The counter cannot be incremented further
    #[error("Counter {0} overflowed")]
    Overflow(String),
}

/// Integer settings persisted by the host platform
pub trait KeyValueStore {
    /// Read `key`, if present
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError>;

    /// Write `key`
    fn put_int(&mut self, key: &str, value: i64) -> Result<(), StoreError>;
}

/// Process-local store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, i64>,
}

impl MemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.values.get(key).copied())
    }

    fn put_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct PrefsFile {
    #[serde(default)]
    values: BTreeMap<String, i64>,
}

impl Config for PrefsFile {}

/// Store persisted to a `.toml` or `.ron` preferences file
///
/// The file is re-read on every access and rewritten on every update.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Store backed by `path`; the file is created on first write
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read(&self) -> Result<PrefsFile, StoreError> {
        Ok(PrefsFile::load_or_default(&self.path)?)
    }
}

impl KeyValueStore for FileStore {
    fn get_int(&self, key: &str) -> Result<Option<i64>, StoreError> {
        Ok(self.read()?.values.get(key).copied())
    }

    fn put_int(&mut self, key: &str, value: i64) -> Result<(), StoreError> {
        let mut prefs = self.read()?;
        prefs.values.insert(key.to_string(), value);
        prefs.save_to_file(&self.path)?;
        Ok(())
    }
}

/// Monotonic notification id source
#[derive(Debug)]
pub struct NotificationIdCounter<S> {
    store: S,
    key: String,
}

impl<S: KeyValueStore> NotificationIdCounter<S> {
    /// Counter stored under `key`
    pub fn new(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    /// Return the stored id and persist its successor
    ///
    /// The first call on an empty store returns 0.
    pub fn next(&mut self) -> Result<i64, StoreError> {
        let id = self.store.get_int(&self.key)?.unwrap_or(0);
        let successor = id
            .checked_add(1)
            .ok_or_else(|| StoreError::Overflow(self.key.clone()))?;
        self.store.put_int(&self.key, successor)?;
        Ok(id)
    }

    /// The backing store
    pub fn store(&self) -> &S {
        &self.store
    }
}

/// A notification ready to be posted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Title line
    pub title: String,
    /// Collapsed text
    pub text: String,
    /// Expanded text
    pub big_text: String,
    /// Log file the notification opens, for fatal errors
    pub log_file: Option<PathBuf>,
    /// Dismiss when tapped
    pub auto_cancel: bool,
}

impl Notification {
    /// Fatal error notification pointing at a log file
    pub fn fatal_error(log_file: impl Into<PathBuf>) -> Self {
        let log_file = log_file.into();
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            text: "Fatal Error: click to view".to_string(),
            big_text: format!("Log: {}", log_file.display()),
            log_file: Some(log_file),
            auto_cancel: true,
        }
    }

    /// Plain message notification
    pub fn message(message: impl Into<String>) -> Self {
        let message = message.into();
        Self {
            title: NOTIFICATION_TITLE.to_string(),
            text: message.clone(),
            big_text: message,
            log_file: None,
            auto_cancel: false,
        }
    }
}

/// Host-side notification display
pub trait NotificationSink {
    /// Show `notification` under `id` on `channel`
    fn post(&mut self, channel: &str, id: i64, notification: &Notification);
}

/// Posts notifications with ids from an injected counter
#[derive(Debug)]
pub struct Notifier<S, K> {
    channel: String,
    counter: NotificationIdCounter<S>,
    sink: K,
}

impl<S: KeyValueStore, K: NotificationSink> Notifier<S, K> {
    /// Notifier posting to `channel`
    pub fn new(channel: impl Into<String>, counter: NotificationIdCounter<S>, sink: K) -> Self {
        Self {
            channel: channel.into(),
            counter,
            sink,
        }
    }

    /// Post a notification, returning the id it was given
    pub fn notify(&mut self, notification: &Notification) -> Result<i64, StoreError> {
        let id = self.counter.next()?;
        log::debug!("Posting notification {id}: {}", notification.text);
        self.sink.post(&self.channel, id, notification);
        Ok(id)
    }

    /// The display sink
    pub fn sink(&self) -> &K {
        &self.sink
    }
}
