//! Boundary with the native samples library
//!
//! On device the bridge is backed by JNI calls into the native library. On
//! a desktop the [`ManifestBridge`] reads the sample list from a manifest
//! file and records forwarded command lines.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::Config;
use crate::samples::Sample;

/// Errors reported by a native bridge
#[derive(Error, Debug)]
pub enum BridgeError {
    /// The native library could not be loaded
    #[error("Native library failed to load: {0}")]
    LibraryLoad(String),

    /// A call was made before a successful load
    #[error("Native library is not loaded")]
    NotLoaded,

    /// The native side rejected the command line
    #[error("Failed to send arguments: {0}")]
    Send(String),
}

/// Calls the launcher makes into the native library
pub trait NativeBridge {
    /// Load the native library; called once at startup
    fn load(&mut self) -> Result<(), BridgeError>;

    /// The sample list; `None` entries are invalid records
    fn samples(&self) -> Vec<Option<Sample>>;

    /// Forward a command line to the native process before it starts
    fn send_arguments(&mut self, args: &[String]) -> Result<(), BridgeError>;

    /// One-shot filesystem setup
    ///
    /// Newer native builds discover their own paths, so the default does nothing.
    fn init_file_path(&mut self, _external_dir: &Path, _temp_dir: &Path) -> Result<(), BridgeError> {
        Ok(())
    }
}

/// On-disk sample list
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleManifest {
    /// Samples in native registration order
    #[serde(default)]
    pub samples: Vec<Sample>,
}

impl Config for SampleManifest {}

#[derive(Debug)]
enum ManifestSource {
    File(PathBuf),
    Memory(Vec<Option<Sample>>),
}

/// Desktop bridge backed by a manifest file
#[derive(Debug)]
pub struct ManifestBridge {
    source: ManifestSource,
    loaded: Option<Vec<Option<Sample>>>,
    file_paths: Option<(PathBuf, PathBuf)>,
    sent: Vec<Vec<String>>,
}

impl ManifestBridge {
    /// Bridge reading samples from a `.toml` or `.ron` manifest
    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::with_source(ManifestSource::File(path.into()))
    }

    /// Bridge serving an in-memory sample list
    pub fn in_memory<I, T>(samples: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<Option<Sample>>,
    {
        Self::with_source(ManifestSource::Memory(samples.into_iter().map(Into::into).collect()))
    }

    fn with_source(source: ManifestSource) -> Self {
        Self {
            source,
            loaded: None,
            file_paths: None,
            sent: Vec::new(),
        }
    }

    /// Command lines forwarded so far, oldest first
    pub fn sent_arguments(&self) -> &[Vec<String>] {
        &self.sent
    }

    /// Directories passed to [`NativeBridge::init_file_path`]
    pub fn file_paths(&self) -> Option<(&Path, &Path)> {
        self.file_paths
            .as_ref()
            .map(|(external, temp)| (external.as_path(), temp.as_path()))
    }
}

impl NativeBridge for ManifestBridge {
    fn load(&mut self) -> Result<(), BridgeError> {
        let samples = match &self.source {
            ManifestSource::File(path) => {
                let manifest = SampleManifest::load_from_file(path)
                    .map_err(|e| BridgeError::LibraryLoad(format!("{}: {e}", path.display())))?;
                log::info!("Loaded {} samples from {}", manifest.samples.len(), path.display());
                manifest.samples.into_iter().map(Some).collect()
            }
            ManifestSource::Memory(samples) => samples.clone(),
        };
        self.loaded = Some(samples);
        Ok(())
    }

    fn samples(&self) -> Vec<Option<Sample>> {
        self.loaded.clone().unwrap_or_default()
    }

    fn send_arguments(&mut self, args: &[String]) -> Result<(), BridgeError> {
        if self.loaded.is_none() {
            return Err(BridgeError::NotLoaded);
        }
        log::info!("Forwarding arguments: {}", args.join(" "));
        self.sent.push(args.to_vec());
        Ok(())
    }

    fn init_file_path(&mut self, external_dir: &Path, temp_dir: &Path) -> Result<(), BridgeError> {
        self.file_paths = Some((external_dir.to_path_buf(), temp_dir.to_path_buf()));
        Ok(())
    }
}
