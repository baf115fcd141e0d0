//! Launching samples in the native process
//!
//! - `arguments`: launch requests, flags and their command-line form
//! - `native`: the bridge to the native samples library

pub mod arguments;
pub mod native;

pub use arguments::{CommandLine, LaunchError, LaunchFlags, LaunchRequest};
pub use native::{BridgeError, ManifestBridge, NativeBridge, SampleManifest};
