//! Storage permission request chain
//!
//! Permissions are requested one at a time, in order. A denial after a
//! request resets every "requested" flag and switches the launcher to the
//! permission view; the retry button starts the chain again.

use std::collections::HashMap;

/// Permissions the launcher needs before showing samples
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Permission {
    /// Write access to external storage
    WriteExternalStorage,
    /// Read access to external storage
    ReadExternalStorage,
}

impl Permission {
    /// Request order
    pub const REQUIRED: [Self; 2] = [Self::WriteExternalStorage, Self::ReadExternalStorage];

    /// Platform permission name
    pub fn name(self) -> &'static str {
        match self {
            Self::WriteExternalStorage => "android.permission.WRITE_EXTERNAL_STORAGE",
            Self::ReadExternalStorage => "android.permission.READ_EXTERNAL_STORAGE",
        }
    }
}

/// Host query for the current grant state of a permission
pub trait PermissionStatus {
    /// Whether `permission` is currently granted
    fn is_granted(&self, permission: Permission) -> bool;
}

impl<F> PermissionStatus for F
where
    F: Fn(Permission) -> bool,
{
    fn is_granted(&self, permission: Permission) -> bool {
        self(permission)
    }
}

/// What the host should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStep {
    /// Ask the user for this permission and report back via `on_result`
    Request(Permission),
    /// Everything is granted; show the sample list
    ShowSamples,
    /// A permission was refused; show the permission view
    ShowPermissionMessage,
}

/// Permission request state machine
#[derive(Debug, Clone, Default)]
pub struct PermissionFlow {
    requested: HashMap<Permission, bool>,
}

impl PermissionFlow {
    /// Create a flow with no permission requested yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `permission` has been requested since the last reset
    pub fn was_requested(&self, permission: Permission) -> bool {
        self.requested.get(&permission).copied().unwrap_or(false)
    }

    /// Walk the required permissions and pick the next step
    pub fn check(&mut self, status: &impl PermissionStatus) -> PermissionStep {
        for permission in Permission::REQUIRED {
            if status.is_granted(permission) {
                continue;
            }
            if self.was_requested(permission) {
                // Already asked and still not granted
                return self.denied();
            }
            self.requested.insert(permission, true);
            log::debug!("Requesting permission {}", permission.name());
            return PermissionStep::Request(permission);
        }
        PermissionStep::ShowSamples
    }

    /// Handle the user's answer to a request
    pub fn on_result(
        &mut self,
        permission: Permission,
        granted: bool,
        status: &impl PermissionStatus,
    ) -> PermissionStep {
        if !granted && self.was_requested(permission) {
            log::warn!("Permission {} denied", permission.name());
            return self.denied();
        }
        self.check(status)
    }

    /// Retry after the permission view was shown
    pub fn retry(&mut self, status: &impl PermissionStatus) -> PermissionStep {
        self.reset();
        self.check(status)
    }

    fn denied(&mut self) -> PermissionStep {
        self.reset();
        PermissionStep::ShowPermissionMessage
    }

    fn reset(&mut self) {
        self.requested.clear();
    }
}
