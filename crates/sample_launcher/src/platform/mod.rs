//! Platform glue with testable state
//!
//! - `permissions`: storage permission request chain
//! - `notification`: error notifications and the persisted id counter
//! - `error_dialog`: blocking modal dialog handoff from worker threads

pub mod error_dialog;
pub mod notification;
pub mod permissions;

pub use error_dialog::{error_dialog_channel, DialogError, DialogOutcome, ErrorDialog, ErrorDialogReceiver, ErrorDialogRequester};
pub use notification::{
    FileStore, KeyValueStore, MemoryStore, Notification, NotificationIdCounter, NotificationSink, Notifier, StoreError,
};
pub use permissions::{Permission, PermissionFlow, PermissionStatus, PermissionStep};
