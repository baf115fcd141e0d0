//! Modal error dialog handoff between a worker thread and the UI thread
//!
//! A worker that hits a fatal error posts the message to the UI thread and
//! blocks until the user dismisses the dialog, then terminates the process.
//! Each request carries its own one-shot acknowledgement channel.

use crossbeam::channel::{bounded, unbounded, Receiver, Sender};
use thiserror::Error;

/// Errors from the dialog handoff
#[derive(Error, Debug, PartialEq, Eq)]
pub enum DialogError {
    /// The UI side is gone; nothing can show the dialog
    #[error("UI thread is no longer receiving error dialogs")]
    Disconnected,
}

/// How a wait ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogOutcome {
    /// The user dismissed the dialog
    Dismissed,
    /// The dialog was dropped without being dismissed
    Abandoned,
}

struct DialogRequest {
    message: String,
    ack: Sender<()>,
}

/// Create a connected requester/receiver pair
pub fn error_dialog_channel() -> (ErrorDialogRequester, ErrorDialogReceiver) {
    let (sender, receiver) = unbounded();
    (
        ErrorDialogRequester { sender },
        ErrorDialogReceiver { receiver },
    )
}

/// Worker-side handle; cheap to clone across threads
#[derive(Clone)]
pub struct ErrorDialogRequester {
    sender: Sender<DialogRequest>,
}

impl ErrorDialogRequester {
    /// Ask the UI thread to show `message` and block until it is acknowledged
    pub fn show_and_wait(&self, message: impl Into<String>) -> Result<DialogOutcome, DialogError> {
        let (ack, acknowledged) = bounded(1);
        let message = message.into();
        log::error!("Fatal error, waiting for acknowledgement: {message}");

        self.sender
            .send(DialogRequest { message, ack })
            .map_err(|_| DialogError::Disconnected)?;

        match acknowledged.recv() {
            Ok(()) => Ok(DialogOutcome::Dismissed),
            Err(_) => Ok(DialogOutcome::Abandoned),
        }
    }
}

/// UI-side handle
pub struct ErrorDialogReceiver {
    receiver: Receiver<DialogRequest>,
}

impl ErrorDialogReceiver {
    /// Take a pending dialog without blocking
    pub fn try_next(&self) -> Option<ErrorDialog> {
        self.receiver.try_recv().ok().map(ErrorDialog::from)
    }

    /// Block until a dialog is posted; `None` once every requester is gone
    pub fn next(&self) -> Option<ErrorDialog> {
        self.receiver.recv().ok().map(ErrorDialog::from)
    }
}

/// A dialog waiting to be shown and dismissed
///
/// Dropping it without calling [`ErrorDialog::dismiss`] releases the waiter
/// with [`DialogOutcome::Abandoned`].
pub struct ErrorDialog {
    message: String,
    ack: Sender<()>,
}

impl From<DialogRequest> for ErrorDialog {
    fn from(request: DialogRequest) -> Self {
        Self {
            message: request.message,
            ack: request.ack,
        }
    }
}

impl ErrorDialog {
    /// Text to display
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Acknowledge the dialog, releasing the waiting worker
    pub fn dismiss(self) {
        // The waiter may already have given up; nothing left to release then
        let _ = self.ack.send(());
    }
}
