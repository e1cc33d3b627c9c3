//! Collaborators the coordinator reports to.
//!
//! All of them are fire-and-forget: none can fail or block the lifecycle.

mod history;
mod toast_board;

pub use history::MemoryHistory;
use itertools::Itertools;
pub use toast_board::ToastBoard;

use crate::{
    state::{Toast, ToastId},
    types::{HistoryEntry, Metadata},
};

/// Presentation layer for toast notifications.
pub trait Presenter: Send + Sync {
    /// Shows the toast, replacing any toast displayed under the same ID.
    fn show(&self, id: &ToastId, toast: &Toast);

    fn dismiss(&self, id: &ToastId);
}

/// Recent transactions store.
pub trait History: Send + Sync {
    fn append(&self, entry: HistoryEntry);
}

pub trait Analytics: Send + Sync {
    fn track(&self, event: &str, metadata: &Metadata);
}

/// Exception reporting, only used for unexpected failures.
pub trait ErrorReporter: Send + Sync {
    fn capture(&self, message: &str, metadata: &Metadata);
}

/// Collaborator that drops everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct Noop;

impl Presenter for Noop {
    fn show(&self, _id: &ToastId, _toast: &Toast) {}

    fn dismiss(&self, _id: &ToastId) {}
}

impl History for Noop {
    fn append(&self, _entry: HistoryEntry) {}
}

impl Analytics for Noop {
    fn track(&self, _event: &str, _metadata: &Metadata) {}
}

impl ErrorReporter for Noop {
    fn capture(&self, _message: &str, _metadata: &Metadata) {}
}

/// Analytics and exception reporting into `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Tracing;

impl Analytics for Tracing {
    fn track(&self, event: &str, metadata: &Metadata) {
        tracing::info!(target: "bera_txn::analytics", event, metadata = %format_metadata(metadata));
    }
}

impl ErrorReporter for Tracing {
    fn capture(&self, message: &str, metadata: &Metadata) {
        tracing::error!(target: "bera_txn::exception", message, metadata = %format_metadata(metadata));
    }
}

fn format_metadata(metadata: &Metadata) -> String {
    metadata.iter().map(|(k, v)| format!("{}={:?}", k, v)).join(" ")
}
