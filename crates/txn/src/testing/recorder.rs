use parking_lot::Mutex;

use crate::{
    collab::{Analytics, ErrorReporter, History, Presenter},
    state::{Toast, ToastId},
    types::{HistoryEntry, Metadata},
};

/// Collaborator call observed by [`Recorder`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Call {
    Show(ToastId, Toast),
    Dismiss(ToastId),
    Append(HistoryEntry),
    Track(String, Metadata),
    Capture(String, Metadata),
}

/// Records every collaborator call in order.
#[derive(Debug, Default)]
pub struct Recorder {
    calls: Mutex<Vec<Call>>,
}

impl Recorder {
    pub fn new() -> Self { Self::default() }

    pub fn calls(&self) -> Vec<Call> { self.calls.lock().clone() }

    pub fn history(&self) -> Vec<HistoryEntry> {
        self.filter(|c| match c {
            Call::Append(entry) => Some(entry.clone()),
            _ => None,
        })
    }

    pub fn tracked(&self) -> Vec<(String, Metadata)> {
        self.filter(|c| match c {
            Call::Track(event, metadata) => Some((event.clone(), metadata.clone())),
            _ => None,
        })
    }

    pub fn captured(&self) -> Vec<(String, Metadata)> {
        self.filter(|c| match c {
            Call::Capture(message, metadata) => Some((message.clone(), metadata.clone())),
            _ => None,
        })
    }

    /// Toast calls only.
    pub fn toasts(&self) -> Vec<Call> {
        self.filter(|c| match c {
            Call::Show(..) | Call::Dismiss(..) => Some(c.clone()),
            _ => None,
        })
    }

    fn filter<T>(&self, f: impl Fn(&Call) -> Option<T>) -> Vec<T> {
        self.calls.lock().iter().filter_map(f).collect()
    }

    fn record(&self, call: Call) { self.calls.lock().push(call); }
}

impl Presenter for Recorder {
    fn show(&self, id: &ToastId, toast: &Toast) { self.record(Call::Show(id.clone(), toast.clone())); }

    fn dismiss(&self, id: &ToastId) { self.record(Call::Dismiss(id.clone())); }
}

impl History for Recorder {
    fn append(&self, entry: HistoryEntry) { self.record(Call::Append(entry)); }
}

impl Analytics for Recorder {
    fn track(&self, event: &str, metadata: &Metadata) {
        self.record(Call::Track(event.to_string(), metadata.clone()));
    }
}

impl ErrorReporter for Recorder {
    fn capture(&self, message: &str, metadata: &Metadata) {
        self.record(Call::Capture(message.to_string(), metadata.clone()));
    }
}
