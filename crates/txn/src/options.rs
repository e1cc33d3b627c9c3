use std::sync::Arc;

use alloy::primitives::TxHash;

use crate::{state::TxnFailure, types::ActionType};

type HashCallback = Arc<dyn Fn(TxHash) + Send + Sync>;

/// Per-coordinator configuration: what to show, how to tag history and
/// analytics, and which caller callbacks to invoke.
#[derive(Clone, Default, derive_more::Debug)]
pub struct TxnOptions {
    message: String,
    action_type: Option<ActionType>,
    disable_toast: bool,
    disable_modal: bool,
    #[debug(skip)]
    callbacks: TxnCallbacks,
}

impl TxnOptions {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), ..Default::default() }
    }

    pub fn with_action_type(mut self, action_type: ActionType) -> Self {
        self.action_type = Some(action_type);
        self
    }

    pub fn disable_toast(mut self, disable: bool) -> Self {
        self.disable_toast = disable;
        self
    }

    pub fn disable_modal(mut self, disable: bool) -> Self {
        self.disable_modal = disable;
        self
    }

    pub fn on_loading(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.callbacks.on_loading = Some(Arc::new(f));
        self
    }

    pub fn on_submission(mut self, f: impl Fn(TxHash) + Send + Sync + 'static) -> Self {
        self.callbacks.on_submission = Some(Arc::new(f));
        self
    }

    pub fn on_success(mut self, f: impl Fn(TxHash) + Send + Sync + 'static) -> Self {
        self.callbacks.on_success = Some(Arc::new(f));
        self
    }

    pub fn on_error(mut self, f: impl Fn(&TxnFailure) + Send + Sync + 'static) -> Self {
        self.callbacks.on_error = Some(Arc::new(f));
        self
    }

    /// Message shown in toasts/modals and recorded as history description.
    pub fn message(&self) -> &str { &self.message }

    pub fn action_type(&self) -> Option<ActionType> { self.action_type }

    pub fn toast_disabled(&self) -> bool { self.disable_toast }

    pub fn modal_disabled(&self) -> bool { self.disable_modal }

    pub(crate) fn callbacks(&self) -> &TxnCallbacks { &self.callbacks }
}

/// Caller callbacks invoked after the coordinator's own side effects.
#[derive(Clone, Default)]
pub(crate) struct TxnCallbacks {
    on_loading: Option<Arc<dyn Fn() + Send + Sync>>,
    on_submission: Option<HashCallback>,
    on_success: Option<HashCallback>,
    on_error: Option<Arc<dyn Fn(&TxnFailure) + Send + Sync>>,
}

/// Caller callback due after a transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CallerNotice {
    Loading,
    Submission(TxHash),
    Success(TxHash),
    Error(TxnFailure),
}

impl TxnCallbacks {
    pub(crate) fn notify(&self, notice: &CallerNotice) {
        match notice {
            CallerNotice::Loading => {
                if let Some(f) = &self.on_loading {
                    f()
                }
            },
            CallerNotice::Submission(hash) => {
                if let Some(f) = &self.on_submission {
                    f(*hash)
                }
            },
            CallerNotice::Success(hash) => {
                if let Some(f) = &self.on_success {
                    f(*hash)
                }
            },
            CallerNotice::Error(failure) => {
                if let Some(f) = &self.on_error {
                    f(failure)
                }
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_callbacks_notify() {
        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let options = TxnOptions::new("Swap").on_success(move |hash| {
            assert_eq!(hash, TxHash::repeat_byte(7));
            c.fetch_add(1, Ordering::SeqCst);
        });

        options.callbacks().notify(&CallerNotice::Loading);
        options.callbacks().notify(&CallerNotice::Success(TxHash::repeat_byte(7)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_debug_skips_callbacks() {
        let options = TxnOptions::new("Stake").with_action_type(ActionType::Stake).on_loading(|| {});
        let debug = format!("{:?}", options);
        assert!(debug.contains("Stake"));
        assert!(!debug.contains("callbacks"));
    }
}
