use std::{fmt::Display, time::Duration};

use alloy::primitives::TxHash;
use serde::{Deserialize, Serialize};

use crate::types::CorrelationId;

/// How long success and error toasts stay on screen.
pub const TERMINAL_TOAST_DURATION: Duration = Duration::from_millis(3000);

/// Lifecycle phase a toast belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Loading,
    Submission,
    Success,
    Error,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Loading => "loading",
            Phase::Submission => "submission",
            Phase::Success => "success",
            Phase::Error => "error",
        }
    }
}

impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Toast key: one toast per phase per correlation ID.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ToastId {
    phase: Phase,
    correlation: CorrelationId,
}

impl ToastId {
    pub fn new(phase: Phase, correlation: CorrelationId) -> Self { Self { phase, correlation } }

    pub fn phase(&self) -> Phase { self.phase }

    pub fn correlation(&self) -> &CorrelationId { &self.correlation }
}

impl Display for ToastId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.phase, self.correlation)
    }
}

/// Toast descriptor handed to [`crate::collab::Presenter::show`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toast {
    pub phase: Phase,
    pub title: String,
    pub message: Option<String>,
    pub hash: Option<TxHash>,
    /// `None` keeps the toast until it is dismissed.
    pub duration: Option<Duration>,
}

impl Toast {
    pub(crate) fn sticky(phase: Phase, title: &str, message: &str, hash: Option<TxHash>) -> Self {
        Self {
            phase,
            title: title.to_string(),
            message: Some(message.to_string()),
            hash,
            duration: None,
        }
    }

    pub(crate) fn timed(
        phase: Phase,
        title: &str,
        message: Option<String>,
        hash: Option<TxHash>,
    ) -> Self {
        Self {
            phase,
            title: title.to_string(),
            message,
            hash,
            duration: Some(TERMINAL_TOAST_DURATION),
        }
    }
}
