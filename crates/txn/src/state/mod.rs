//! Per-call lifecycle state and the pure transition function driving it.
//!
//! ```text
//! Idle ──Loading──▶ Loading ──Submission──▶ Submitting ──Success──▶ Success
//!                      │  └───────────Success──────────────────────▲
//!                      └──Error──▶ Error ◀──Error── Submitting
//! ```
//!
//! `Error` is also accepted from `Idle`: wallets may fail before reporting
//! any wallet interaction.
//!
//! [`transition`] has no side effects of its own: everything the
//! coordinator has to do in response to an event is returned as a list of
//! [`Effect`]s, in execution order.

mod modal;
mod toast;

use alloy::primitives::TxHash;
use chrono::{DateTime, Utc};
pub use modal::{ModalAction, ModalData, ModalName, ModalSet, ModalSlot, ModalView};
use serde::{Deserialize, Serialize};
pub use toast::{Phase, TERMINAL_TOAST_DURATION, Toast, ToastId};

use crate::{
    error::ErrorKind,
    options::{CallerNotice, TxnOptions},
    types::{ActionType, CorrelationId, HistoryEntry, Metadata, Operation},
};

/// Error cause reported by a write primitive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TxnFailure {
    pub message: String,
    /// Hash of the transaction, if it made it on-chain.
    pub hash: Option<TxHash>,
}

impl TxnFailure {
    pub fn new(message: impl Into<String>) -> Self { Self { message: message.into(), hash: None } }

    pub fn with_hash(mut self, hash: TxHash) -> Self {
        self.hash = Some(hash);
        self
    }

    pub fn kind(&self) -> ErrorKind { ErrorKind::classify(&self.message) }
}

/// Lifecycle callback emitted by a write primitive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LifecycleEvent {
    /// Waiting for the wallet to sign.
    Loading,
    /// Signed and broadcast, waiting for confirmation.
    Submission(TxHash),
    /// Confirmed.
    Success(TxHash),
    Error(TxnFailure),
}

/// State of a single write call.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LifecycleState {
    #[default]
    Idle,
    Loading,
    Submitting {
        hash: TxHash,
    },
    Success {
        hash: TxHash,
    },
    Error {
        failure: TxnFailure,
    },
}

impl LifecycleState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, LifecycleState::Success { .. } | LifecycleState::Error { .. })
    }

    pub fn hash(&self) -> Option<TxHash> {
        match self {
            LifecycleState::Submitting { hash } | LifecycleState::Success { hash } => Some(*hash),
            LifecycleState::Error { failure } => failure.hash,
            LifecycleState::Idle | LifecycleState::Loading => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            LifecycleState::Idle => "idle",
            LifecycleState::Loading => "loading",
            LifecycleState::Submitting { .. } => "submitting",
            LifecycleState::Success { .. } => "success",
            LifecycleState::Error { .. } => "error",
        }
    }
}

/// Side effect requested by [`transition`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Effect {
    ShowToast(ToastId, Toast),
    DismissToast(ToastId),
    Modal(ModalAction),
    /// Analytics event.
    Track(&'static str, Metadata),
    /// Exception report with contextual metadata.
    CaptureException(String, Metadata),
    RecordHistory(HistoryEntry),
    Notify(CallerNotice),
}

/// Immutable context of a single write call.
#[derive(Clone, Debug)]
pub struct Lifecycle {
    id: CorrelationId,
    operation: Operation,
    message: String,
    action_type: Option<ActionType>,
    toast: bool,
    modal: bool,
}

impl Lifecycle {
    pub fn new(id: CorrelationId, operation: Operation, options: &TxnOptions) -> Self {
        Self {
            id,
            operation,
            message: options.message().to_string(),
            action_type: options.action_type(),
            toast: !options.toast_disabled(),
            modal: !options.modal_disabled(),
        }
    }

    pub fn id(&self) -> &CorrelationId { &self.id }

    pub fn operation(&self) -> Operation { self.operation }

    pub fn message(&self) -> &str { &self.message }

    pub fn action_type(&self) -> Option<ActionType> { self.action_type }

    pub fn toast_id(&self, phase: Phase) -> ToastId { ToastId::new(phase, self.id.clone()) }

    fn metadata(&self, message: &str) -> Metadata {
        let mut metadata = Metadata::new();
        metadata.insert("message".to_string(), message.to_string());
        if let Some(action_type) = self.action_type {
            metadata.insert("actionType".to_string(), action_type.to_string());
        }
        metadata
    }

    fn submission_title(&self) -> &'static str {
        match self.operation {
            Operation::ContractWrite => "Transaction pending",
            Operation::ValueSend => "Transaction submitted",
        }
    }
}

/// Effect list builder honoring the toast/modal switches.
struct Effects<'a> {
    ctx: &'a Lifecycle,
    effects: Vec<Effect>,
}

impl<'a> Effects<'a> {
    fn new(ctx: &'a Lifecycle) -> Self { Self { ctx, effects: Vec::new() } }

    fn dismiss_toast(&mut self, phase: Phase) -> &mut Self {
        if self.ctx.toast {
            self.effects.push(Effect::DismissToast(self.ctx.toast_id(phase)));
        }
        self
    }

    fn show_toast(&mut self, toast: Toast) -> &mut Self {
        if self.ctx.toast {
            self.effects.push(Effect::ShowToast(self.ctx.toast_id(toast.phase), toast));
        }
        self
    }

    fn close_modal(&mut self, name: ModalName) -> &mut Self {
        if self.ctx.modal {
            self.effects.push(Effect::Modal(ModalAction::Close(name)));
        }
        self
    }

    fn open_modal(&mut self, name: ModalName, data: ModalData) -> &mut Self {
        if self.ctx.modal {
            self.effects.push(Effect::Modal(ModalAction::Open(name, data)));
        }
        self
    }

    fn push(&mut self, effect: Effect) -> &mut Self {
        self.effects.push(effect);
        self
    }

    fn finish(self) -> Vec<Effect> { self.effects }
}

/// Applies `event` to `state`.
///
/// Returns `None` if the event has no transition from `state`, e.g. any
/// event after a terminal state.
pub fn transition(
    ctx: &Lifecycle,
    state: &LifecycleState,
    event: LifecycleEvent,
    now: DateTime<Utc>,
) -> Option<(LifecycleState, Vec<Effect>)> {
    let mut fx = Effects::new(ctx);
    let next = match (state, event) {
        (LifecycleState::Idle, LifecycleEvent::Loading) => {
            let mut metadata = ctx.metadata(&ctx.message);
            metadata.insert("operation".to_string(), ctx.operation.to_string());
            fx.show_toast(Toast::sticky(
                Phase::Loading,
                "Waiting for wallet",
                "waiting for wallet action",
                None,
            ))
            .open_modal(ModalName::Loading, ModalData::Loading)
            .push(Effect::Track("transaction_started", metadata))
            .push(Effect::Notify(CallerNotice::Loading));
            LifecycleState::Loading
        },
        (LifecycleState::Loading, LifecycleEvent::Submission(hash)) => {
            fx.dismiss_toast(Phase::Loading)
                .show_toast(Toast::sticky(
                    Phase::Submission,
                    ctx.submission_title(),
                    "waiting for confirmation",
                    Some(hash),
                ))
                .close_modal(ModalName::Loading)
                .open_modal(ModalName::Submission, ModalData::Submission { hash })
                .push(Effect::Notify(CallerNotice::Submission(hash)));
            LifecycleState::Submitting { hash }
        },
        (
            LifecycleState::Loading | LifecycleState::Submitting { .. },
            LifecycleEvent::Success(hash),
        ) => {
            let mut metadata = ctx.metadata(&ctx.message);
            metadata.insert("hash".to_string(), hash.to_string());
            metadata.insert("operation".to_string(), ctx.operation.to_string());
            fx.dismiss_toast(Phase::Loading)
                .dismiss_toast(Phase::Submission)
                .show_toast(Toast::timed(
                    Phase::Success,
                    "Transaction Success",
                    Some("transaction successfully submitted".to_string()),
                    Some(hash),
                ))
                .close_modal(ModalName::Loading)
                .close_modal(ModalName::Submission)
                .open_modal(ModalName::Success, ModalData::Success { hash })
                .push(Effect::RecordHistory(HistoryEntry {
                    hash,
                    description: ctx.message.clone(),
                    action_type: ctx.action_type,
                    timestamp: now,
                }))
                .push(Effect::Track("transaction_success", metadata))
                .push(Effect::Notify(CallerNotice::Success(hash)));
            LifecycleState::Success { hash }
        },
        (
            LifecycleState::Idle | LifecycleState::Loading | LifecycleState::Submitting { .. },
            LifecycleEvent::Error(failure),
        ) => {
            let kind = failure.kind();
            let detail = if failure.message.is_empty() {
                "unknown error".to_string()
            } else {
                failure.message.clone()
            };
            let (toast, modal_message) = if kind == ErrorKind::UserRejected {
                (
                    Toast::timed(Phase::Error, "User rejected txn", None, None),
                    "User rejected transaction".to_string(),
                )
            } else {
                (
                    Toast::timed(Phase::Error, "Transaction failed", Some(detail.clone()), failure.hash),
                    detail,
                )
            };

            let mut track = ctx.metadata(&failure.message);
            track.insert("operation".to_string(), ctx.operation.to_string());

            fx.dismiss_toast(Phase::Loading)
                .dismiss_toast(Phase::Submission)
                .show_toast(toast)
                .close_modal(ModalName::Loading)
                .close_modal(ModalName::Submission)
                .open_modal(
                    ModalName::Error,
                    ModalData::Error { hash: failure.hash, message: modal_message },
                )
                .push(Effect::Track("transaction_failed", track));
            if !kind.is_expected() {
                fx.push(Effect::CaptureException(
                    failure.message.clone(),
                    ctx.metadata(&ctx.message),
                ));
            }
            fx.push(Effect::Notify(CallerNotice::Error(failure.clone())));
            LifecycleState::Error { failure }
        },
        _ => return None,
    };
    Some((next, fx.finish()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(options: &TxnOptions) -> Lifecycle {
        Lifecycle::new(CorrelationId::generate(options.message()), Operation::ContractWrite, options)
    }

    fn modal_actions(effects: &[Effect]) -> Vec<ModalAction> {
        effects
            .iter()
            .filter_map(|e| match e {
                Effect::Modal(action) => Some(action.clone()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_happy_path() {
        let options = TxnOptions::new("Supply HONEY").with_action_type(ActionType::Supply);
        let ctx = ctx(&options);
        let hash = TxHash::repeat_byte(0xab);
        let now = Utc::now();

        let (state, effects) =
            transition(&ctx, &LifecycleState::Idle, LifecycleEvent::Loading, now).unwrap();
        assert_eq!(state, LifecycleState::Loading);
        assert_eq!(
            modal_actions(&effects),
            vec![ModalAction::Open(ModalName::Loading, ModalData::Loading)]
        );
        assert_eq!(effects.last(), Some(&Effect::Notify(CallerNotice::Loading)));

        let (state, effects) =
            transition(&ctx, &state, LifecycleEvent::Submission(hash), now).unwrap();
        assert_eq!(state, LifecycleState::Submitting { hash });
        assert_eq!(effects[0], Effect::DismissToast(ctx.toast_id(Phase::Loading)));
        assert!(matches!(&effects[1], Effect::ShowToast(id, toast)
            if id.phase() == Phase::Submission && toast.title == "Transaction pending"));

        let (state, effects) = transition(&ctx, &state, LifecycleEvent::Success(hash), now).unwrap();
        assert_eq!(state, LifecycleState::Success { hash });
        assert_eq!(
            modal_actions(&effects),
            vec![
                ModalAction::Close(ModalName::Loading),
                ModalAction::Close(ModalName::Submission),
                ModalAction::Open(ModalName::Success, ModalData::Success { hash }),
            ]
        );
        let history: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::RecordHistory(entry) => Some(entry.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(
            history,
            vec![HistoryEntry {
                hash,
                description: "Supply HONEY".to_string(),
                action_type: Some(ActionType::Supply),
                timestamp: now,
            }]
        );
        assert!(effects.iter().any(|e| matches!(e, Effect::Track("transaction_success", m)
            if m.get("hash") == Some(&hash.to_string())
                && m.get("actionType").map(String::as_str) == Some("supply"))));
        assert!(state.is_terminal());
    }

    #[test]
    fn test_user_rejected() {
        let ctx = ctx(&TxnOptions::new("Swap"));
        let failure = TxnFailure::new("User rejected the request.");
        let (state, effects) = transition(
            &ctx,
            &LifecycleState::Loading,
            LifecycleEvent::Error(failure.clone()),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(state, LifecycleState::Error { failure });
        assert!(!effects.iter().any(|e| matches!(e, Effect::CaptureException(..))));
        assert!(effects.iter().any(|e| matches!(e, Effect::ShowToast(_, t) if t.title == "User rejected txn")));
        assert!(modal_actions(&effects).contains(&ModalAction::Open(
            ModalName::Error,
            ModalData::Error { hash: None, message: "User rejected transaction".to_string() }
        )));
    }

    #[test]
    fn test_generic_error_captured() {
        let ctx = ctx(&TxnOptions::new("Repay").with_action_type(ActionType::Repay));
        let hash = TxHash::repeat_byte(3);
        let failure = TxnFailure::new("execution reverted").with_hash(hash);
        let (_, effects) = transition(
            &ctx,
            &LifecycleState::Submitting { hash },
            LifecycleEvent::Error(failure),
            Utc::now(),
        )
        .unwrap();

        let captured: Vec<_> = effects
            .iter()
            .filter_map(|e| match e {
                Effect::CaptureException(message, metadata) => Some((message, metadata)),
                _ => None,
            })
            .collect();
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].0, "execution reverted");
        assert_eq!(captured[0].1.get("message").map(String::as_str), Some("Repay"));
        assert_eq!(captured[0].1.get("actionType").map(String::as_str), Some("repay"));
        assert!(effects.iter().any(|e| matches!(e, Effect::ShowToast(_, t)
            if t.title == "Transaction failed" && t.hash == Some(hash))));
    }

    #[test]
    fn test_insufficient_funds_not_captured() {
        let ctx = ctx(&TxnOptions::new("Send"));
        let (_, effects) = transition(
            &ctx,
            &LifecycleState::Loading,
            LifecycleEvent::Error(TxnFailure::new("insufficient funds for gas * price + value")),
            Utc::now(),
        )
        .unwrap();
        assert!(!effects.iter().any(|e| matches!(e, Effect::CaptureException(..))));
    }

    #[test]
    fn test_empty_error_message() {
        let ctx = ctx(&TxnOptions::new("Vote"));
        let (_, effects) = transition(
            &ctx,
            &LifecycleState::Loading,
            LifecycleEvent::Error(TxnFailure::new("")),
            Utc::now(),
        )
        .unwrap();
        assert!(modal_actions(&effects).contains(&ModalAction::Open(
            ModalName::Error,
            ModalData::Error { hash: None, message: "unknown error".to_string() }
        )));
    }

    #[test]
    fn test_error_before_loading() {
        let ctx = ctx(&TxnOptions::new("Vote"));
        let failure = TxnFailure::new("wallet not connected");
        let (state, effects) = transition(
            &ctx,
            &LifecycleState::Idle,
            LifecycleEvent::Error(failure.clone()),
            Utc::now(),
        )
        .unwrap();

        assert_eq!(state, LifecycleState::Error { failure: failure.clone() });
        assert!(modal_actions(&effects).contains(&ModalAction::Open(
            ModalName::Error,
            ModalData::Error { hash: None, message: "wallet not connected".to_string() }
        )));
        assert!(effects.iter().any(|e| matches!(e, Effect::CaptureException(m, _) if m == "wallet not connected")));
        assert_eq!(effects.last(), Some(&Effect::Notify(CallerNotice::Error(failure))));
    }

    #[test]
    fn test_invalid_transitions() {
        let ctx = ctx(&TxnOptions::new("Stake"));
        let hash = TxHash::repeat_byte(9);
        let now = Utc::now();
        let terminal = LifecycleState::Success { hash };

        assert!(transition(&ctx, &terminal, LifecycleEvent::Loading, now).is_none());
        assert!(transition(&ctx, &terminal, LifecycleEvent::Success(hash), now).is_none());
        assert!(transition(&ctx, &terminal, LifecycleEvent::Error(TxnFailure::new("x")), now).is_none());
        assert!(transition(&ctx, &LifecycleState::Idle, LifecycleEvent::Success(hash), now).is_none());
        assert!(transition(&ctx, &LifecycleState::Loading, LifecycleEvent::Loading, now).is_none());
        assert!(
            transition(&ctx, &LifecycleState::Submitting { hash }, LifecycleEvent::Submission(hash), now)
                .is_none()
        );
    }

    #[test]
    fn test_disabled_toast_and_modal() {
        let options = TxnOptions::new("Claim").disable_toast(true).disable_modal(true);
        let ctx = ctx(&options);
        let hash = TxHash::repeat_byte(4);
        let (_, effects) =
            transition(&ctx, &LifecycleState::Loading, LifecycleEvent::Success(hash), Utc::now())
                .unwrap();

        assert!(!effects.iter().any(|e| matches!(
            e,
            Effect::ShowToast(..) | Effect::DismissToast(..) | Effect::Modal(..)
        )));
        assert!(effects.iter().any(|e| matches!(e, Effect::RecordHistory(..))));
        assert!(effects.iter().any(|e| matches!(e, Effect::Track(..))));
        assert!(effects.iter().any(|e| matches!(e, Effect::Notify(CallerNotice::Success(h)) if *h == hash)));
    }

    #[test]
    fn test_value_send_submission_title() {
        let options = TxnOptions::new("Fund");
        let ctx = Lifecycle::new(CorrelationId::generate("Fund"), Operation::ValueSend, &options);
        let (_, effects) = transition(
            &ctx,
            &LifecycleState::Loading,
            LifecycleEvent::Submission(TxHash::ZERO),
            Utc::now(),
        )
        .unwrap();
        assert!(effects.iter().any(|e| matches!(e, Effect::ShowToast(_, t) if t.title == "Transaction submitted")));
    }
}
