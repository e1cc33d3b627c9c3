use std::sync::Arc;

use chrono::Utc;
use dashmap::DashMap;
use futures::{StreamExt, channel::mpsc};
use parking_lot::RwLock;
use serde::Serialize;

use crate::{
    Chain,
    collab::{Analytics, ErrorReporter, History, Noop, Presenter},
    options::TxnOptions,
    primitive::WritePrimitive,
    state::{self, Effect, Lifecycle, LifecycleEvent, LifecycleState, ModalName, ModalSet, ModalView, Phase},
    types::{ContractWrite, CorrelationId, Operation, ValueSend},
};

/// Lifecycle of a single write call: context, current state and its own
/// modal-visibility set.
#[derive(Clone, Debug)]
pub struct Session {
    lifecycle: Lifecycle,
    state: LifecycleState,
    modals: ModalSet,
    active: bool,
}

impl Session {
    fn new(lifecycle: Lifecycle) -> Self {
        Self { lifecycle, state: LifecycleState::Idle, modals: ModalSet::default(), active: true }
    }

    pub fn id(&self) -> &CorrelationId { self.lifecycle.id() }

    pub fn operation(&self) -> Operation { self.lifecycle.operation() }

    pub fn state(&self) -> &LifecycleState { &self.state }

    pub fn modals(&self) -> &ModalSet { &self.modals }

    /// Whether the coordinator is still processing events of this call.
    ///
    /// `false` once the primitive finished or the `write` future was dropped,
    /// whatever state the call ended in.
    pub fn is_active(&self) -> bool { self.active }

    /// Rendered modal surface of this session.
    pub fn modal_views(&self, chain: &Chain) -> Vec<ModalView> {
        self.modals.views(self.lifecycle.message(), chain)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            id: self.id().clone(),
            operation: self.operation(),
            state: self.state.clone(),
            open_modals: self.modals.open(),
        }
    }
}

/// Serializable outline of a [`Session`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSummary {
    pub id: CorrelationId,
    pub operation: Operation,
    pub state: LifecycleState,
    pub open_modals: Vec<ModalName>,
}

/// Boolean view of the latest session of an operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusFlags {
    pub is_loading: bool,
    pub is_submitting: bool,
    pub is_success: bool,
    pub is_error: bool,
}

impl From<&LifecycleState> for StatusFlags {
    fn from(state: &LifecycleState) -> Self {
        Self {
            is_loading: matches!(state, LifecycleState::Loading),
            is_submitting: matches!(state, LifecycleState::Submitting { .. }),
            is_success: matches!(state, LifecycleState::Success { .. }),
            is_error: matches!(state, LifecycleState::Error { .. }),
        }
    }
}

/// Marks the session inactive when event processing ends, including when
/// the `write` future is dropped mid-flight.
struct ActiveGuard<'a> {
    sessions: &'a DashMap<CorrelationId, Session>,
    id: CorrelationId,
}

impl Drop for ActiveGuard<'_> {
    fn drop(&mut self) {
        if let Some(mut session) = self.sessions.get_mut(&self.id) {
            session.active = false;
            if !session.state.is_terminal() {
                tracing::debug!(id = %self.id, state = session.state.name(), "write abandoned");
            }
        }
    }
}

#[derive(Debug, Default)]
struct Latest {
    contract_write: Option<CorrelationId>,
    value_send: Option<CorrelationId>,
    any: Option<CorrelationId>,
}

impl Latest {
    fn get(&self, operation: Operation) -> Option<&CorrelationId> {
        match operation {
            Operation::ContractWrite => self.contract_write.as_ref(),
            Operation::ValueSend => self.value_send.as_ref(),
        }
    }

    fn set(&mut self, operation: Operation, id: CorrelationId) {
        match operation {
            Operation::ContractWrite => self.contract_write = Some(id.clone()),
            Operation::ValueSend => self.value_send = Some(id.clone()),
        }
        self.any = Some(id);
    }

    fn contains(&self, id: &CorrelationId) -> bool {
        [&self.contract_write, &self.value_send, &self.any]
            .into_iter()
            .any(|latest| latest.as_ref() == Some(id))
    }
}

/// Transaction lifecycle coordinator.
///
/// Forwards writes to the contract-write primitive `W` and the value-send
/// primitive `V`, and turns their lifecycle events into session state,
/// toasts, modals, history entries, analytics events, exception reports
/// and caller callbacks.
///
/// Every call gets its own [`Session`] keyed by a fresh [`CorrelationId`],
/// so concurrent calls never share modal state. The latest call of each
/// operation backs [`TxnCoordinator::status`] and
/// [`TxnCoordinator::modal_surface`].
pub struct TxnCoordinator<W, V> {
    chain: Chain,
    options: TxnOptions,
    writer: W,
    sender: V,
    presenter: Arc<dyn Presenter>,
    history: Arc<dyn History>,
    analytics: Arc<dyn Analytics>,
    reporter: Arc<dyn ErrorReporter>,
    sessions: DashMap<CorrelationId, Session>,
    latest: RwLock<Latest>,
}

impl<W, V> TxnCoordinator<W, V>
where
    W: WritePrimitive<Request = ContractWrite>,
    V: WritePrimitive<Request = ValueSend>,
{
    /// Creates a coordinator with no-op collaborators.
    pub fn new(chain: Chain, options: TxnOptions, writer: W, sender: V) -> Self {
        Self {
            chain,
            options,
            writer,
            sender,
            presenter: Arc::new(Noop),
            history: Arc::new(Noop),
            analytics: Arc::new(Noop),
            reporter: Arc::new(Noop),
            sessions: DashMap::new(),
            latest: RwLock::new(Latest::default()),
        }
    }

    pub fn with_presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = presenter;
        self
    }

    pub fn with_history(mut self, history: Arc<dyn History>) -> Self {
        self.history = history;
        self
    }

    pub fn with_analytics(mut self, analytics: Arc<dyn Analytics>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    pub fn chain(&self) -> &Chain { &self.chain }

    pub fn options(&self) -> &TxnOptions { &self.options }

    /// Sends a contract write and follows it to a terminal state.
    ///
    /// Never fails: a failed write ends in [`LifecycleState::Error`].
    pub async fn write(&self, request: ContractWrite) -> Session {
        self.run(&self.writer, Operation::ContractWrite, request).await
    }

    /// Sends a native value transfer and follows it to a terminal state.
    pub async fn fund_write(&self, request: ValueSend) -> Session {
        self.run(&self.sender, Operation::ValueSend, request).await
    }

    /// Snapshot of a session.
    pub fn session(&self, id: &CorrelationId) -> Option<Session> {
        self.sessions.get(id).map(|s| s.value().clone())
    }

    /// Flags of the latest session of the operation, all `false` before the
    /// first call.
    pub fn status(&self, operation: Operation) -> StatusFlags {
        self.latest
            .read()
            .get(operation)
            .and_then(|id| self.sessions.get(id))
            .map(|s| StatusFlags::from(&s.state))
            .unwrap_or_default()
    }

    /// Modal surface of the latest session.
    pub fn modal_surface(&self) -> Vec<ModalView> {
        self.latest
            .read()
            .any
            .as_ref()
            .and_then(|id| self.sessions.get(id))
            .map(|s| s.modal_views(&self.chain))
            .unwrap_or_else(|| ModalSet::default().views(self.options.message(), &self.chain))
    }

    /// Closes a modal on user request. Returns `false` for unknown sessions.
    pub fn close_modal(&self, id: &CorrelationId, name: ModalName) -> bool {
        match self.sessions.get_mut(id) {
            Some(mut session) => {
                session.modals.reduce(state::ModalAction::Close(name));
                true
            },
            None => false,
        }
    }

    /// Drops sessions other than the latest ones that are terminal or no
    /// longer processing events.
    pub fn prune(&self) -> usize {
        let latest = self.latest.read();
        let before = self.sessions.len();
        self.sessions
            .retain(|id, s| latest.contains(id) || (s.active && !s.state.is_terminal()));
        before - self.sessions.len()
    }

    async fn run<P>(&self, primitive: &P, operation: Operation, request: P::Request) -> Session
    where
        P: WritePrimitive,
    {
        let id = CorrelationId::generate(self.options.message());
        let session = Session::new(Lifecycle::new(id.clone(), operation, &self.options));

        self.supersede();
        self.sessions.insert(id.clone(), session.clone());
        self.latest.write().set(operation, id.clone());
        tracing::debug!(%id, %operation, "write started");
        let guard = ActiveGuard { sessions: &self.sessions, id: id.clone() };

        let (events_tx, mut events_rx) = mpsc::unbounded();
        let process = async {
            while let Some(event) = events_rx.next().await {
                self.apply(&id, event);
            }
        };
        futures::join!(primitive.submit(request, events_tx), process);
        drop(guard);

        self.session(&id).unwrap_or(session)
    }

    /// Dismisses the loading toast of a previous call still waiting for
    /// the wallet.
    fn supersede(&self) {
        if self.options.toast_disabled() {
            return;
        }
        let Some(prev) = self.latest.read().any.clone() else {
            return;
        };
        let toast = self
            .sessions
            .get(&prev)
            .filter(|session| session.state == LifecycleState::Loading)
            .map(|session| session.lifecycle.toast_id(Phase::Loading));
        // No guard is held here: the presenter may call back into the coordinator
        if let Some(toast) = toast {
            tracing::debug!(id = %prev, "superseding pending loading toast");
            self.presenter.dismiss(&toast);
        }
    }

    fn apply(&self, id: &CorrelationId, event: LifecycleEvent) {
        let effects = {
            let Some(mut session) = self.sessions.get_mut(id) else {
                return;
            };
            let Some((next, effects)) =
                state::transition(&session.lifecycle, &session.state, event.clone(), Utc::now())
            else {
                tracing::warn!(
                    %id,
                    state = session.state.name(),
                    ?event,
                    "ignoring lifecycle event without transition"
                );
                return;
            };
            tracing::debug!(%id, from = session.state.name(), to = next.name(), "transition");
            if next.is_terminal() {
                tracing::info!(%id, state = next.name(), hash = ?next.hash(), "write finished");
            }
            session.state = next;
            for effect in &effects {
                if let Effect::Modal(action) = effect {
                    session.modals.reduce(action.clone());
                }
            }
            effects
        };
        // Session guard is released: callbacks may query the coordinator
        self.execute(effects);
    }

    fn execute(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::ShowToast(id, toast) => self.presenter.show(&id, &toast),
                Effect::DismissToast(id) => self.presenter.dismiss(&id),
                Effect::Modal(_) => (),
                Effect::Track(event, metadata) => self.analytics.track(event, &metadata),
                Effect::CaptureException(message, metadata) => {
                    self.reporter.capture(&message, &metadata)
                },
                Effect::RecordHistory(entry) => self.history.append(entry),
                Effect::Notify(notice) => self.options.callbacks().notify(&notice),
            }
        }
    }
}
