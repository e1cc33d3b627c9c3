use futures::channel::mpsc::{self, UnboundedReceiver, UnboundedSender};
use parking_lot::Mutex;

use crate::{
    primitive::{LifecycleSender, WritePrimitive, emit},
    state::LifecycleEvent,
};

/// Primitive replaying the same event script for every request.
pub struct Scripted<R> {
    script: Vec<LifecycleEvent>,
    requests: Mutex<Vec<R>>,
}

impl<R> Scripted<R> {
    pub fn new(script: Vec<LifecycleEvent>) -> Self { Self { script, requests: Mutex::new(Vec::new()) } }

    /// Requests submitted so far.
    pub fn requests(&self) -> Vec<R>
    where
        R: Clone,
    {
        self.requests.lock().clone()
    }
}

impl<R: Send> WritePrimitive for Scripted<R> {
    type Request = R;

    async fn submit(&self, request: R, events: LifecycleSender) {
        self.requests.lock().push(request);
        for event in &self.script {
            emit(&events, event.clone());
        }
    }
}

/// Submitted request with the event channel of its call.
pub struct ManualCall<R> {
    pub request: R,
    events: LifecycleSender,
}

impl<R> ManualCall<R> {
    pub fn emit(&self, event: LifecycleEvent) { emit(&self.events, event) }

    /// Ends the call: the coordinator's `write` returns once every
    /// [`ManualCall`] of it is dropped or finished.
    pub fn finish(self) {}
}

/// Primitive handing every call over to the test, which then emits events
/// step by step.
pub struct ManualPrimitive<R> {
    calls: UnboundedSender<ManualCall<R>>,
}

impl<R> ManualPrimitive<R> {
    pub fn new() -> (Self, UnboundedReceiver<ManualCall<R>>) {
        let (calls, rx) = mpsc::unbounded();
        (Self { calls }, rx)
    }
}

impl<R: Send> WritePrimitive for ManualPrimitive<R> {
    type Request = R;

    async fn submit(&self, request: R, events: LifecycleSender) {
        if self.calls.unbounded_send(ManualCall { request, events }).is_err() {
            tracing::debug!("manual primitive receiver dropped");
        }
    }
}
