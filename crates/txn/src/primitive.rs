use alloy::{providers::Provider, rpc::types::TransactionRequest};
use futures::channel::mpsc::UnboundedSender;

use crate::{
    state::{LifecycleEvent, TxnFailure},
    types::{ContractWrite, ValueSend},
};

/// Ordered lifecycle event channel handed to a [`WritePrimitive`].
pub type LifecycleSender = UnboundedSender<LifecycleEvent>;

/// Wallet/chain write operation reporting its progress as
/// [`LifecycleEvent`]s.
///
/// Implementations emit events in wallet-interaction order and normally end
/// with exactly one `Success` or `Error`; the coordinator tolerates any
/// other sequence by ignoring events without a transition. The returned
/// future completes once no more events will be emitted.
pub trait WritePrimitive: Send + Sync {
    type Request: Send;

    fn submit(
        &self,
        request: Self::Request,
        events: LifecycleSender,
    ) -> impl Future<Output = ()> + Send;
}

/// Contract writes sent through an alloy [`Provider`].
///
/// Signing is left to the provider: use a wallet filler, or a node with
/// unlocked accounts and [`ContractWrite::with_from`].
#[derive(Clone, Debug)]
pub struct ProviderWriter<P> {
    provider: P,
}

impl<P: Provider> ProviderWriter<P> {
    pub fn new(provider: P) -> Self { Self { provider } }
}

impl<P: Provider> WritePrimitive for ProviderWriter<P> {
    type Request = ContractWrite;

    async fn submit(&self, request: ContractWrite, events: LifecycleSender) {
        send_and_watch(&self.provider, request.into_transaction_request(), &events).await
    }
}

/// Native value transfers sent through an alloy [`Provider`].
#[derive(Clone, Debug)]
pub struct ProviderSender<P> {
    provider: P,
}

impl<P: Provider> ProviderSender<P> {
    pub fn new(provider: P) -> Self { Self { provider } }
}

impl<P: Provider> WritePrimitive for ProviderSender<P> {
    type Request = ValueSend;

    async fn submit(&self, request: ValueSend, events: LifecycleSender) {
        send_and_watch(&self.provider, request.into_transaction_request(), &events).await
    }
}

async fn send_and_watch<P: Provider>(
    provider: &P,
    tx: TransactionRequest,
    events: &LifecycleSender,
) {
    emit(events, LifecycleEvent::Loading);

    let pending = match provider.send_transaction(tx).await {
        Ok(pending) => pending,
        Err(err) => {
            emit(events, LifecycleEvent::Error(TxnFailure::new(err.to_string())));
            return;
        },
    };
    let hash = *pending.tx_hash();
    tracing::debug!(%hash, "transaction broadcast");
    emit(events, LifecycleEvent::Submission(hash));

    match pending.get_receipt().await {
        Ok(receipt) if receipt.status() => emit(events, LifecycleEvent::Success(hash)),
        Ok(_) => emit(
            events,
            LifecycleEvent::Error(TxnFailure::new("transaction reverted").with_hash(hash)),
        ),
        Err(err) => {
            emit(events, LifecycleEvent::Error(TxnFailure::new(err.to_string()).with_hash(hash)))
        },
    }
}

/// Sends the event unless the coordinator stopped listening.
pub fn emit(events: &LifecycleSender, event: LifecycleEvent) {
    if events.unbounded_send(event).is_err() {
        tracing::debug!("lifecycle listener dropped, event discarded");
    }
}
