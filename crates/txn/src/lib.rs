//! Transaction lifecycle coordinator.
//!
//! # Overview
//!
//! Wraps wallet write primitives (contract calls and native value transfers)
//! and turns their lifecycle callbacks into a single observable state per
//! call, together with the notification side effects a wallet-connected
//! frontend needs: toasts, modals, transaction history, analytics and
//! exception reporting.
//!
//! Use [`coordinator::TxnCoordinator`] with any pair of
//! [`primitive::WritePrimitive`] implementations, for example
//! [`primitive::ProviderWriter`] and [`primitive::ProviderSender`] on top of
//! an alloy [`alloy::providers::Provider`].
//!
//! Each call runs through the pure [`state::transition`] function, which
//! returns the next [`state::LifecycleState`] plus a list of
//! [`state::Effect`]s; the coordinator executes the effects against the
//! [`collab`] traits.
//!
//! See `./tests` for examples.
//!
//! # Limitations/follow-ups
//!
//! * Presentation is reduced to toast/modal descriptors. Rendering them is up
//!   to the [`collab::Presenter`] implementation.
//!
//! * No retries, timeouts or cancellation are performed; dropping the future
//!   returned by `write` stops event processing for that call.
//!
//! # Features
//!
//! | Feature | Default | Description |
//! | --- | --- | --- |
//! | `display` | yes | Enables table rendering of [`collab::MemoryHistory`]. |
//! | `testing` | yes | Enables [`testing`] module. |
//!
//! # Testing
//!
//! [`testing`] module provides scripted write primitives, recording
//! collaborators and a local anvil node environment.

pub mod collab;
pub mod coordinator;
pub mod error;
pub mod options;
pub mod primitive;
pub mod state;
#[cfg(feature = "testing")]
pub mod testing;
pub mod types;

use alloy::primitives::TxHash;

/// Chain the transactions are sent to, used for block explorer links.
#[derive(Clone, Debug)]
pub struct Chain {
    chain_id: u64,
    explorer_name: String,
    explorer_url: String,
}

impl Chain {
    pub fn mainnet() -> Self {
        Self {
            chain_id: 80094,
            explorer_name: "Berascan".to_string(),
            explorer_url: "https://berascan.com".to_string(),
        }
    }

    pub fn testnet() -> Self {
        Self {
            chain_id: 80069,
            explorer_name: "Beratrail".to_string(),
            explorer_url: "https://testnet.berascan.com".to_string(),
        }
    }

    pub fn custom(
        chain_id: u64,
        explorer_name: impl Into<String>,
        explorer_url: impl Into<String>,
    ) -> Self {
        Self {
            chain_id,
            explorer_name: explorer_name.into(),
            explorer_url: explorer_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn chain_id(&self) -> u64 { self.chain_id }

    pub fn explorer_name(&self) -> &str { &self.explorer_name }

    pub fn explorer_url(&self) -> &str { &self.explorer_url }

    /// Block explorer link of the transaction, `None` without an explorer URL.
    pub fn tx_url(&self, hash: &TxHash) -> Option<String> {
        if self.explorer_url.is_empty() {
            return None;
        }
        Some(format!("{}/tx/{}", self.explorer_url, hash))
    }

    /// Caption of explorer links, e.g. `View Txn on Berascan`.
    pub fn link_text(&self) -> String { format!("View Txn on {}", self.explorer_name) }
}
