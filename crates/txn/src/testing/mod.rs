//! Test doubles and a local node environment.

mod primitive;
mod recorder;

use alloy::{
    node_bindings::{Anvil, AnvilInstance},
    primitives::Address,
    providers::{DynProvider, Provider, ProviderBuilder},
};
pub use primitive::{ManualCall, ManualPrimitive, Scripted};
pub use recorder::{Call, Recorder};

use crate::Chain;

/// Local anvil node with funded, unlocked accounts.
pub struct TestChain {
    anvil: AnvilInstance,
    pub provider: DynProvider,
}

impl TestChain {
    pub fn new() -> Self {
        let anvil = Anvil::new().spawn();
        let provider = ProviderBuilder::new().connect_http(anvil.endpoint_url()).erased();
        Self { anvil, provider }
    }

    /// Unlocked account with 10000 native units.
    pub fn account(&self, idx: usize) -> Address { self.anvil.addresses()[idx] }

    pub fn chain(&self) -> Chain { Chain::custom(self.anvil.chain_id(), "Anvil", "http://localhost") }
}

impl Default for TestChain {
    fn default() -> Self { Self::new() }
}
