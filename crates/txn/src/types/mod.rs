mod history;
mod request;

use std::{collections::BTreeMap, fmt::Display, str::FromStr};

pub use history::HistoryEntry;
use rand::Rng;
pub use request::{ContractWrite, ValueSend};
use serde::{Deserialize, Serialize};

/// String-keyed metadata passed to analytics and exception reporting.
pub type Metadata = BTreeMap<String, String>;

/// Number of base-6 digits in the random correlation suffix.
const SUFFIX_DIGITS: usize = 16;

/// Opaque token linking toasts, modals and history of a single
/// transaction attempt.
///
/// Built from the caller-supplied message followed by a random base-6
/// fraction, so two calls with the same message still get distinct IDs.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CorrelationId(String);

impl CorrelationId {
    pub fn generate(message: &str) -> Self {
        let mut rng = rand::rng();
        let mut id = String::with_capacity(message.len() + SUFFIX_DIGITS + 2);
        id.push_str(message);
        id.push_str("0.");
        for _ in 0..SUFFIX_DIGITS {
            id.push(char::from(b'0' + rng.random_range(0..6u8)));
        }
        Self(id)
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl Display for CorrelationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

/// Write primitive a session runs on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    ContractWrite,
    ValueSend,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::ContractWrite => "contract_write",
            Operation::ValueSend => "value_send",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

/// Business operation a transaction performs, recorded in history and
/// analytics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Swap,
    AddLiquidity,
    RemoveLiquidity,
    Supply,
    Withdraw,
    Borrow,
    Repay,
    Stake,
    Unstake,
    ClaimRewards,
    Delegate,
    Vote,
    Transfer,
    Approve,
}

impl ActionType {
    pub const ALL: [ActionType; 14] = [
        ActionType::Swap,
        ActionType::AddLiquidity,
        ActionType::RemoveLiquidity,
        ActionType::Supply,
        ActionType::Withdraw,
        ActionType::Borrow,
        ActionType::Repay,
        ActionType::Stake,
        ActionType::Unstake,
        ActionType::ClaimRewards,
        ActionType::Delegate,
        ActionType::Vote,
        ActionType::Transfer,
        ActionType::Approve,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Swap => "swap",
            ActionType::AddLiquidity => "add_liquidity",
            ActionType::RemoveLiquidity => "remove_liquidity",
            ActionType::Supply => "supply",
            ActionType::Withdraw => "withdraw",
            ActionType::Borrow => "borrow",
            ActionType::Repay => "repay",
            ActionType::Stake => "stake",
            ActionType::Unstake => "unstake",
            ActionType::ClaimRewards => "claim_rewards",
            ActionType::Delegate => "delegate",
            ActionType::Vote => "vote",
            ActionType::Transfer => "transfer",
            ActionType::Approve => "approve",
        }
    }
}

impl Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ActionType {
    type Err = crate::error::TxnError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        ActionType::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| {
                crate::error::TxnError::InvalidArgument(format!("unknown action type: {}", s))
            })
    }
}
