use alloy::primitives::TxHash;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ActionType;

/// Recent transaction record appended on successful writes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    /// Transaction hash.
    pub hash: TxHash,

    /// Caller-supplied message describing the transaction.
    pub description: String,

    /// Business operation, if the caller tagged one.
    pub action_type: Option<ActionType>,

    /// Time the success was observed.
    pub timestamp: DateTime<Utc>,
}
