use thiserror::Error;

/// Errors constructing requests or parsing caller input.
///
/// The transaction lifecycle itself never fails with this type: failed
/// writes are reported as [`crate::state::LifecycleState::Error`].
#[derive(Debug, Error)]
pub enum TxnError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(#[from] alloy::primitives::utils::UnitsError),

    #[error("invalid hex data: {0}")]
    InvalidHex(#[from] alloy::primitives::hex::FromHexError),
}

/// Wallet message fragments that mark a request rejected by the user.
const USER_REJECTED_MARKERS: [&str; 2] =
    ["User rejected the request.", "You Rejected the transaction."];

const INSUFFICIENT_FUNDS_MARKER: &str = "insufficient funds";

/// Classification of a failed write by its error message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// User declined the request in the wallet.
    UserRejected,
    /// Account cannot cover value plus gas.
    InsufficientFunds,
    Generic,
}

impl ErrorKind {
    pub fn classify(message: &str) -> Self {
        if USER_REJECTED_MARKERS.iter().any(|m| message.contains(m)) {
            ErrorKind::UserRejected
        } else if message.to_lowercase().contains(INSUFFICIENT_FUNDS_MARKER) {
            ErrorKind::InsufficientFunds
        } else {
            ErrorKind::Generic
        }
    }

    /// Expected failures are shown to the user but never reported as
    /// exceptions.
    pub fn is_expected(&self) -> bool { !matches!(self, ErrorKind::Generic) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(ErrorKind::classify("User rejected the request."), ErrorKind::UserRejected);
        assert_eq!(
            ErrorKind::classify("MetaMask Tx Signature: User rejected the request. Details: ..."),
            ErrorKind::UserRejected
        );
        assert_eq!(ErrorKind::classify("You Rejected the transaction."), ErrorKind::UserRejected);
        assert_eq!(
            ErrorKind::classify("Insufficient funds for gas * price + value"),
            ErrorKind::InsufficientFunds
        );
        assert_eq!(ErrorKind::classify("execution reverted"), ErrorKind::Generic);
        assert_eq!(ErrorKind::classify(""), ErrorKind::Generic);
    }

    #[test]
    fn test_expected() {
        assert!(ErrorKind::UserRejected.is_expected());
        assert!(ErrorKind::InsufficientFunds.is_expected());
        assert!(!ErrorKind::Generic.is_expected());
    }
}
