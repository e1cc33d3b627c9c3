use alloy::{
    primitives::{Address, Bytes, U256, hex, utils::parse_ether},
    rpc::types::{TransactionInput, TransactionRequest},
};
use alloy_sol_types::SolCall;

use crate::error::TxnError;

/// Contract call parameters for [`crate::coordinator::TxnCoordinator::write`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContractWrite {
    from: Option<Address>,
    to: Address,
    calldata: Bytes,
    value: U256,
    gas: Option<u64>,
}

impl ContractWrite {
    pub fn new(to: Address, calldata: Bytes) -> Self {
        Self { from: None, to, calldata, value: U256::ZERO, gas: None }
    }

    /// ABI-encodes the given call against the contract at `to`.
    pub fn call<C: SolCall>(to: Address, call: &C) -> Self { Self::new(to, call.abi_encode().into()) }

    /// Parses `0x`-prefixed (or bare) hex calldata.
    pub fn from_hex(to: Address, calldata: &str) -> Result<Self, TxnError> {
        Ok(Self::new(to, hex::decode(calldata.trim())?.into()))
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn with_value(mut self, value: U256) -> Self {
        self.value = value;
        self
    }

    pub fn with_gas(mut self, gas: u64) -> Self {
        self.gas = Some(gas);
        self
    }

    pub fn from(&self) -> Option<Address> { self.from }

    pub fn to(&self) -> Address { self.to }

    pub fn calldata(&self) -> &Bytes { &self.calldata }

    pub fn value(&self) -> U256 { self.value }

    pub fn gas(&self) -> Option<u64> { self.gas }

    pub fn into_transaction_request(self) -> TransactionRequest {
        let mut tx = TransactionRequest::default()
            .to(self.to)
            .value(self.value)
            .input(TransactionInput::new(self.calldata));
        if let Some(from) = self.from {
            tx = tx.from(from);
        }
        if let Some(gas) = self.gas {
            tx = tx.gas_limit(gas);
        }
        tx
    }
}

/// Native asset transfer parameters for
/// [`crate::coordinator::TxnCoordinator::fund_write`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValueSend {
    from: Option<Address>,
    to: Address,
    value: U256,
}

impl ValueSend {
    pub fn new(to: Address, value: U256) -> Self { Self { from: None, to, value } }

    /// Amount given in whole native units, e.g. `"1.5"`.
    pub fn ether(to: Address, amount: &str) -> Result<Self, TxnError> {
        Ok(Self::new(to, parse_ether(amount.trim())?))
    }

    pub fn with_from(mut self, from: Address) -> Self {
        self.from = Some(from);
        self
    }

    pub fn from(&self) -> Option<Address> { self.from }

    pub fn to(&self) -> Address { self.to }

    pub fn value(&self) -> U256 { self.value }

    pub fn into_transaction_request(self) -> TransactionRequest {
        let tx = TransactionRequest::default().to(self.to).value(self.value);
        match self.from {
            Some(from) => tx.from(from),
            None => tx,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy::primitives::{TxKind, address};
    use alloy_sol_types::sol;

    use super::*;

    sol! {
        function transfer(address to, uint256 amount) external returns (bool);
    }

    const TOKEN: Address = address!("0xFCBD14DC51f0A4d49d5E53C2E0950e0bC26d0Dce");
    const ALICE: Address = address!("0x00000000000000000000000000000000000a11ce");

    #[test]
    fn test_contract_write_call() {
        let write = ContractWrite::call(TOKEN, &transferCall { to: ALICE, amount: U256::from(5) })
            .with_from(ALICE)
            .with_gas(100_000);
        assert_eq!(&write.calldata()[..4], transferCall::SELECTOR.as_slice());

        let tx = write.into_transaction_request();
        assert_eq!(tx.to, Some(TxKind::Call(TOKEN)));
        assert_eq!(tx.from, Some(ALICE));
        assert_eq!(tx.gas, Some(100_000));
        assert_eq!(tx.value, Some(U256::ZERO));
    }

    #[test]
    fn test_contract_write_from_hex() {
        let write = ContractWrite::from_hex(TOKEN, "0xa9059cbb").unwrap();
        assert_eq!(write.calldata().to_vec(), vec![0xa9, 0x05, 0x9c, 0xbb]);
        assert!(ContractWrite::from_hex(TOKEN, "0xzz").is_err());
    }

    #[test]
    fn test_value_send_ether() {
        let send = ValueSend::ether(ALICE, "1.5").unwrap();
        assert_eq!(send.value(), U256::from(1_500_000_000_000_000_000u128));
        assert!(ValueSend::ether(ALICE, "one").is_err());

        let tx = send.into_transaction_request();
        assert_eq!(tx.from, None);
        assert_eq!(tx.to, Some(TxKind::Call(ALICE)));
    }
}
