//! Transaction records for Safe execution

use alloy::primitives::{Address, Bytes, U256};
use alloy::sol_types::SolCall;
use serde::{Deserialize, Serialize};

use super::{decimal, Operation};
use crate::contracts::{IERC20, ISafe};

/// A single sub-transaction: target, value, calldata and operation
///
/// Immutable once built; the builder-style `with_*` methods consume and return a new
/// value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaTransaction {
    /// Target address
    pub to: Address,
    /// Value to send (in wei)
    #[serde(with = "decimal")]
    pub value: U256,
    /// Calldata
    pub data: Bytes,
    /// Operation type
    pub operation: Operation,
}

impl MetaTransaction {
    /// Creates a new `Call` with the given parameters
    pub fn new(to: Address, value: U256, data: impl Into<Bytes>) -> Self {
        Self {
            to,
            value,
            data: data.into(),
            operation: Operation::Call,
        }
    }

    /// Creates a contract call with zero value
    pub fn call(to: Address, data: impl Into<Bytes>) -> Self {
        Self::new(to, U256::ZERO, data)
    }

    /// Creates a delegate call
    pub fn delegate_call(to: Address, data: impl Into<Bytes>) -> Self {
        Self::new(to, U256::ZERO, data).with_operation(Operation::DelegateCall)
    }

    /// Plain native-currency transfer with empty calldata
    pub fn eth_transfer(to: Address, value: U256) -> Self {
        Self::new(to, value, Bytes::new())
    }

    /// ERC-20 `transfer(to, amount)` on `token`
    pub fn erc20_transfer(token: Address, to: Address, amount: U256) -> Self {
        Self::typed(token, IERC20::transferCall { to, amount })
    }

    /// Wraps any `sol!`-generated call type
    pub fn typed<C: SolCall>(to: Address, call: C) -> Self {
        Self::call(to, call.abi_encode())
    }

    /// Sets the operation type
    pub fn with_operation(mut self, operation: Operation) -> Self {
        self.operation = operation;
        self
    }
}

/// The canonical Safe transaction submitted to the verifier and executor.
///
/// Field order and naming follow the on-chain `SafeTx` type. A record is paired
/// with the hash computed for it; changing any field after hashing invalidates
/// that hash, so the struct is only ever rebuilt, never patched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeTransactionParams {
    /// Target address
    pub to: Address,
    /// Value to send
    #[serde(with = "decimal")]
    pub value: U256,
    /// Calldata
    pub data: Bytes,
    /// Operation type
    pub operation: Operation,
    /// Gas limit for the Safe transaction
    #[serde(with = "decimal")]
    pub safe_tx_gas: U256,
    /// Base gas (overhead)
    #[serde(with = "decimal")]
    pub base_gas: U256,
    /// Gas price for refund calculation
    #[serde(with = "decimal")]
    pub gas_price: U256,
    /// Token used for gas refund (address(0) for ETH)
    pub gas_token: Address,
    /// Address to receive gas refund
    pub refund_receiver: Address,
    /// Safe nonce
    #[serde(with = "decimal")]
    pub nonce: U256,
}

impl SafeTransactionParams {
    /// Builds a record with every gas and refund field zeroed.
    pub fn unpaid(tx: MetaTransaction, nonce: U256) -> Self {
        Self {
            to: tx.to,
            value: tx.value,
            data: tx.data,
            operation: tx.operation,
            safe_tx_gas: U256::ZERO,
            base_gas: U256::ZERO,
            gas_price: U256::ZERO,
            gas_token: Address::ZERO,
            refund_receiver: Address::ZERO,
            nonce,
        }
    }

    /// `getTransactionHash(...)` call carrying all ten fields
    pub fn hash_call(&self) -> ISafe::getTransactionHashCall {
        ISafe::getTransactionHashCall {
            to: self.to,
            value: self.value,
            data: self.data.clone(),
            operation: self.operation.as_u8(),
            safeTxGas: self.safe_tx_gas,
            baseGas: self.base_gas,
            gasPrice: self.gas_price,
            gasToken: self.gas_token,
            refundReceiver: self.refund_receiver,
            _nonce: self.nonce,
        }
    }

    /// `execTransaction(...)` call with the aggregated signature bytes
    pub fn exec_call(&self, signatures: Bytes) -> ISafe::execTransactionCall {
        ISafe::execTransactionCall {
            to: self.to,
            value: self.value,
            data: self.data.clone(),
            operation: self.operation.as_u8(),
            safeTxGas: self.safe_tx_gas,
            baseGas: self.base_gas,
            gasPrice: self.gas_price,
            gasToken: self.gas_token,
            refundReceiver: self.refund_receiver,
            signatures,
        }
    }
}
