//! Canonical Safe transaction construction and hashing
//!
//! The transaction hash is never computed locally here. It is requested from the
//! account's own `getTransactionHash`, so the result always agrees byte-for-byte
//! with what the verifier checks at execution time.

use alloy::primitives::{Address, B256, U256};
use tracing::{debug, info};

use crate::contracts::ISafe;
use crate::encoding::{encode_multisend_call, ExportBundle};
use crate::error::{Error, Result};
use crate::reader::{call_typed, ChainReader};
use crate::types::{MetaTransaction, Operation, SafeTransactionParams};

/// A transaction record together with the verifier's hash of it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreparedTransaction {
    pub params: SafeTransactionParams,
    pub hash: B256,
}

impl PreparedTransaction {
    /// Packages the record for hand-off to other signers
    pub fn export(&self, safe_account: Address, transactions: Vec<MetaTransaction>) -> ExportBundle {
        ExportBundle {
            transactions,
            safe_account,
            safe_transaction: self.params.clone(),
            safe_transaction_hash: self.hash,
        }
    }
}

/// Builds the unpaid transaction record for `txs` at `nonce`.
///
/// One entry is executed directly as a `Call`. Several entries are packed into
/// `multiSend` calldata and delegate-called into `batch_executor` with zero value;
/// each packed entry is a `Call`, as the call-only executor rejects delegate calls.
pub fn build_transaction(
    txs: &[MetaTransaction],
    batch_executor: Address,
    nonce: U256,
) -> Result<SafeTransactionParams> {
    let tx = match txs {
        [] => return Err(Error::NoTransactions),
        [single] => single.clone().with_operation(Operation::Call),
        many => {
            let calls: Vec<MetaTransaction> = many
                .iter()
                .map(|tx| tx.clone().with_operation(Operation::Call))
                .collect();
            MetaTransaction::delegate_call(batch_executor, encode_multisend_call(&calls))
        }
    };

    Ok(SafeTransactionParams::unpaid(tx, nonce))
}

/// Prepares transactions for one Safe account against a [`ChainReader`]
#[derive(Debug, Clone)]
pub struct TransactionHasher<R> {
    reader: R,
    batch_executor: Address,
    account: Option<Address>,
}

impl<R> TransactionHasher<R>
where
    R: ChainReader + Sync,
{
    /// Creates a hasher with no account bound yet
    pub fn new(reader: R, batch_executor: Address) -> Self {
        Self {
            reader,
            batch_executor,
            account: None,
        }
    }

    /// Binds the target Safe account
    pub fn with_account(mut self, account: Address) -> Self {
        self.account = Some(account);
        self
    }

    /// Returns the bound account.
    pub fn account(&self) -> Result<Address> {
        self.account.ok_or(Error::MissingAccount)
    }

    /// Reads the account's current nonce
    pub async fn nonce(&self) -> Result<U256> {
        let account = self.account()?;
        call_typed(&self.reader, account, ISafe::nonceCall {}).await
    }

    /// Asks the verifier for the hash of `params`
    pub async fn transaction_hash(&self, params: &SafeTransactionParams) -> Result<B256> {
        let account = self.account()?;
        call_typed(&self.reader, account, params.hash_call()).await
    }

    /// Builds the transaction record for `txs` at the current nonce and obtains its
    /// canonical hash.
    ///
    /// Precondition failures are reported before any chain read.
    pub async fn prepare(&self, txs: &[MetaTransaction]) -> Result<PreparedTransaction> {
        let account = self.account()?;
        if txs.is_empty() {
            return Err(Error::NoTransactions);
        }

        let nonce = self.nonce().await?;
        debug!(%account, %nonce, "read Safe nonce");

        let params = build_transaction(txs, self.batch_executor, nonce)?;
        let hash = self.transaction_hash(&params).await?;

        info!(%account, %nonce, %hash, calls = txs.len(), "prepared Safe transaction");
        Ok(PreparedTransaction { params, hash })
    }
}
