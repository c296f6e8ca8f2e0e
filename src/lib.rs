//! # safe-lite
//!
//! Transaction, address and signature engine for Safe v1.4.1 smart accounts.
//!
//! ## Features
//!
//! - Deterministic proxy address computation (CREATE2) with a factory cross-check
//! - Canonical transaction records hashed by the account's own `getTransactionHash`
//! - Packed `multiSend` batch encoding
//! - Multi-party signature aggregation, including contract (EIP-1271) signatures
//! - Account introspection from raw storage slots
//! - Hex-encoded export bundles for passing proposals between signers
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use safe_lite::{ChainAddresses, ChainConfig, MetaTransaction, RpcReader, TransactionHasher};
//! use safe_lite::signing::{build_signature_bytes, sign_safe_hash};
//!
//! let config = ChainConfig::new(provider.get_chain_id().await?, ChainAddresses::v1_4_1());
//! let hasher = TransactionHasher::new(RpcReader::new(provider), config.addresses.batch_executor())
//!     .with_account(safe_address);
//!
//! let txs = vec![
//!     MetaTransaction::eth_transfer(alice, U256::from(1_000)),
//!     MetaTransaction::erc20_transfer(usdc, bob, U256::from(5_000_000)),
//! ];
//! let prepared = hasher.prepare(&txs).await?;
//!
//! // Each owner signs independently, possibly elsewhere
//! let signatures = vec![sign_safe_hash(&owner_a, prepared.hash).await?, other_signature];
//! let exec = prepared.params.exec_call(build_signature_bytes(&signatures));
//! ```
//!
//! ## Passing proposals around
//!
//! ```rust,ignore
//! let hex = encode_bundle(&prepared.export(safe_address, txs))?;
//! // ...another owner...
//! let bundle: ExportBundle = decode_bundle(&hex)?;
//! bundle.verify_hash(chain_id)?;
//! let signed = bundle.signed(sign_safe_hash(&signer, bundle.safe_transaction_hash).await?);
//! ```

pub mod chain;
pub mod codec;
pub mod contracts;
pub mod create2;
pub mod encoding;
pub mod error;
pub mod hasher;
pub mod reader;
pub mod signing;
pub mod storage;
pub mod types;

// Re-export main types at crate root
pub use chain::{ChainAddresses, ChainConfig};
pub use contracts::{IERC20, IMultiSendCallOnly, ISafe, ISafeProxyFactory};
pub use create2::{compute_create2_address, encode_setup_call, ensure_deployment_address};
pub use encoding::{decode_bundle, encode_bundle, ExportBundle, SignedBundle};
pub use error::{Error, Result};
pub use hasher::{PreparedTransaction, TransactionHasher};
pub use reader::{ChainReader, RpcReader};
pub use storage::StorageSlotReader;
pub use types::{MetaTransaction, Operation, SafeSignature, SafeStorage, SafeTransactionParams};

// Re-export alloy types that are commonly used
pub use alloy::network::AnyNetwork;
pub use alloy::primitives::{Address, Bytes, B256, U256};
pub use alloy::providers::Provider;
