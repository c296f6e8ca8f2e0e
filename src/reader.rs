//! Chain-read capability
//!
//! Storage introspection and transaction hashing only ever need two reads: a raw
//! storage word and an `eth_call`. Everything that touches the network goes through
//! [`ChainReader`], so the engine can run against a live node ([`RpcReader`]) or an
//! in-memory fixture.

use std::future::Future;

use alloy::network::{AnyNetwork, TransactionBuilder};
use alloy::primitives::{Address, Bytes, B256, U256};
use alloy::providers::Provider;
use alloy::sol_types::SolCall;
use tracing::debug;

use crate::error::{Error, Result};

/// Read-only access to contract state.
///
/// Each call is a single-shot request; implementations must not retry.
pub trait ChainReader {
    /// Reads one 32-byte storage word. Unset slots read as zero.
    fn storage_at(&self, address: Address, slot: B256) -> impl Future<Output = Result<B256>> + Send;

    /// Performs a read-only call and returns the raw return data.
    fn call(&self, to: Address, calldata: Bytes) -> impl Future<Output = Result<Bytes>> + Send;
}

impl<R: ChainReader + Sync> ChainReader for &R {
    fn storage_at(&self, address: Address, slot: B256) -> impl Future<Output = Result<B256>> + Send {
        (**self).storage_at(address, slot)
    }

    fn call(&self, to: Address, calldata: Bytes) -> impl Future<Output = Result<Bytes>> + Send {
        (**self).call(to, calldata)
    }
}

/// Encodes `call`, sends it through `reader` and decodes the return value.
pub async fn call_typed<R, C>(reader: &R, to: Address, call: C) -> Result<C::Return>
where
    R: ChainReader + Sync,
    C: SolCall + Send,
{
    let output = reader.call(to, Bytes::from(call.abi_encode())).await?;
    Ok(C::abi_decode_returns(&output)?)
}

/// [`ChainReader`] backed by an alloy provider
#[derive(Debug, Clone)]
pub struct RpcReader<P> {
    provider: P,
}

impl<P> RpcReader<P>
where
    P: Provider<AnyNetwork>,
{
    /// Wraps a provider
    pub fn new(provider: P) -> Self {
        Self { provider }
    }
}

impl<P> ChainReader for RpcReader<P>
where
    P: Provider<AnyNetwork>,
{
    async fn storage_at(&self, address: Address, slot: B256) -> Result<B256> {
        debug!(%address, %slot, "eth_getStorageAt");
        let value = self
            .provider
            .get_storage_at(address, U256::from_be_bytes(slot.0))
            .await
            .map_err(|e| Error::ChainReadFailed {
                what: "storage slot",
                reason: e.to_string(),
            })?;
        Ok(B256::from(value.to_be_bytes::<32>()))
    }

    async fn call(&self, to: Address, calldata: Bytes) -> Result<Bytes> {
        debug!(%to, len = calldata.len(), "eth_call");
        let request = <AnyNetwork as alloy::network::Network>::TransactionRequest::default()
            .with_to(to)
            .with_input(calldata);

        self.provider
            .call(request)
            .await
            .map_err(|e| Error::ChainReadFailed {
                what: "contract call",
                reason: e.to_string(),
            })
    }
}
