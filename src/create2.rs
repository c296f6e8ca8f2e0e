//! CREATE2 address computation for Safe proxy deployment
//!
//! The Safe proxy factory deploys proxies at deterministic addresses derived from
//! the singleton, the initializer calldata and a user salt nonce. Hashing the
//! initializer into the salt means two different owner/threshold/handler setups
//! never collide, even with the same salt nonce.

use alloy::primitives::{keccak256, Address, Bytes, Log, B256, U256};
use alloy::sol_types::{SolCall, SolEvent};
use tracing::{debug, warn};

use crate::codec::{concat, pad32_address, pad32_u256, word_to_address};
use crate::contracts::{ISafe, ISafeProxyFactory};
use crate::error::{Error, Result};
use crate::reader::{call_typed, ChainReader};

/// Encodes the Safe.setup() call for proxy initialization
///
/// No module setup call and no deployment payment: `to`, `paymentToken` and
/// `paymentReceiver` are zero, `data` is empty.
pub fn encode_setup_call(owners: &[Address], threshold: u64, fallback_handler: Address) -> Bytes {
    let setup_call = ISafe::setupCall {
        _owners: owners.to_vec(),
        _threshold: U256::from(threshold),
        to: Address::ZERO,
        data: Bytes::new(),
        fallbackHandler: fallback_handler,
        paymentToken: Address::ZERO,
        payment: U256::ZERO,
        paymentReceiver: Address::ZERO,
    };

    Bytes::from(setup_call.abi_encode())
}

/// salt = keccak256(keccak256(initializer) ++ pad32(saltNonce))
pub fn compute_salt(initializer: &[u8], salt_nonce: U256) -> B256 {
    let initializer_hash = keccak256(initializer);
    keccak256(concat(&[initializer_hash.as_slice(), pad32_u256(salt_nonce).as_slice()]))
}

/// init_code = proxyCreationCode ++ pad32(singleton)
pub fn deployment_code(creation_code: &[u8], singleton: Address) -> Vec<u8> {
    concat(&[creation_code, pad32_address(singleton).as_slice()])
}

/// Computes the CREATE2 address for a Safe proxy
///
/// ```text
/// salt = keccak256(keccak256(initializer) ++ saltNonce)
/// init_code = proxyCreationCode ++ singleton_address_padded
/// address = keccak256(0xff ++ factory ++ salt ++ keccak256(init_code))[12:]
/// ```
///
/// # Arguments
/// * `factory` - Address of the SafeProxyFactory contract
/// * `singleton` - Address of the Safe singleton (implementation) contract
/// * `initializer` - ABI-encoded Safe.setup() call data
/// * `salt_nonce` - User-provided nonce for address derivation
/// * `creation_code` - Proxy creation bytecode from SafeProxyFactory.proxyCreationCode()
pub fn compute_create2_address(
    factory: Address,
    singleton: Address,
    initializer: &[u8],
    salt_nonce: U256,
    creation_code: &[u8],
) -> Address {
    let salt = compute_salt(initializer, salt_nonce);
    let init_code_hash = keccak256(deployment_code(creation_code, singleton));

    let hash = keccak256(concat(&[
        &[0xffu8],
        factory.as_slice(),
        salt.as_slice(),
        init_code_hash.as_slice(),
    ]));

    word_to_address(hash)
}

/// Fails with [`Error::AddressMismatch`] unless the factory-reported address equals
/// the computed one. A mismatch means template or parameter drift; never deploy.
pub fn ensure_deployment_address(computed: Address, reported: Address) -> Result<()> {
    if computed != reported {
        warn!(%computed, %reported, "proxy address mismatch");
        return Err(Error::AddressMismatch { computed, reported });
    }
    Ok(())
}

/// Reads `proxyCreationCode()` from the factory
pub async fn fetch_proxy_creation_code<R>(reader: &R, factory: Address) -> Result<Bytes>
where
    R: ChainReader + Sync,
{
    call_typed(reader, factory, ISafeProxyFactory::proxyCreationCodeCall {}).await
}

/// Asks the factory, via a read-only `createProxyWithNonce` call, where it would
/// deploy, and checks that against the local computation.
///
/// Returns the verified address.
pub async fn verify_proxy_address<R>(
    reader: &R,
    factory: Address,
    singleton: Address,
    initializer: &Bytes,
    salt_nonce: U256,
    creation_code: &[u8],
) -> Result<Address>
where
    R: ChainReader + Sync,
{
    let computed = compute_create2_address(factory, singleton, initializer, salt_nonce, creation_code);
    let reported = call_typed(
        reader,
        factory,
        ISafeProxyFactory::createProxyWithNonceCall {
            _singleton: singleton,
            initializer: initializer.clone(),
            saltNonce: salt_nonce,
        },
    )
    .await?;

    debug!(%computed, %reported, "factory deployment address");
    ensure_deployment_address(computed, reported)?;
    Ok(computed)
}

/// Proxy address announced by the factory's `ProxyCreation` event among `logs`
pub fn deployed_proxy<'a>(logs: impl IntoIterator<Item = &'a Log>, factory: Address) -> Option<Address> {
    logs.into_iter()
        .filter(|log| log.address == factory)
        .find_map(|log| ISafeProxyFactory::ProxyCreation::decode_log(log).ok())
        .map(|event| event.data.proxy)
}
