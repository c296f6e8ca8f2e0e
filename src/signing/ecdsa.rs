//! Owner signatures over a Safe transaction hash

use alloy::primitives::{Address, B256};
use alloy::signers::Signer;
use tracing::debug;

use crate::codec::pad32_address;
use crate::error::{Error, Result};
use crate::types::SafeSignature;

use super::aggregate::STATIC_SIGNATURE_LEN;

/// Signs `hash` directly (no message prefix) and formats it for Safe
///
/// Safe expects `r (32) || s (32) || v (1)` with v adjusted to 27 or 28.
pub async fn sign_safe_hash<S: Signer + Sync>(signer: &S, hash: B256) -> Result<SafeSignature> {
    let signature = signer.sign_hash(&hash).await?;

    // y_parity true means odd (28)
    let v = if signature.v() { 28u8 } else { 27u8 };

    let mut data = Vec::with_capacity(STATIC_SIGNATURE_LEN);
    data.extend_from_slice(&signature.r().to_be_bytes::<32>());
    data.extend_from_slice(&signature.s().to_be_bytes::<32>());
    data.push(v);

    debug!(signer = %signer.address(), %hash, "signed Safe transaction hash");
    Ok(SafeSignature::ecdsa(signer.address(), data))
}

/// Signature for an owner that approved the hash on-chain or is the executing sender
///
/// r = owner (left-padded), s = 0, v = 1.
pub fn approved_hash_signature(owner: Address) -> SafeSignature {
    let mut data = Vec::with_capacity(STATIC_SIGNATURE_LEN);
    data.extend_from_slice(pad32_address(owner).as_slice());
    data.extend_from_slice(&[0u8; 32]);
    data.push(1);

    SafeSignature::ecdsa(owner, data)
}

/// Validates that a static signature is 65 bytes and has a valid v value
pub fn validate_signature(signature: &SafeSignature) -> Result<()> {
    if signature.dynamic {
        return Ok(());
    }

    let data = &signature.data;
    if data.len() != STATIC_SIGNATURE_LEN {
        return Err(Error::InvalidSignature(format!(
            "signature from {} is {} bytes, expected {STATIC_SIGNATURE_LEN}",
            signature.signer,
            data.len()
        )));
    }

    let v = data[STATIC_SIGNATURE_LEN - 1];
    // 0 contract, 1 approved hash, 27/28 ECDSA, 31/32 eth_sign
    if !matches!(v, 0 | 1 | 27 | 28 | 31 | 32) {
        return Err(Error::InvalidSignature(format!(
            "signature from {} has invalid v value {v}",
            signature.signer
        )));
    }

    Ok(())
}
