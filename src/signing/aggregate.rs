//! Signature aggregation into the verifier's `signatures` argument

use alloy::primitives::{Bytes, U256};

use crate::codec::{pad32_address, pad32_len, pad32_u256};
use crate::types::SafeSignature;

/// Length of one static signature slot
pub const STATIC_SIGNATURE_LEN: usize = 65;

/// Signature-type byte for a contract signature placeholder
const CONTRACT_SIGNATURE_TYPE: u8 = 0;

/// Concatenates signatures into the layout `checkSignatures` splits.
///
/// Signatures are ordered by ascending signer address. Each one occupies a 65-byte
/// static slot; a dynamic signature's slot is `pad32(signer) ++ pad32(offset) ++ 0x00`
/// where `offset` points, from the start of the static region, at a
/// `pad32(len) ++ payload` record in the dynamic region appended after all static
/// slots.
///
/// Threshold is not checked here.
pub fn build_signature_bytes(signatures: &[SafeSignature]) -> Bytes {
    let mut sorted: Vec<&SafeSignature> = signatures.iter().collect();
    sorted.sort_by(|a, b| a.signer.cmp(&b.signer));

    let static_len = sorted.len() * STATIC_SIGNATURE_LEN;
    let mut static_part = Vec::with_capacity(static_len);
    let mut dynamic_part = Vec::new();

    for sig in sorted {
        if sig.dynamic {
            let offset = static_len + dynamic_part.len();
            static_part.extend_from_slice(pad32_address(sig.signer).as_slice());
            static_part.extend_from_slice(pad32_u256(U256::from(offset)).as_slice());
            static_part.push(CONTRACT_SIGNATURE_TYPE);

            dynamic_part.extend_from_slice(pad32_len(sig.data.len()).as_slice());
            dynamic_part.extend_from_slice(&sig.data);
        } else {
            static_part.extend_from_slice(&sig.data);
        }
    }

    static_part.extend_from_slice(&dynamic_part);
    Bytes::from(static_part)
}
