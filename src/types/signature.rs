//! Signer contributions to a Safe transaction

use alloy::primitives::{Address, Bytes};
use serde::{Deserialize, Serialize};

/// One owner's signature over a Safe transaction hash.
///
/// `dynamic` marks a contract (EIP-1271) signature whose payload is placed in the
/// out-of-line region of the aggregated bytes instead of the 65-byte static slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeSignature {
    /// Owner that produced the signature
    pub signer: Address,
    /// Signature bytes (65 bytes `r || s || v` for ECDSA)
    pub data: Bytes,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub dynamic: bool,
}

impl SafeSignature {
    /// A static 65-byte signature (ECDSA, eth_sign or approved-hash)
    pub fn ecdsa(signer: Address, data: impl Into<Bytes>) -> Self {
        Self {
            signer,
            data: data.into(),
            dynamic: false,
        }
    }

    /// A contract signature verified through the signer's `isValidSignature`
    pub fn contract(signer: Address, payload: impl Into<Bytes>) -> Self {
        Self {
            signer,
            data: payload.into(),
            dynamic: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    #[test]
    fn test_dynamic_flag_omitted_when_false() {
        let sig = SafeSignature::ecdsa(
            address!("0x1111111111111111111111111111111111111111"),
            vec![0u8; 65],
        );
        let json = serde_json::to_value(&sig).unwrap();
        assert!(json.get("dynamic").is_none());

        let contract = SafeSignature::contract(Address::ZERO, vec![0xde, 0xad]);
        let json = serde_json::to_value(&contract).unwrap();
        assert_eq!(json["dynamic"], true);
        assert_eq!(json["data"], "0xdead");
    }

    #[test]
    fn test_missing_dynamic_defaults_false() {
        let sig: SafeSignature = serde_json::from_str(
            r#"{"signer":"0x1111111111111111111111111111111111111111","data":"0x01"}"#,
        )
        .unwrap();
        assert!(!sig.dynamic);
    }
}
