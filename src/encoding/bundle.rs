//! Export/import format for passing transactions between signers
//!
//! A bundle is JSON (integers as decimal strings, bytes as `0x` hex), UTF-8 encoded
//! and then hex-encoded into one `0x...` string, so it survives any out-of-band
//! channel: clipboard, QR code, chat.

use alloy::primitives::{hex, Address, B256};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::compute_safe_transaction_hash;
use crate::error::{Error, Result};
use crate::types::{MetaTransaction, SafeSignature, SafeTransactionParams};

/// Unsigned transaction proposal
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportBundle {
    pub transactions: Vec<MetaTransaction>,
    pub safe_account: Address,
    pub safe_transaction: SafeTransactionParams,
    pub safe_transaction_hash: B256,
}

impl ExportBundle {
    /// Checks the carried hash against the locally computed EIP-712 hash.
    pub fn verify_hash(&self, chain_id: u64) -> Result<()> {
        let computed =
            compute_safe_transaction_hash(chain_id, self.safe_account, &self.safe_transaction);
        if computed != self.safe_transaction_hash {
            return Err(Error::HashMismatch {
                computed,
                reported: self.safe_transaction_hash,
            });
        }
        Ok(())
    }

    /// Attaches one signer's contribution
    pub fn signed(self, signature: SafeSignature) -> SignedBundle {
        SignedBundle {
            bundle: self,
            signature,
        }
    }
}

/// Proposal plus a single signer's signature
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedBundle {
    #[serde(flatten)]
    pub bundle: ExportBundle,
    pub signature: SafeSignature,
}

/// Serializes a bundle to its `0x`-prefixed transport string
pub fn encode_bundle<T: Serialize>(bundle: &T) -> Result<String> {
    let json = serde_json::to_vec(bundle)?;
    Ok(hex::encode_prefixed(json))
}

/// Parses a transport string produced by [`encode_bundle`]
pub fn decode_bundle<T: DeserializeOwned>(input: &str) -> Result<T> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|e| Error::Bundle(format!("invalid hex: {e}")))?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Collects the signatures of several signed copies of the same proposal.
///
/// Every bundle must carry the same account, transaction record and hash, and each
/// signer may appear only once.
pub fn merge_signed_bundles(bundles: &[SignedBundle]) -> Result<(ExportBundle, Vec<SafeSignature>)> {
    let first = bundles
        .first()
        .ok_or_else(|| Error::Bundle("no signed bundles supplied".to_string()))?;

    let mut signatures: Vec<SafeSignature> = Vec::with_capacity(bundles.len());
    for (index, signed) in bundles.iter().enumerate() {
        let b = &signed.bundle;
        if b.safe_account != first.bundle.safe_account
            || b.safe_transaction != first.bundle.safe_transaction
            || b.safe_transaction_hash != first.bundle.safe_transaction_hash
        {
            return Err(Error::Bundle(format!(
                "bundle {index} describes a different transaction"
            )));
        }
        if signatures.iter().any(|s| s.signer == signed.signature.signer) {
            return Err(Error::Bundle(format!(
                "duplicate signature from {}",
                signed.signature.signer
            )));
        }
        signatures.push(signed.signature.clone());
    }

    Ok((first.bundle.clone(), signatures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{address, Bytes, U256};

    fn sample_bundle() -> ExportBundle {
        let tx = MetaTransaction::eth_transfer(
            address!("0x1111111111111111111111111111111111111111"),
            U256::from(1_000_000_000_000_000_000u64),
        );
        let safe_account = address!("0xabcdefabcdefabcdefabcdefabcdefabcdefabcd");
        let safe_transaction = SafeTransactionParams::unpaid(tx.clone(), U256::ZERO);
        let safe_transaction_hash = compute_safe_transaction_hash(1, safe_account, &safe_transaction);

        ExportBundle {
            transactions: vec![tx],
            safe_account,
            safe_transaction,
            safe_transaction_hash,
        }
    }

    fn sig(byte: u8) -> SafeSignature {
        SafeSignature::ecdsa(Address::repeat_byte(byte), vec![byte; 65])
    }

    #[test]
    fn test_transport_string_is_hex_of_json() {
        let bundle = sample_bundle();
        let encoded = encode_bundle(&bundle).unwrap();
        assert!(encoded.starts_with("0x"));

        let json = String::from_utf8(hex::decode(&encoded[2..]).unwrap()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["safeTransaction"]["value"], "1000000000000000000");
        assert_eq!(value["transactions"][0]["operation"], 0);

        let decoded: ExportBundle = decode_bundle(&encoded).unwrap();
        assert_eq!(decoded, bundle);
    }

    #[test]
    fn test_signed_bundle_is_flat() {
        let signed = sample_bundle().signed(sig(1));
        let value = serde_json::to_value(&signed).unwrap();
        assert!(value.get("safeAccount").is_some());
        assert!(value.get("signature").is_some());

        // A signed bundle still reads as a plain proposal
        let encoded = encode_bundle(&signed).unwrap();
        let plain: ExportBundle = decode_bundle(&encoded).unwrap();
        assert_eq!(plain, signed.bundle);
    }

    #[test]
    fn test_decode_accepts_any_prefix_case() {
        let bundle = sample_bundle();
        let encoded = encode_bundle(&bundle).unwrap();
        let digits = &encoded[2..];

        for input in [
            encoded.clone(),
            format!("0X{digits}"),
            format!("0X{}", digits.to_uppercase()),
            digits.to_string(),
            format!("  {encoded}\n"),
        ] {
            assert_eq!(decode_bundle::<ExportBundle>(&input).unwrap(), bundle, "input: {input}");
        }
    }

    #[test]
    fn test_decode_rejects_garbage() {
        assert!(matches!(decode_bundle::<ExportBundle>("0xzz"), Err(Error::Bundle(_))));
        let not_json = hex::encode_prefixed(b"hello");
        assert!(matches!(decode_bundle::<ExportBundle>(&not_json), Err(Error::Bundle(_))));
    }

    #[test]
    fn test_verify_hash() {
        let bundle = sample_bundle();
        assert!(bundle.verify_hash(1).is_ok());
        assert!(matches!(bundle.verify_hash(10), Err(Error::HashMismatch { .. })));

        let mut tampered = sample_bundle();
        tampered.safe_transaction.data = Bytes::from(vec![0x01]);
        assert!(matches!(tampered.verify_hash(1), Err(Error::HashMismatch { .. })));
    }

    #[test]
    fn test_merge_signed_bundles() {
        let bundles = vec![sample_bundle().signed(sig(2)), sample_bundle().signed(sig(1))];
        let (bundle, signatures) = merge_signed_bundles(&bundles).unwrap();
        assert_eq!(bundle, sample_bundle());
        assert_eq!(signatures.len(), 2);
    }

    #[test]
    fn test_merge_rejects_mismatch_and_duplicates() {
        assert!(merge_signed_bundles(&[]).is_err());

        let mut other = sample_bundle();
        other.safe_transaction.nonce = U256::from(1);
        let mismatched = vec![sample_bundle().signed(sig(1)), other.signed(sig(2))];
        assert!(matches!(merge_signed_bundles(&mismatched), Err(Error::Bundle(_))));

        let duplicated = vec![sample_bundle().signed(sig(1)), sample_bundle().signed(sig(1))];
        assert!(matches!(merge_signed_bundles(&duplicated), Err(Error::Bundle(_))));
    }
}
