//! Hex, address and packed-encoding primitives
//!
//! Everything else in the crate builds its byte layouts from these helpers so that
//! the 32-byte word conventions (left padding, low-20-byte address slicing) live in
//! one place.

use alloy::primitives::{hex, Address, B256, U256};

pub use alloy::primitives::keccak256;

use crate::error::{Error, Result};

/// Parses a 20-byte address from hex.
///
/// The `0x`/`0X` prefix is optional and letter case is ignored (no EIP-55 checksum
/// enforcement). Anything other than exactly 40 hex digits is rejected.
pub fn parse_address(input: &str) -> Result<Address> {
    let digits = input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input);

    if digits.len() != 40 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::InvalidAddress(input.to_string()));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes).map_err(|_| Error::InvalidAddress(input.to_string()))?;
    Ok(Address::from(bytes))
}

/// Canonical display form: lower-case hex with `0x` prefix
pub fn to_lower_hex(address: Address) -> String {
    hex::encode_prefixed(address)
}

/// Left-pads an address to a 32-byte word
pub fn pad32_address(address: Address) -> B256 {
    address.into_word()
}

/// Encodes an unsigned 256-bit value as a big-endian 32-byte word
pub fn pad32_u256(value: U256) -> B256 {
    B256::from(value.to_be_bytes::<32>())
}

/// Encodes a length as a big-endian 32-byte word
pub fn pad32_len(len: usize) -> B256 {
    pad32_u256(U256::from(len))
}

/// Takes the low 20 bytes (bytes 12..32) of a storage word as an address
pub fn word_to_address(word: B256) -> Address {
    Address::from_word(word)
}

/// Interprets a storage word as a big-endian unsigned integer
pub fn word_to_u256(word: B256) -> U256 {
    U256::from_be_bytes(word.0)
}

/// Concatenates byte sequences with no separators
pub fn concat(parts: &[&[u8]]) -> Vec<u8> {
    parts.concat()
}
