//! Serde adapter writing `U256` as a decimal string
//!
//! JSON numbers lose precision above 2^53, and alloy's default `U256` encoding is
//! `0x` hex. Bundles exchanged between signers use decimal strings instead.
//! Deserialization also accepts `0x`-prefixed hex.

use alloy::primitives::U256;
use serde::{de, Deserialize, Deserializer, Serializer};

pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
    let s = String::deserialize(deserializer)?;
    s.trim().parse::<U256>().map_err(de::Error::custom)
}
