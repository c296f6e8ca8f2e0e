//! Decoded Safe account configuration

use alloy::primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::decimal;

/// Snapshot of a Safe's configuration as read from raw storage.
///
/// Rebuilt in full on every introspection; `owners` and `modules` are empty unless
/// the snapshot came from a reader that enumerates them through contract calls.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SafeStorage {
    /// Implementation the proxy delegates to (slot 0)
    pub singleton: Address,
    pub fallback_handler: Address,
    pub guard: Address,
    /// Slot 3
    #[serde(with = "decimal")]
    pub owner_count: U256,
    /// Slot 4
    #[serde(with = "decimal")]
    pub threshold: U256,
    /// Slot 5
    #[serde(with = "decimal")]
    pub nonce: U256,
    pub owners: Vec<Address>,
    pub modules: Vec<Address>,
}

impl SafeStorage {
    /// `true` when the decoded values satisfy `threshold <= ownerCount` and the owner
    /// list (if populated) has no duplicates.
    pub fn is_consistent(&self) -> bool {
        if self.threshold > self.owner_count {
            return false;
        }
        let mut seen = self.owners.clone();
        seen.sort();
        seen.dedup();
        seen.len() == self.owners.len()
    }
}
