//! Raw storage introspection of Safe accounts
//!
//! Reads the account configuration straight from storage words instead of relying
//! on convenience getters. Fixed layout of a Safe v1.x proxy:
//!
//! | slot | field                      |
//! |------|----------------------------|
//! | 0    | singleton                  |
//! | 1    | modules mapping            |
//! | 2    | owners mapping             |
//! | 3    | ownerCount                 |
//! | 4    | threshold                  |
//! | 5    | nonce                      |
//!
//! The fallback handler and guard live at keccak-derived slots, see
//! [`ManagerSlots`].

use alloy::primitives::{address, b256, keccak256, Address, B256, U256};
use tracing::{debug, warn};

use crate::codec::{concat, pad32_address, pad32_u256, word_to_address, word_to_u256};
use crate::contracts::ISafe;
use crate::error::Result;
use crate::reader::{call_typed, ChainReader};
use crate::types::SafeStorage;

/// Safe proxy singleton storage slot (slot 0)
pub const SAFE_SINGLETON_SLOT: U256 = U256::ZERO;
/// Base slot of `mapping(address => address) modules`
pub const MODULES_SLOT: U256 = U256::from_limbs([1, 0, 0, 0]);
/// Base slot of `mapping(address => address) owners`
pub const OWNERS_SLOT: U256 = U256::from_limbs([2, 0, 0, 0]);
pub const OWNER_COUNT_SLOT: U256 = U256::from_limbs([3, 0, 0, 0]);
pub const THRESHOLD_SLOT: U256 = U256::from_limbs([4, 0, 0, 0]);
pub const NONCE_SLOT: U256 = U256::from_limbs([5, 0, 0, 0]);

/// keccak256("fallback_manager.handler.address")
pub const FALLBACK_HANDLER_STORAGE_SLOT: B256 =
    b256!("6c9a6c4a39284e37ed1cf53d337577d14212a4870fb976a4366c693b939918d5");
/// keccak256("guard_manager.guard.address")
pub const GUARD_STORAGE_SLOT: B256 =
    b256!("4a204f620c8c5ccdca3fd54d003badd85ba500436a431f0cbda4f558c93c34c8");

/// Head of the owners and modules linked lists
pub const SENTINEL_ADDRESS: Address = address!("0000000000000000000000000000000000000001");

/// Page size used when enumerating modules
pub const DEFAULT_MODULE_PAGE_SIZE: u64 = 10;

/// Slots of the fallback handler and guard.
///
/// These are opaque keys; the reader never derives them itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerSlots {
    pub fallback_handler: B256,
    pub guard: B256,
}

impl Default for ManagerSlots {
    fn default() -> Self {
        Self {
            fallback_handler: FALLBACK_HANDLER_STORAGE_SLOT,
            guard: GUARD_STORAGE_SLOT,
        }
    }
}

/// Storage slot of `mapping[key]` for a mapping at `base_slot`
///
/// slot = keccak256(pad32(key) ++ pad32(baseSlot))
///
/// Owner and module enumeration goes through contract calls; this is only for
/// callers that need one specific entry.
pub fn mapping_slot(key: B256, base_slot: U256) -> B256 {
    keccak256(concat(&[key.as_slice(), pad32_u256(base_slot).as_slice()]))
}

/// Decodes Safe configuration from raw storage through a [`ChainReader`]
#[derive(Debug, Clone)]
pub struct StorageSlotReader<R> {
    reader: R,
    slots: ManagerSlots,
}

impl<R> StorageSlotReader<R>
where
    R: ChainReader + Sync,
{
    /// Creates a reader using the well-known manager slots
    pub fn new(reader: R) -> Self {
        Self::with_slots(reader, ManagerSlots::default())
    }

    /// Creates a reader with caller-supplied fallback handler and guard slots
    pub fn with_slots(reader: R, slots: ManagerSlots) -> Self {
        Self { reader, slots }
    }

    async fn word(&self, account: Address, slot: U256) -> Result<B256> {
        self.reader.storage_at(account, pad32_u256(slot)).await
    }

    /// Reads the fixed-slot fields. `owners` and `modules` are left empty.
    pub async fn read_storage(&self, account: Address) -> Result<SafeStorage> {
        let fallback_handler = self.reader.storage_at(account, self.slots.fallback_handler).await?;
        let guard = self.reader.storage_at(account, self.slots.guard).await?;
        let singleton = self.word(account, SAFE_SINGLETON_SLOT).await?;
        let owner_count = self.word(account, OWNER_COUNT_SLOT).await?;
        let threshold = self.word(account, THRESHOLD_SLOT).await?;
        let nonce = self.word(account, NONCE_SLOT).await?;

        let storage = SafeStorage {
            singleton: word_to_address(singleton),
            fallback_handler: word_to_address(fallback_handler),
            guard: word_to_address(guard),
            owner_count: word_to_u256(owner_count),
            threshold: word_to_u256(threshold),
            nonce: word_to_u256(nonce),
            owners: Vec::new(),
            modules: Vec::new(),
        };
        debug!(%account, singleton = %storage.singleton, nonce = %storage.nonce, "read Safe storage");
        Ok(storage)
    }

    /// Reads `mapping[key]` of the mapping rooted at `base_slot`
    pub async fn read_mapping_storage(&self, account: Address, base_slot: U256, key: B256) -> Result<B256> {
        self.reader.storage_at(account, mapping_slot(key, base_slot)).await
    }

    /// Linked-list successor of `owner` in the owners mapping (zero if not an owner)
    pub async fn read_owner_storage_slot(&self, account: Address, owner: Address) -> Result<B256> {
        self.read_mapping_storage(account, OWNERS_SLOT, pad32_address(owner)).await
    }

    /// Linked-list successor of `module` in the modules mapping (zero if not enabled)
    pub async fn read_module_storage_slot(&self, account: Address, module: Address) -> Result<B256> {
        self.read_mapping_storage(account, MODULES_SLOT, pad32_address(module)).await
    }

    /// Full snapshot: fixed slots plus owners (`getOwners`) and the first page of
    /// modules (`getModulesPaginated`).
    pub async fn fetch_storage_data(&self, account: Address, module_page_size: u64) -> Result<SafeStorage> {
        let mut storage = self.read_storage(account).await?;

        storage.owners = call_typed(&self.reader, account, ISafe::getOwnersCall {}).await?;
        let page = call_typed(
            &self.reader,
            account,
            ISafe::getModulesPaginatedCall {
                start: SENTINEL_ADDRESS,
                pageSize: U256::from(module_page_size),
            },
        )
        .await?;
        if page.next != SENTINEL_ADDRESS && page.next != Address::ZERO {
            debug!(%account, next = %page.next, "more modules than one page");
        }
        storage.modules = page.array;

        if !storage.is_consistent() {
            warn!(%account, threshold = %storage.threshold, owner_count = %storage.owner_count, "inconsistent Safe storage");
        }
        Ok(storage)
    }

    /// Whether `address` is a proxy whose slot 0 points at one of `known_singletons`
    pub async fn is_safe(&self, address: Address, known_singletons: &[Address]) -> Result<bool> {
        let singleton = word_to_address(self.word(address, SAFE_SINGLETON_SLOT).await?);
        Ok(known_singletons.contains(&singleton))
    }
}
