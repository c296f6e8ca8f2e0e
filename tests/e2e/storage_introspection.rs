//! Raw storage introspection E2E tests

use alloy::primitives::{Address, B256, U256};
use safe_lite::codec::pad32_address;
use safe_lite::storage::{DEFAULT_MODULE_PAGE_SIZE, SENTINEL_ADDRESS};
use safe_lite::{ChainAddresses, StorageSlotReader};

use crate::common::TestHarness;
use crate::skip_if_no_rpc;

#[tokio::test]
async fn test_read_storage_of_fresh_safe() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let owners = harness.owner_addresses();
    let safe_address = harness
        .deploy_safe(owners.clone(), 2, U256::from(4001))
        .await
        .expect("Failed to deploy Safe");

    let reader = StorageSlotReader::new(harness.reader());
    let storage = reader
        .fetch_storage_data(safe_address, DEFAULT_MODULE_PAGE_SIZE)
        .await
        .expect("Failed to read storage");

    assert_eq!(storage.singleton, harness.addresses.safe_singleton);
    assert_eq!(storage.fallback_handler, harness.addresses.fallback_handler);
    assert_eq!(storage.guard, Address::ZERO);
    assert_eq!(storage.owner_count, U256::from(3));
    assert_eq!(storage.threshold, U256::from(2));
    assert_eq!(storage.nonce, U256::ZERO);
    assert!(storage.modules.is_empty());
    assert!(storage.is_consistent());

    let mut read_owners = storage.owners.clone();
    read_owners.sort();
    let mut expected = owners;
    expected.sort();
    assert_eq!(read_owners, expected);
}

#[tokio::test]
async fn test_owner_mapping_slots() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let owners = harness.owner_addresses();
    let safe_address = harness
        .deploy_safe(owners.clone(), 1, U256::from(4002))
        .await
        .expect("Failed to deploy Safe");

    let reader = StorageSlotReader::new(harness.reader());

    // setup() links owners in order: SENTINEL -> o0 -> o1 -> o2 -> SENTINEL
    let head = reader
        .read_owner_storage_slot(safe_address, SENTINEL_ADDRESS)
        .await
        .unwrap();
    assert_eq!(head, pad32_address(owners[0]));

    let tail = reader
        .read_owner_storage_slot(safe_address, owners[2])
        .await
        .unwrap();
    assert_eq!(tail, pad32_address(SENTINEL_ADDRESS));

    let stranger = reader
        .read_owner_storage_slot(safe_address, Address::repeat_byte(0x42))
        .await
        .unwrap();
    assert_eq!(stranger, B256::ZERO);

    // modules list is empty but initialized: SENTINEL -> SENTINEL
    let modules_head = reader
        .read_module_storage_slot(safe_address, SENTINEL_ADDRESS)
        .await
        .unwrap();
    assert_eq!(modules_head, pad32_address(SENTINEL_ADDRESS));
}

#[tokio::test]
async fn test_is_safe() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe_address = harness
        .deploy_safe(harness.owner_addresses(), 1, U256::from(4003))
        .await
        .expect("Failed to deploy Safe");

    let reader = StorageSlotReader::new(harness.reader());
    let known = ChainAddresses::known_singletons();

    assert!(reader.is_safe(safe_address, &known).await.unwrap());
    assert!(!reader.is_safe(harness.owners[0].address(), &known).await.unwrap());
    assert!(!reader
        .is_safe(harness.addresses.proxy_factory, &known)
        .await
        .unwrap());
}
