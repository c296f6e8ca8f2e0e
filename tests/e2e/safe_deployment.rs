//! Safe deployment E2E tests

use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use safe_lite::create2::{fetch_proxy_creation_code, verify_proxy_address};
use safe_lite::{compute_create2_address, encode_setup_call, Error};

use crate::common::TestHarness;
use crate::skip_if_no_rpc;

/// The computed address is where the factory actually deploys
#[tokio::test]
async fn test_deploy_safe_at_computed_address() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let owners = harness.owner_addresses();
    let salt_nonce = U256::from(1001);

    let initializer = encode_setup_call(&owners, 2, harness.addresses.fallback_handler);
    let creation_code = fetch_proxy_creation_code(&harness.reader(), harness.addresses.proxy_factory)
        .await
        .expect("Failed to read proxy creation code");
    let expected = compute_create2_address(
        harness.addresses.proxy_factory,
        harness.addresses.safe_singleton,
        &initializer,
        salt_nonce,
        &creation_code,
    );

    let safe_address = harness
        .deploy_safe(owners, 2, salt_nonce)
        .await
        .expect("Failed to deploy Safe");

    assert_eq!(safe_address, expected);
    let code = harness
        .provider
        .get_code_at(safe_address)
        .await
        .expect("Failed to get code");
    assert!(!code.is_empty(), "Safe should have code deployed");
}

/// Redeploying the same configuration resolves to the existing Safe
#[tokio::test]
async fn test_same_parameters_same_address() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let owners = harness.owner_addresses();
    let salt_nonce = U256::from(2001);

    let first = harness
        .deploy_safe(owners.clone(), 1, salt_nonce)
        .await
        .expect("First deployment should succeed");
    let second = harness
        .deploy_safe(owners, 1, salt_nonce)
        .await
        .expect("Second deploy should return existing address");

    assert_eq!(first, second);
}

/// A wrong creation code template is caught before anything is sent
#[tokio::test]
async fn test_template_drift_is_rejected() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let initializer = encode_setup_call(&harness.owner_addresses(), 1, Address::ZERO);

    let err = verify_proxy_address(
        &harness.reader(),
        harness.addresses.proxy_factory,
        harness.addresses.safe_singleton,
        &initializer,
        U256::from(3001),
        &[0x60, 0x80, 0x60, 0x40],
    )
    .await
    .unwrap_err();

    assert!(matches!(err, Error::AddressMismatch { .. }));
}
