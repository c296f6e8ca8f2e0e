//! Propose, sign, aggregate and execute against a real Safe

use alloy::network::ReceiptResponse;
use alloy::primitives::{Address, U256};
use safe_lite::encoding::{
    compute_domain_separator, compute_safe_transaction_hash, merge_signed_bundles,
};
use safe_lite::signing::{approved_hash_signature, build_signature_bytes, sign_safe_hash};
use safe_lite::{
    decode_bundle, encode_bundle, ExportBundle, ISafe, MetaTransaction, Operation, SignedBundle,
    TransactionHasher,
};

use crate::common::TestHarness;
use crate::skip_if_no_rpc;

async fn fund(harness: &TestHarness, safe: Address) {
    harness
        .mint_eth(safe, U256::from(10).pow(U256::from(18)))
        .await
        .expect("Failed to fund Safe");
}

#[tokio::test]
async fn test_verifier_hash_matches_local_hash() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe_address = harness
        .deploy_safe(harness.owner_addresses(), 2, U256::from(6001))
        .await
        .expect("Failed to deploy Safe");

    let hasher = TransactionHasher::new(harness.reader(), harness.addresses.batch_executor())
        .with_account(safe_address);
    let prepared = hasher
        .prepare(&[
            MetaTransaction::eth_transfer(Address::repeat_byte(0x11), U256::from(1)),
            MetaTransaction::eth_transfer(Address::repeat_byte(0x22), U256::from(2)),
        ])
        .await
        .expect("Failed to prepare transaction");

    assert_eq!(prepared.params.operation, Operation::DelegateCall);
    assert_eq!(
        prepared.hash,
        compute_safe_transaction_hash(harness.chain_id, safe_address, &prepared.params)
    );

    let on_chain = ISafe::new(safe_address, &harness.provider)
        .domainSeparator()
        .call()
        .await
        .expect("Failed to read domainSeparator");
    assert_eq!(on_chain, compute_domain_separator(harness.chain_id, safe_address));
}

/// 2-of-3 batch: two owners sign independently, bundles travel as hex
#[tokio::test]
async fn test_two_of_three_batch_execution() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe_address = harness
        .deploy_safe(harness.owner_addresses(), 2, U256::from(6002))
        .await
        .expect("Failed to deploy Safe");
    fund(&harness, safe_address).await;

    let alice = Address::repeat_byte(0xa1);
    let bob = Address::repeat_byte(0xb0);
    let txs = vec![
        MetaTransaction::eth_transfer(alice, U256::from(1000)),
        MetaTransaction::eth_transfer(bob, U256::from(2000)),
    ];

    let hasher = TransactionHasher::new(harness.reader(), harness.addresses.batch_executor())
        .with_account(safe_address);
    let prepared = hasher.prepare(&txs).await.expect("Failed to prepare");
    let proposal = encode_bundle(&prepared.export(safe_address, txs)).unwrap();

    // owners 2 and 1 sign, in that order
    let mut signed = Vec::new();
    for owner in [&harness.owners[2], &harness.owners[1]] {
        let bundle: ExportBundle = decode_bundle(&proposal).unwrap();
        bundle.verify_hash(harness.chain_id).unwrap();
        let signature = sign_safe_hash(owner, bundle.safe_transaction_hash).await.unwrap();
        signed.push(encode_bundle(&bundle.signed(signature)).unwrap());
    }

    let signed: Vec<SignedBundle> = signed.iter().map(|s| decode_bundle(s).unwrap()).collect();
    let (bundle, signatures) = merge_signed_bundles(&signed).unwrap();
    let signature_bytes = build_signature_bytes(&signatures);

    let receipt = ISafe::new(safe_address, &harness.provider)
        .call_builder(&bundle.safe_transaction.exec_call(signature_bytes))
        .send()
        .await
        .expect("Failed to send execTransaction")
        .get_receipt()
        .await
        .expect("Failed to get receipt");
    assert!(receipt.status(), "execTransaction should succeed");

    assert_eq!(harness.get_balance(alice).await.unwrap(), U256::from(1000));
    assert_eq!(harness.get_balance(bob).await.unwrap(), U256::from(2000));
    assert_eq!(hasher.nonce().await.unwrap(), U256::from(1));
}

/// The executing owner contributes an approved-hash signature instead of signing
#[tokio::test]
async fn test_sender_approval_with_single_transfer() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe_address = harness
        .deploy_safe(harness.owner_addresses(), 2, U256::from(6003))
        .await
        .expect("Failed to deploy Safe");
    fund(&harness, safe_address).await;

    let recipient = Address::repeat_byte(0xc3);
    let hasher = TransactionHasher::new(harness.reader(), harness.addresses.batch_executor())
        .with_account(safe_address);
    let prepared = hasher
        .prepare(&[MetaTransaction::eth_transfer(recipient, U256::from(777))])
        .await
        .expect("Failed to prepare");
    assert_eq!(prepared.params.operation, Operation::Call);
    assert_eq!(prepared.params.to, recipient);

    // owners[0] sends, so msg.sender == owner satisfies the v=1 signature
    let signatures = vec![
        sign_safe_hash(&harness.owners[1], prepared.hash).await.unwrap(),
        approved_hash_signature(harness.owners[0].address()),
    ];

    let receipt = ISafe::new(safe_address, &harness.provider)
        .call_builder(&prepared.params.exec_call(build_signature_bytes(&signatures)))
        .send()
        .await
        .expect("Failed to send execTransaction")
        .get_receipt()
        .await
        .expect("Failed to get receipt");
    assert!(receipt.status());
    assert_eq!(harness.get_balance(recipient).await.unwrap(), U256::from(777));
}

/// A threshold not met is rejected on-chain, not client-side
#[tokio::test]
async fn test_insufficient_signatures_revert() {
    skip_if_no_rpc!();

    let harness = TestHarness::new().await;
    let safe_address = harness
        .deploy_safe(harness.owner_addresses(), 2, U256::from(6004))
        .await
        .expect("Failed to deploy Safe");
    fund(&harness, safe_address).await;

    let hasher = TransactionHasher::new(harness.reader(), harness.addresses.batch_executor())
        .with_account(safe_address);
    let prepared = hasher
        .prepare(&[MetaTransaction::eth_transfer(Address::repeat_byte(0xd4), U256::from(1))])
        .await
        .unwrap();

    let one = vec![sign_safe_hash(&harness.owners[1], prepared.hash).await.unwrap()];
    let result = ISafe::new(safe_address, &harness.provider)
        .call_builder(&prepared.params.exec_call(build_signature_bytes(&one)))
        .call()
        .await;

    assert!(result.is_err(), "execTransaction below threshold should revert");
}
