use alloy::primitives::{Address, U256};
use alloy::providers::Provider;
use color_eyre::eyre::{eyre, Result};
use safe_lite::codec::parse_address;
use safe_lite::create2::{deployed_proxy, fetch_proxy_creation_code, verify_proxy_address};
use safe_lite::{
    compute_create2_address, encode_setup_call, ensure_deployment_address, ISafeProxyFactory,
    RpcReader,
};

use crate::cli::{connect, connect_wallet, CreateArgs};
use crate::output::{confirm_prompt, CreateOutput};
use crate::tx_input::parse_value;
use crate::wallet::create_signer;

pub async fn run(args: CreateArgs, json: bool) -> Result<()> {
    // A wallet is only needed to deploy; computing works from --owner alone
    let signer = if args.compute_only && !args.wallet.is_set() {
        None
    } else {
        Some(create_signer(&args.wallet)?)
    };

    let mut owners: Vec<Address> = signer.iter().map(|s| s.address()).collect();
    for owner_str in &args.owners {
        let owner = parse_address(owner_str)?;
        if !owners.contains(&owner) {
            owners.push(owner);
        }
    }

    if owners.is_empty() {
        return Err(eyre!("No owners specified. Use --owner or provide a wallet"));
    }
    if args.threshold == 0 || args.threshold as usize > owners.len() {
        return Err(eyre!(
            "Invalid threshold: {} (must be 1-{})",
            args.threshold,
            owners.len()
        ));
    }

    let salt_nonce: U256 = parse_value(&args.salt_nonce)?;

    let provider = connect(&args.rpc_url)?;
    let reader = RpcReader::new(provider.clone());

    let config = args.deployment.for_chain(provider.get_chain_id().await?)?;
    let factory = config.addresses.proxy_factory;
    let singleton = config.singleton(args.l2_choice());

    let initializer = encode_setup_call(&owners, args.threshold, config.addresses.fallback_handler);

    let creation_code = fetch_proxy_creation_code(&reader, factory).await?;
    let safe_address = compute_create2_address(factory, singleton, &initializer, salt_nonce, &creation_code);

    if !json {
        println!("Computing Safe address...");
        println!("  Factory: {}", factory);
        println!("  Chain ID: {}", config.chain_id);
        println!("  Singleton: {}", singleton);
        println!("  Salt Nonce: {}", salt_nonce);
        println!("  Owners: {:?}", owners);
        println!("  Threshold: {}", args.threshold);
        println!();
    }

    let already_deployed = !provider.get_code_at(safe_address).await?.is_empty();

    if args.compute_only || already_deployed {
        if already_deployed && !json {
            println!("Safe already deployed at {}", safe_address);
        }
        let output = CreateOutput {
            safe_address,
            tx_hash: None,
            owners,
            threshold: args.threshold,
            already_deployed,
        };
        output.print(json);
        return Ok(());
    }

    // Abort on any disagreement with the factory before spending gas
    verify_proxy_address(&reader, factory, singleton, &initializer, salt_nonce, &creation_code).await?;

    if !json {
        println!("Safe Address: {} (confirmed by factory)", safe_address);
        println!();
    }

    if !args.no_confirm && !json && !confirm_prompt("Deploy new Safe?") {
        println!("Aborted");
        return Ok(());
    }

    let signer = signer.ok_or_else(|| eyre!("A wallet is required to deploy"))?;
    let wallet_provider = connect_wallet(&args.rpc_url, signer)?;

    let factory_contract = ISafeProxyFactory::new(factory, &wallet_provider);
    let pending_tx = factory_contract
        .createProxyWithNonce(singleton, initializer, salt_nonce)
        .send()
        .await
        .map_err(|e| eyre!("Failed to send transaction: {}", e))?;

    let receipt = pending_tx
        .get_receipt()
        .await
        .map_err(|e| eyre!("Failed to get receipt: {}", e))?;

    let tx_hash = receipt.transaction_hash;

    let deployed = deployed_proxy(receipt.inner.logs().iter().map(|log| &log.inner), factory)
        .ok_or_else(|| eyre!("Deployment failed: no ProxyCreation event in {}", tx_hash))?;
    ensure_deployment_address(safe_address, deployed)?;

    let output = CreateOutput {
        safe_address,
        tx_hash: Some(tx_hash),
        owners,
        threshold: args.threshold,
        already_deployed: false,
    };

    output.print(json);

    Ok(())
}
