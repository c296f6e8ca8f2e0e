use alloy::network::ReceiptResponse;
use alloy::providers::Provider;
use color_eyre::eyre::{eyre, Result};
use safe_lite::encoding::merge_signed_bundles;
use safe_lite::reader::call_typed;
use safe_lite::signing::{build_signature_bytes, validate_signature};
use safe_lite::{decode_bundle, Error, ISafe, RpcReader, SignedBundle};
use tracing::info;

use crate::cli::{connect, connect_wallet, AggregateArgs};
use crate::output::{confirm_prompt, AggregateOutput, ExecutionOutput};
use crate::tx_input::read_bundle_arg;
use crate::wallet::create_signer;

pub async fn run(args: AggregateArgs, json: bool) -> Result<()> {
    let signed = args
        .bundles
        .iter()
        .map(|arg| Ok(decode_bundle::<SignedBundle>(&read_bundle_arg(arg)?)?))
        .collect::<Result<Vec<_>>>()?;

    let (bundle, signatures) = merge_signed_bundles(&signed)?;
    for signature in &signatures {
        validate_signature(signature)?;
    }

    let signature_bytes = build_signature_bytes(&signatures);
    let mut signers: Vec<_> = signatures.iter().map(|s| s.signer).collect();
    signers.sort();

    let mut output = AggregateOutput {
        safe: bundle.safe_account,
        safe_tx_hash: bundle.safe_transaction_hash,
        signers,
        signatures: signature_bytes.clone(),
        execution: None,
    };

    if !args.execute {
        output.print(json);
        return Ok(());
    }

    let rpc_url = args
        .rpc_url
        .as_deref()
        .ok_or_else(|| eyre!("--rpc-url is required with --execute"))?;
    let provider = connect(rpc_url)?;
    let chain_id = provider.get_chain_id().await?;
    bundle.verify_hash(chain_id)?;

    // Nonce may have moved on since the proposal
    let reader = RpcReader::new(provider);
    let nonce = call_typed(&reader, bundle.safe_account, ISafe::nonceCall {}).await?;
    if nonce != bundle.safe_transaction.nonce {
        return Err(eyre!(
            "Safe nonce is {} but the transaction was proposed at nonce {}",
            nonce,
            bundle.safe_transaction.nonce
        ));
    }
    let reported = call_typed(&reader, bundle.safe_account, bundle.safe_transaction.hash_call()).await?;
    if reported != bundle.safe_transaction_hash {
        return Err(Error::HashMismatch {
            computed: bundle.safe_transaction_hash,
            reported,
        }
        .into());
    }

    if !json {
        output.print(false);
        println!();
    }

    if !args.no_confirm && !json && !confirm_prompt("Execute transaction?") {
        println!("Aborted");
        return Ok(());
    }

    let signer = create_signer(&args.wallet)?;
    let wallet_provider = connect_wallet(rpc_url, signer)?;

    let safe = ISafe::new(bundle.safe_account, &wallet_provider);
    let exec_call = bundle.safe_transaction.exec_call(signature_bytes);
    let receipt = safe
        .call_builder(&exec_call)
        .send()
        .await
        .map_err(|e| eyre!("Failed to send transaction: {}", e))?
        .get_receipt()
        .await
        .map_err(|e| eyre!("Failed to get receipt: {}", e))?;

    info!(tx_hash = %receipt.transaction_hash, "execTransaction mined");

    let execution = ExecutionOutput {
        tx_hash: receipt.transaction_hash,
        success: receipt.status(),
        gas_used: receipt.gas_used,
    };

    if json {
        output.execution = Some(execution);
        output.print(true);
    } else {
        execution.print(false);
    }

    Ok(())
}
