use alloy::providers::Provider;
use color_eyre::eyre::{eyre, Result};
use safe_lite::reader::call_typed;
use safe_lite::signing::sign_safe_hash;
use safe_lite::{decode_bundle, encode_bundle, ExportBundle, ISafe, RpcReader};
use tracing::warn;

use crate::cli::{connect, SignArgs};
use crate::output::{print_transactions_summary, SignOutput};
use crate::tx_input::read_bundle_arg;
use crate::wallet::create_signer;

pub async fn run(args: SignArgs, json: bool) -> Result<()> {
    let bundle: ExportBundle = decode_bundle(&read_bundle_arg(&args.bundle)?)?;

    let provider = args.rpc_url.as_deref().map(connect).transpose()?;
    let chain_id = match (args.chain_id, &provider) {
        (Some(chain_id), _) => chain_id,
        (None, Some(provider)) => provider.get_chain_id().await?,
        (None, None) => return Err(eyre!("Chain ID unknown. Use --chain-id or --rpc-url")),
    };

    // Never sign a hash that does not commit to the transaction being shown
    bundle.verify_hash(chain_id)?;

    let signer = create_signer(&args.wallet)?;

    if let Some(provider) = provider {
        let reader = RpcReader::new(provider);
        let is_owner = call_typed(
            &reader,
            bundle.safe_account,
            ISafe::isOwnerCall {
                owner: signer.address(),
            },
        )
        .await?;
        if !is_owner {
            warn!(signer = %signer.address(), safe = %bundle.safe_account, "signer is not an owner of this Safe");
        }
    }

    if !json {
        println!("Safe: {}", bundle.safe_account);
        println!("Nonce: {}", bundle.safe_transaction.nonce);
        print_transactions_summary(&bundle.transactions);
        println!();
    }

    let safe_tx_hash = bundle.safe_transaction_hash;
    let signature = sign_safe_hash(&signer, safe_tx_hash).await?;
    let signed = bundle.signed(signature);

    let output = SignOutput {
        signer: signer.address(),
        safe_tx_hash,
        signed_bundle: encode_bundle(&signed)?,
    };

    output.print(json);

    Ok(())
}
