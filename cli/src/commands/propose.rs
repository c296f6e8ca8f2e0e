use alloy::providers::Provider;
use color_eyre::eyre::{eyre, Result};
use safe_lite::codec::parse_address;
use safe_lite::{encode_bundle, RpcReader, TransactionHasher};

use crate::cli::{connect, ProposeArgs};
use crate::output::{print_transactions_summary, ProposeOutput};
use crate::tx_input::collect_transactions;

pub async fn run(args: ProposeArgs, json: bool) -> Result<()> {
    let txs = collect_transactions(&args)?;
    if txs.is_empty() {
        return Err(eyre!(
            "No transactions specified. Use --tx, --eth-transfer, --erc20-transfer or --tx-file"
        ));
    }

    let safe_address = parse_address(&args.safe)?;
    let provider = connect(&args.rpc_url)?;
    let config = args.deployment.for_chain(provider.get_chain_id().await?)?;

    let hasher = TransactionHasher::new(RpcReader::new(provider), config.addresses.batch_executor())
        .with_account(safe_address);
    let prepared = hasher.prepare(&txs).await?;

    let bundle = prepared.export(safe_address, txs);
    // Verifier hash must match the local EIP-712 hash
    bundle.verify_hash(config.chain_id)?;

    if !json {
        print_transactions_summary(&bundle.transactions);
        println!();
    }

    let output = ProposeOutput {
        safe: safe_address,
        nonce: prepared.params.nonce,
        safe_tx_hash: prepared.hash,
        bundle: encode_bundle(&bundle)?,
    };

    output.print(json);

    Ok(())
}
