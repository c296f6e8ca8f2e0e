use color_eyre::eyre::Result;
use safe_lite::codec::parse_address;
use safe_lite::{ChainAddresses, RpcReader, StorageSlotReader};
use tracing::warn;

use crate::cli::{connect, InfoArgs};
use crate::output::SafeInfoOutput;

pub async fn run(args: InfoArgs, json: bool) -> Result<()> {
    let provider = connect(&args.rpc_url)?;
    let safe_address = parse_address(&args.safe)?;

    let reader = StorageSlotReader::new(RpcReader::new(provider));

    let recognized_singleton = reader
        .is_safe(safe_address, &ChainAddresses::known_singletons())
        .await?;
    if !recognized_singleton {
        warn!(%safe_address, "slot 0 does not hold a known Safe singleton");
    }

    let storage = reader
        .fetch_storage_data(safe_address, args.module_page_size)
        .await?;

    let output = SafeInfoOutput {
        address: safe_address,
        recognized_singleton,
        storage,
    };

    output.print(json);

    Ok(())
}
