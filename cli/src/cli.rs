use alloy::network::{AnyNetwork, EthereumWallet};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use alloy::transports::http::reqwest::Url;
use clap::{Parser, Subcommand};
use color_eyre::eyre::{eyre, Result};
use safe_lite::codec::parse_address;
use safe_lite::{ChainAddresses, ChainConfig};

#[derive(Parser)]
#[command(name = "safe-lite")]
#[command(about = "Propose, sign and aggregate Safe transactions", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute (and optionally deploy) a Safe at its deterministic address
    Create(CreateArgs),

    /// Display Safe configuration read from storage
    Info(InfoArgs),

    /// Build a transaction, fetch its hash from the Safe and print an export bundle
    Propose(ProposeArgs),

    /// Check and sign an export bundle
    Sign(SignArgs),

    /// Merge signed bundles into the execTransaction signature bytes
    Aggregate(AggregateArgs),
}

#[derive(Parser, Clone)]
pub struct CreateArgs {
    /// RPC endpoint URL
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// Salt nonce for CREATE2 (default: 0)
    #[arg(long, default_value = "0")]
    pub salt_nonce: String,

    /// Owner address (repeatable; the signer is included when a wallet is given)
    #[arg(long = "owner", value_name = "ADDR")]
    pub owners: Vec<String>,

    /// Signature threshold (default: 1)
    #[arg(long, default_value = "1")]
    pub threshold: u64,

    /// Deploy against the L2 singleton (default except on mainnet and Sepolia)
    #[arg(long, conflicts_with = "l1")]
    pub l2: bool,

    /// Deploy against the plain singleton
    #[arg(long)]
    pub l1: bool,

    /// Only compute and display the address, don't deploy
    #[arg(long)]
    pub compute_only: bool,

    /// Skip confirmation prompt
    #[arg(long)]
    pub no_confirm: bool,

    #[command(flatten)]
    pub deployment: DeploymentArgs,

    #[command(flatten)]
    pub wallet: WalletArgs,
}

#[derive(Parser, Clone)]
pub struct InfoArgs {
    /// Safe contract address
    #[arg(long, env = "SAFE_ADDRESS")]
    pub safe: String,

    /// RPC endpoint URL
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// Modules fetched per getModulesPaginated page
    #[arg(long, default_value_t = safe_lite::storage::DEFAULT_MODULE_PAGE_SIZE)]
    pub module_page_size: u64,
}

#[derive(Parser, Clone)]
pub struct ProposeArgs {
    /// Safe contract address
    #[arg(long, env = "SAFE_ADDRESS")]
    pub safe: String,

    /// RPC endpoint URL
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: String,

    /// Raw call (repeatable, format: "0xTo:value:0xdata")
    #[arg(long = "tx", value_name = "TX")]
    pub txs: Vec<String>,

    /// Native transfer (repeatable, format: "0xTo:amount")
    #[arg(long = "eth-transfer", value_name = "TRANSFER")]
    pub eth_transfers: Vec<String>,

    /// ERC-20 transfer (repeatable, format: "0xToken:0xTo:amount")
    #[arg(long = "erc20-transfer", value_name = "TRANSFER")]
    pub erc20_transfers: Vec<String>,

    /// Path to a Safe Transaction Builder JSON file
    #[arg(long)]
    pub tx_file: Option<String>,

    #[command(flatten)]
    pub deployment: DeploymentArgs,
}

#[derive(Parser, Clone)]
pub struct SignArgs {
    /// Export bundle (0x-prefixed hex, or a path to a file containing it)
    #[arg(value_name = "BUNDLE")]
    pub bundle: String,

    /// Chain ID the Safe lives on (read from the RPC endpoint when omitted)
    #[arg(long, env = "ETH_CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// RPC endpoint URL
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: Option<String>,

    #[command(flatten)]
    pub wallet: WalletArgs,
}

#[derive(Parser, Clone)]
pub struct AggregateArgs {
    /// Signed bundles (0x-prefixed hex, or paths to files containing them)
    #[arg(value_name = "SIGNED", required = true)]
    pub bundles: Vec<String>,

    /// Submit execTransaction with the aggregated signatures
    #[arg(long)]
    pub execute: bool,

    /// RPC endpoint URL (required with --execute)
    #[arg(long, env = "ETH_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Skip confirmation prompt
    #[arg(long)]
    pub no_confirm: bool,

    #[command(flatten)]
    pub wallet: WalletArgs,
}

/// Overrides for the canonical Safe deployment
#[derive(Parser, Clone)]
pub struct DeploymentArgs {
    /// Start from the v1.3.0 deployment instead of v1.4.1
    #[arg(long)]
    pub v1_3_0: bool,

    /// Safe proxy factory address
    #[arg(long, env = "SAFE_PROXY_FACTORY_ADDRESS")]
    pub proxy_factory: Option<String>,

    /// Safe singleton address
    #[arg(long, env = "SAFE_SINGLETON_ADDRESS")]
    pub singleton: Option<String>,

    /// Safe L2 singleton address
    #[arg(long, env = "SAFE_SINGLETON_L2_ADDRESS")]
    pub singleton_l2: Option<String>,

    /// Fallback handler set on new Safes
    #[arg(long, env = "SAFE_FALLBACK_HANDLER_ADDRESS")]
    pub fallback_handler: Option<String>,

    /// MultiSendCallOnly address batches are delegate-called into
    #[arg(long, env = "SAFE_MULTI_SEND_CALL_ONLY_ADDRESS")]
    pub multi_send_call_only: Option<String>,
}

impl DeploymentArgs {
    /// Applies the overrides on top of the selected preset
    pub fn resolve(&self) -> Result<ChainAddresses> {
        let mut addresses = if self.v1_3_0 {
            ChainAddresses::v1_3_0()
        } else {
            ChainAddresses::v1_4_1()
        };

        let overrides = [
            (&self.proxy_factory, &mut addresses.proxy_factory),
            (&self.singleton, &mut addresses.safe_singleton),
            (&self.singleton_l2, &mut addresses.safe_singleton_l2),
            (&self.fallback_handler, &mut addresses.fallback_handler),
            (&self.multi_send_call_only, &mut addresses.multi_send_call_only),
        ];
        for (value, slot) in overrides {
            if let Some(value) = value {
                *slot = parse_address(value)?;
            }
        }

        Ok(addresses)
    }

    /// Resolved deployment paired with the connected chain
    pub fn for_chain(&self, chain_id: u64) -> Result<ChainConfig> {
        Ok(ChainConfig::new(chain_id, self.resolve()?))
    }
}

#[derive(Parser, Clone)]
pub struct WalletArgs {
    /// Raw private key
    #[arg(long, env = "PRIVATE_KEY")]
    pub private_key: Option<String>,

    /// Prompt for private key interactively
    #[arg(short, long)]
    pub interactive: bool,
}

impl CreateArgs {
    /// Explicit singleton choice, `None` when the chain default applies
    pub fn l2_choice(&self) -> Option<bool> {
        match (self.l2, self.l1) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }
}

impl WalletArgs {
    pub fn is_set(&self) -> bool {
        self.interactive || self.private_key.is_some()
    }
}

fn parse_rpc_url(rpc_url: &str) -> Result<Url> {
    rpc_url
        .parse()
        .map_err(|e| eyre!("Invalid RPC URL '{}': {}", rpc_url, e))
}

/// Read-only provider for `rpc_url`
pub fn connect(rpc_url: &str) -> Result<impl Provider<AnyNetwork> + Clone> {
    Ok(ProviderBuilder::new()
        .network::<AnyNetwork>()
        .connect_http(parse_rpc_url(rpc_url)?))
}

/// Provider that signs and sends transactions from `signer`
pub fn connect_wallet(rpc_url: &str, signer: PrivateKeySigner) -> Result<impl Provider<AnyNetwork>> {
    Ok(ProviderBuilder::new()
        .network::<AnyNetwork>()
        .wallet(EthereumWallet::from(signer))
        .connect_http(parse_rpc_url(rpc_url)?))
}
