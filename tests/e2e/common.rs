//! Common test utilities for E2E tests

use alloy::network::{AnyNetwork, EthereumWallet};
use alloy::node_bindings::{Anvil, AnvilInstance};
use alloy::primitives::{Address, U256};
use alloy::providers::{DynProvider, Provider, ProviderBuilder};
use alloy::signers::local::PrivateKeySigner;
use safe_lite::create2::{deployed_proxy, fetch_proxy_creation_code, verify_proxy_address};
use safe_lite::{
    encode_setup_call, ensure_deployment_address, ChainAddresses, ISafeProxyFactory, RpcReader,
};

/// Macro to skip tests when ETH_RPC_URL is not set
#[macro_export]
macro_rules! skip_if_no_rpc {
    () => {
        if std::env::var("ETH_RPC_URL").is_err() {
            eprintln!("Skipping test: ETH_RPC_URL not set");
            return;
        }
    };
}

/// Test harness that spawns Anvil with forking and provides a provider + owner keys
pub struct TestHarness {
    /// Sends from `owners[0]`
    pub provider: DynProvider<AnyNetwork>,
    pub owners: Vec<PrivateKeySigner>,
    pub addresses: ChainAddresses,
    pub chain_id: u64,
    pub _anvil: AnvilInstance,
}

impl TestHarness {
    /// Creates a new test harness with Anvil forking from ETH_RPC_URL
    ///
    /// Supports optional environment variables for rate limiting:
    /// - `ANVIL_COMPUTE_UNITS_PER_SECOND`: Compute units per second
    /// - `ANVIL_RETRIES`: Number of retries for RPC requests
    /// - `ANVIL_TIMEOUT`: Timeout in milliseconds for RPC requests
    pub async fn new() -> Self {
        let rpc_url = std::env::var("ETH_RPC_URL").expect("ETH_RPC_URL must be set");

        let mut args = vec!["--hardfork".to_string(), "cancun".to_string()];
        for (var, flag) in [
            ("ANVIL_COMPUTE_UNITS_PER_SECOND", "--compute-units-per-second"),
            ("ANVIL_RETRIES", "--retries"),
            ("ANVIL_TIMEOUT", "--timeout"),
        ] {
            if let Ok(value) = std::env::var(var) {
                args.push(flag.to_string());
                args.push(value);
            }
        }

        let args_ref: Vec<&str> = args.iter().map(|s| s.as_str()).collect();
        let anvil = Anvil::new().fork(rpc_url).args(args_ref).spawn();

        let owners: Vec<PrivateKeySigner> =
            anvil.keys()[..3].iter().cloned().map(Into::into).collect();

        let provider = ProviderBuilder::new()
            .network::<AnyNetwork>()
            .wallet(EthereumWallet::from(owners[0].clone()))
            .connect_http(anvil.endpoint_url())
            .erased();

        let chain_id = provider.get_chain_id().await.expect("Failed to get chain id");

        Self {
            provider,
            owners,
            addresses: ChainAddresses::v1_4_1(),
            chain_id,
            _anvil: anvil,
        }
    }

    pub fn owner_addresses(&self) -> Vec<Address> {
        self.owners.iter().map(|o| o.address()).collect()
    }

    pub fn reader(&self) -> RpcReader<DynProvider<AnyNetwork>> {
        RpcReader::new(self.provider.clone())
    }

    /// Deploys a Safe, checking the factory agrees with the computed address first
    pub async fn deploy_safe(
        &self,
        owners: Vec<Address>,
        threshold: u64,
        salt_nonce: U256,
    ) -> Result<Address, Box<dyn std::error::Error>> {
        let factory = self.addresses.proxy_factory;
        let singleton = self.addresses.safe_singleton;
        let initializer = encode_setup_call(&owners, threshold, self.addresses.fallback_handler);

        let reader = self.reader();
        let creation_code = fetch_proxy_creation_code(&reader, factory).await?;
        let safe_address =
            verify_proxy_address(&reader, factory, singleton, &initializer, salt_nonce, &creation_code)
                .await?;

        if !self.provider.get_code_at(safe_address).await?.is_empty() {
            return Ok(safe_address);
        }

        let receipt = ISafeProxyFactory::new(factory, &self.provider)
            .createProxyWithNonce(singleton, initializer, salt_nonce)
            .send()
            .await?
            .get_receipt()
            .await?;

        let deployed = deployed_proxy(receipt.inner.logs().iter().map(|log| &log.inner), factory)
            .ok_or("Safe deployment failed: no ProxyCreation event")?;
        ensure_deployment_address(safe_address, deployed)?;

        Ok(safe_address)
    }

    /// Mints ETH to an address using anvil_setBalance
    pub async fn mint_eth(&self, to: Address, amount: U256) -> Result<(), Box<dyn std::error::Error>> {
        let params = serde_json::json!([format!("{:?}", to), format!("0x{:x}", amount)]);

        // anvil_setBalance returns null on success
        self.provider
            .client()
            .request::<_, Option<bool>>("anvil_setBalance", params)
            .await?;

        Ok(())
    }

    pub async fn get_balance(&self, address: Address) -> Result<U256, Box<dyn std::error::Error>> {
        Ok(self.provider.get_balance(address).await?)
    }
}
