//! Chain configuration for Safe contract addresses

use alloy::primitives::{address, Address};

/// Safe contract deployment used to create, batch and verify transactions.
///
/// Canonical deployments share one address on every chain (CREATE2 singleton
/// factory), so a preset is chain-independent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainAddresses {
    /// Safe singleton address
    pub safe_singleton: Address,
    /// Safe singleton emitting L2 events
    pub safe_singleton_l2: Address,
    /// Safe proxy factory address
    pub proxy_factory: Address,
    /// Compatibility fallback handler
    pub fallback_handler: Address,
    /// MultiSendCallOnly contract address
    pub multi_send_call_only: Address,
}

impl Default for ChainAddresses {
    fn default() -> Self {
        Self::v1_4_1()
    }
}

impl ChainAddresses {
    /// Returns the canonical Safe v1.4.1 addresses
    pub fn v1_4_1() -> Self {
        Self {
            safe_singleton: address!("41675C099F32341bf84BFc5382aF534df5C7461a"),
            safe_singleton_l2: address!("29fcB43b46531BcA003ddC8FCB67FFE91900C762"),
            proxy_factory: address!("4e1DCf7AD4e460CfD30791CCC4F9c8a4f820ec67"),
            fallback_handler: address!("fd0732Dc9E303f09fCEf3a7388Ad10A83459Ec99"),
            multi_send_call_only: address!("9641d764fc13c8B624c04430C7356C1C7C8102e2"),
        }
    }

    /// Returns the canonical Safe v1.3.0 addresses (for backwards compatibility)
    pub fn v1_3_0() -> Self {
        Self {
            safe_singleton: address!("d9Db270c1B5E3Bd161E8c8503c55cEABeE709552"),
            safe_singleton_l2: address!("3E5c63644E683549055b9Be8653de26E0B4CD36E"),
            proxy_factory: address!("a6B71E26C5e0845f74c812102Ca7114b6a896AB2"),
            fallback_handler: address!("f48f2B2d2a534e402487b3ee7C18c33Aec0Fe5e4"),
            multi_send_call_only: address!("40A2aCCbd92BCA938b02010E17A5b8929b49130D"),
        }
    }

    /// Contract that batched transactions are delegate-called into
    pub fn batch_executor(&self) -> Address {
        self.multi_send_call_only
    }

    /// Singleton to deploy proxies against
    pub fn singleton(&self, l2: bool) -> Address {
        if l2 {
            self.safe_singleton_l2
        } else {
            self.safe_singleton
        }
    }

    /// Every singleton (L1 and L2) of the canonical v1.4.1 and v1.3.0 deployments
    pub fn known_singletons() -> Vec<Address> {
        let v1_4_1 = Self::v1_4_1();
        let v1_3_0 = Self::v1_3_0();
        vec![
            v1_4_1.safe_singleton,
            v1_4_1.safe_singleton_l2,
            v1_3_0.safe_singleton,
            v1_3_0.safe_singleton_l2,
        ]
    }
}

/// Deployment resolved for one chain
#[derive(Debug, Clone)]
pub struct ChainConfig {
    /// Chain ID
    pub chain_id: u64,
    /// Contract addresses
    pub addresses: ChainAddresses,
}

impl ChainConfig {
    /// Pairs a chain ID with the deployment used on it
    pub fn new(chain_id: u64, addresses: ChainAddresses) -> Self {
        Self { chain_id, addresses }
    }

    /// Whether new accounts on this chain default to the L2 singleton.
    ///
    /// Only Ethereum mainnet and Sepolia use the plain singleton.
    pub fn prefers_l2_singleton(&self) -> bool {
        !matches!(self.chain_id, chain_ids::MAINNET | chain_ids::SEPOLIA)
    }

    /// Singleton to deploy against; `None` falls back to the chain default
    pub fn singleton(&self, l2: Option<bool>) -> Address {
        self.addresses
            .singleton(l2.unwrap_or_else(|| self.prefers_l2_singleton()))
    }
}

/// Chains served by the plain (non-L2) singleton
pub mod chain_ids {
    pub const MAINNET: u64 = 1;
    pub const SEPOLIA: u64 = 11155111;
}
