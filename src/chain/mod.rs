//! Deployment addresses and chain configuration

mod config;

pub use config::{chain_ids, ChainAddresses, ChainConfig};
