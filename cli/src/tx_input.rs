//! Transaction and bundle inputs from the command line

use std::fs;
use std::path::Path;

use alloy::primitives::{hex, Bytes, U256};
use color_eyre::eyre::{eyre, Result};
use safe_lite::codec::parse_address;
use safe_lite::{MetaTransaction, Operation};
use serde::Deserialize;

use crate::cli::ProposeArgs;

/// Safe Transaction Builder entry
#[derive(Debug, Deserialize)]
pub struct BuilderTransaction {
    pub to: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub operation: u8,
}

/// Either a bare array or the builder's `{ "transactions": [...] }` envelope
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BuilderFile {
    List(Vec<BuilderTransaction>),
    Envelope { transactions: Vec<BuilderTransaction> },
}

/// Collects every transaction given to `propose`, in flag order: file, raw, native,
/// ERC-20.
pub fn collect_transactions(args: &ProposeArgs) -> Result<Vec<MetaTransaction>> {
    let mut txs = match &args.tx_file {
        Some(path) => load_tx_file(path)?,
        None => Vec::new(),
    };

    for arg in &args.txs {
        txs.push(parse_tx_arg(arg)?);
    }
    for arg in &args.eth_transfers {
        txs.push(parse_eth_transfer(arg)?);
    }
    for arg in &args.erc20_transfers {
        txs.push(parse_erc20_transfer(arg)?);
    }

    Ok(txs)
}

/// "0xTo:value:0xdata"; value and data may be empty
pub fn parse_tx_arg(arg: &str) -> Result<MetaTransaction> {
    let parts: Vec<&str> = arg.split(':').collect();
    let [to, value, data] = parts.as_slice() else {
        return Err(eyre!("Invalid transaction '{}': expected TO:VALUE:DATA", arg));
    };
    Ok(MetaTransaction::new(parse_address(to)?, parse_value(value)?, parse_hex_data(data)?))
}

/// "0xTo:amount"
pub fn parse_eth_transfer(arg: &str) -> Result<MetaTransaction> {
    let (to, amount) = arg
        .split_once(':')
        .ok_or_else(|| eyre!("Invalid transfer '{}': expected TO:AMOUNT", arg))?;
    Ok(MetaTransaction::eth_transfer(parse_address(to)?, parse_value(amount)?))
}

/// "0xToken:0xTo:amount"
pub fn parse_erc20_transfer(arg: &str) -> Result<MetaTransaction> {
    let parts: Vec<&str> = arg.split(':').collect();
    let [token, to, amount] = parts.as_slice() else {
        return Err(eyre!("Invalid ERC-20 transfer '{}': expected TOKEN:TO:AMOUNT", arg));
    };
    Ok(MetaTransaction::erc20_transfer(
        parse_address(token)?,
        parse_address(to)?,
        parse_value(amount)?,
    ))
}

/// Loads a Safe Transaction Builder JSON file
pub fn load_tx_file(path: &str) -> Result<Vec<MetaTransaction>> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(eyre!("Transaction file not found: {}", path.display()));
    }

    let content = fs::read_to_string(path)?;
    parse_tx_file(&content)
}

pub fn parse_tx_file(content: &str) -> Result<Vec<MetaTransaction>> {
    let file: BuilderFile =
        serde_json::from_str(content).map_err(|e| eyre!("Invalid transaction JSON: {}", e))?;
    let entries = match file {
        BuilderFile::List(entries) => entries,
        BuilderFile::Envelope { transactions } => transactions,
    };

    entries.into_iter().map(convert_transaction).collect()
}

fn convert_transaction(tx: BuilderTransaction) -> Result<MetaTransaction> {
    let operation = Operation::from_u8(tx.operation)
        .ok_or_else(|| eyre!("Invalid operation: {}", tx.operation))?;
    let data = parse_hex_data(tx.data.as_deref().unwrap_or_default())?;

    Ok(MetaTransaction::new(parse_address(&tx.to)?, parse_value(&tx.value)?, data)
        .with_operation(operation))
}

/// Reads a bundle argument: literal `0x...` hex, or a path to a file holding it
pub fn read_bundle_arg(arg: &str) -> Result<String> {
    let arg = arg.trim();
    if arg.starts_with("0x") || arg.starts_with("0X") {
        return Ok(arg.to_string());
    }
    fs::read_to_string(arg)
        .map(|content| content.trim().to_string())
        .map_err(|e| eyre!("Cannot read bundle file '{}': {}", arg, e))
}

pub fn parse_value(s: &str) -> Result<U256> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(U256::ZERO);
    }
    if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        U256::from_str_radix(digits, 16).map_err(|e| eyre!("Invalid hex value: {}", e))
    } else {
        s.parse::<U256>().map_err(|e| eyre!("Invalid value: {}", e))
    }
}

fn parse_hex_data(s: &str) -> Result<Bytes> {
    let s = s.trim();
    let s = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(s).map_err(|e| eyre!("Invalid hex data: {}", e))?;
    Ok(Bytes::from(bytes))
}
