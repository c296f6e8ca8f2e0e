use alloy::primitives::{Address, Bytes, TxHash, B256, U256};
use safe_lite::types::decimal;
use safe_lite::{MetaTransaction, SafeStorage};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{json}"),
        Err(e) => eprintln!("Failed to serialize output: {e}"),
    }
}

#[derive(Serialize)]
pub struct SafeInfoOutput {
    pub address: Address,
    pub recognized_singleton: bool,
    #[serde(flatten)]
    pub storage: SafeStorage,
}

impl SafeInfoOutput {
    pub fn print(&self, json: bool) {
        if json {
            print_json(self);
            return;
        }

        let s = &self.storage;
        println!("Safe: {}", self.address);
        println!("Singleton: {}", s.singleton);
        if !self.recognized_singleton {
            println!("  (not a known Safe singleton)");
        }
        println!("Nonce: {}", s.nonce);
        println!("Threshold: {} of {}", s.threshold, s.owner_count);
        println!("Fallback Handler: {}", s.fallback_handler);
        println!("Guard: {}", s.guard);
        println!("Owners:");
        for (i, owner) in s.owners.iter().enumerate() {
            println!("  {}: {}", i + 1, owner);
        }
        println!("Modules:");
        if s.modules.is_empty() {
            println!("  (none)");
        }
        for (i, module) in s.modules.iter().enumerate() {
            println!("  {}: {}", i + 1, module);
        }
    }
}

#[derive(Serialize)]
pub struct CreateOutput {
    pub safe_address: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<TxHash>,
    pub owners: Vec<Address>,
    pub threshold: u64,
    pub already_deployed: bool,
}

impl CreateOutput {
    pub fn print(&self, json: bool) {
        if json {
            print_json(self);
        } else {
            println!("Safe Address: {}", self.safe_address);
            if self.already_deployed {
                println!("  Status: Already deployed");
            } else if let Some(tx_hash) = self.tx_hash {
                println!("  Tx Hash: {}", tx_hash);
            }
            println!("  Threshold: {}", self.threshold);
            println!("  Owners:");
            for (i, owner) in self.owners.iter().enumerate() {
                println!("    {}: {}", i + 1, owner);
            }
        }
    }
}

#[derive(Serialize)]
pub struct ProposeOutput {
    pub safe: Address,
    #[serde(with = "decimal")]
    pub nonce: U256,
    pub safe_tx_hash: B256,
    pub bundle: String,
}

impl ProposeOutput {
    pub fn print(&self, json: bool) {
        if json {
            print_json(self);
        } else {
            println!("Safe: {}", self.safe);
            println!("Nonce: {}", self.nonce);
            println!("Safe Tx Hash: {}", self.safe_tx_hash);
            println!();
            println!("Export bundle (share with the other owners):");
            println!("{}", self.bundle);
        }
    }
}

#[derive(Serialize)]
pub struct SignOutput {
    pub signer: Address,
    pub safe_tx_hash: B256,
    pub signed_bundle: String,
}

impl SignOutput {
    pub fn print(&self, json: bool) {
        if json {
            print_json(self);
        } else {
            println!("Signer: {}", self.signer);
            println!("Safe Tx Hash: {}", self.safe_tx_hash);
            println!();
            println!("Signed bundle:");
            println!("{}", self.signed_bundle);
        }
    }
}

#[derive(Serialize)]
pub struct AggregateOutput {
    pub safe: Address,
    pub safe_tx_hash: B256,
    pub signers: Vec<Address>,
    pub signatures: Bytes,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution: Option<ExecutionOutput>,
}

impl AggregateOutput {
    pub fn print(&self, json: bool) {
        if json {
            print_json(self);
            return;
        }

        println!("Safe: {}", self.safe);
        println!("Safe Tx Hash: {}", self.safe_tx_hash);
        println!("Signers ({}):", self.signers.len());
        for signer in &self.signers {
            println!("  {}", signer);
        }
        println!("Signatures: {}", self.signatures);
        if let Some(execution) = &self.execution {
            println!();
            execution.print(false);
        }
    }
}

#[derive(Serialize)]
pub struct ExecutionOutput {
    pub tx_hash: TxHash,
    pub success: bool,
    pub gas_used: u64,
}

impl ExecutionOutput {
    pub fn print(&self, json: bool) {
        if json {
            print_json(self);
        } else {
            println!("Transaction Executed:");
            println!("  Tx Hash: {}", self.tx_hash);
            println!("  Success: {}", self.success);
            println!("  Gas Used: {}", self.gas_used);
        }
    }
}

pub fn print_transactions_summary(txs: &[MetaTransaction]) {
    println!("Transactions ({}):", txs.len());
    for (i, tx) in txs.iter().enumerate() {
        println!("  {}. To: {}", i + 1, tx.to);
        if !tx.value.is_zero() {
            println!("     Value: {} wei", tx.value);
        }
        println!("     Data: {} bytes", tx.data.len());
    }
}

pub fn confirm_prompt(message: &str) -> bool {
    use dialoguer::Confirm;

    Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .unwrap_or(false)
}
