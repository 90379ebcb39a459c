//! `celo-lite`: command line front-end for the Celo light client.
//!
//! Key commands (`keygen`, `public-key`, `address`, `compress`,
//! `decompress`) run offline. Everything else talks to the configured node.

use std::path::PathBuf;
use std::time::Duration;

use alloy::primitives::{Address, TxHash, U256};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};

use celo_client_lite::account;
use celo_client_lite::config::{self, validation::validate_config, ConfigError};
use celo_client_lite::ledger::Receipt;
use celo_client_lite::lifecycle::Cancellation;
use celo_client_lite::observability::{logging, metrics};
use celo_client_lite::{CeloClient, ClientConfig, Error};

#[derive(Parser)]
#[command(name = "celo-lite")]
#[command(about = "Lightweight Celo client: keys, transfers and confirmations", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long, env = "CELO_CONFIG")]
    config: Option<PathBuf>,

    /// Node URL, overriding the configuration file.
    #[arg(short, long, env = "CELO_RPC_URL")]
    rpc_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a new private key and print its public key and address
    Keygen,
    /// Derive the uncompressed public key of a private key
    PublicKey {
        #[arg(long, env = "CELO_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
    },
    /// Derive the address of an uncompressed public key
    Address { public_key: String },
    /// Compress an uncompressed public key
    Compress { public_key: String },
    /// Decompress a compressed public key
    Decompress { compressed: String },
    /// Print the latest block number
    Block,
    /// Print CELO, cUSD and cEUR balances of an address
    Balance { address: Address },
    /// Send native CELO
    Send {
        #[arg(long, env = "CELO_PRIVATE_KEY", hide_env_values = true)]
        private_key: String,
        /// Sender; derived from the private key when omitted.
        #[arg(long)]
        from: Option<Address>,
        #[arg(long)]
        to: Address,
        /// Amount in the smallest unit.
        #[arg(long)]
        amount: U256,
        #[arg(long)]
        gateway_fee_recipient: Option<Address>,
        #[arg(long)]
        gateway_fee: Option<U256>,
        /// Wait for the receipt after broadcasting.
        #[arg(long)]
        wait: bool,
        /// Confirmation deadline in seconds.
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Broadcast a hex-encoded signed transaction
    SendRaw {
        raw: String,
        #[arg(long)]
        wait: bool,
        #[arg(long)]
        timeout: Option<u64>,
    },
    /// Wait for the receipt of a transaction
    Wait {
        hash: TxHash,
        #[arg(long)]
        timeout: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    logging::init(&config.observability.log_level);
    if let Some(addr) = &config.observability.metrics_address {
        metrics::init_metrics(addr.parse()?);
    }

    let output = match cli.command {
        Commands::Keygen => {
            let private_key = account::generate_private_key();
            let public_key = account::must_derive_public_key(&private_key);
            json!({
                "private_key": private_key,
                "public_key": public_key,
                "compressed_public_key": account::must_compress_public_key(&public_key),
                "address": account::must_derive_address(&public_key),
            })
        }
        Commands::PublicKey { private_key } => {
            json!({ "public_key": account::derive_public_key(&private_key)? })
        }
        Commands::Address { public_key } => {
            json!({ "address": account::derive_address(&public_key)? })
        }
        Commands::Compress { public_key } => {
            json!({ "compressed_public_key": account::compress_public_key(&public_key)? })
        }
        Commands::Decompress { compressed } => {
            json!({ "public_key": account::decompress_public_key(&compressed)? })
        }
        Commands::Block => {
            let client = CeloClient::connect(&config).await?;
            json!({ "block_number": client.latest_block().await? })
        }
        Commands::Balance { address } => {
            let client = CeloClient::connect(&config).await?;
            serde_json::to_value(client.balance(address).await?)?
        }
        Commands::Send {
            private_key,
            from,
            to,
            amount,
            gateway_fee_recipient,
            gateway_fee,
            wait,
            timeout,
        } => {
            let from = match from {
                Some(from) => from,
                None => account::parse_address(&account::derive_address(
                    &account::derive_public_key(&private_key)?,
                )?)?,
            };
            let client = CeloClient::connect(&config).await?;
            let hash = client
                .send_native(&private_key, from, to, amount, gateway_fee_recipient, gateway_fee)
                .await?;
            finish(&client, hash, wait, timeout).await?
        }
        Commands::SendRaw { raw, wait, timeout } => {
            let client = CeloClient::connect(&config).await?;
            let hash = client.send_raw_transaction(&raw).await?;
            finish(&client, hash, wait, timeout).await?
        }
        Commands::Wait { hash, timeout } => {
            let client = CeloClient::connect(&config).await?;
            finish(&client, hash, true, timeout).await?
        }
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn load_config(cli: &Cli) -> Result<ClientConfig, ConfigError> {
    let mut config = config::load_or_default(cli.config.as_deref())?;
    if let Some(url) = &cli.rpc_url {
        config.rpc.url = url.clone();
        validate_config(&config).map_err(ConfigError::Validation)?;
    }
    Ok(config)
}

/// Report a broadcast transaction, waiting for its receipt if asked to.
async fn finish(
    client: &CeloClient,
    hash: TxHash,
    wait: bool,
    timeout: Option<u64>,
) -> Result<Value, Box<dyn std::error::Error>> {
    if !wait {
        return Ok(json!({ "transaction_hash": hash }));
    }

    let timeout = timeout.map(Duration::from_secs).unwrap_or(client.default_timeout());
    let cancellation = Cancellation::new();
    cancellation.cancel_on_ctrl_c();

    match client
        .wait_for_transaction_with_cancel(hash, timeout, cancellation.token())
        .await
    {
        Ok(receipt) => Ok(receipt_json(&receipt)),
        Err(Error::ExecutionFailed(receipt)) => {
            eprintln!("{}", serde_json::to_string_pretty(&receipt_json(&receipt))?);
            Err(Error::ExecutionFailed(receipt).into())
        }
        Err(e) => Err(e.into()),
    }
}

fn receipt_json(receipt: &Receipt) -> Value {
    json!({
        "transaction_hash": receipt.transaction_hash,
        "block_number": receipt.block_number,
        "gas_used": receipt.gas_used,
        "status": receipt.status,
    })
}
