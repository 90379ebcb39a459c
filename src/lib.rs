//! Lightweight client for the Celo blockchain.
//!
//! Derives keys and addresses, signs and broadcasts native transfers, and
//! polls the node until a transaction is confirmed, reverted or times out.
//!
//! ```ignore
//! use celo_client_lite::{account, CeloClient, ClientConfig};
//!
//! let client = CeloClient::connect(&ClientConfig::default()).await?;
//! let key = account::generate_private_key();
//! let from = account::parse_address(&account::must_derive_address(
//!     &account::must_derive_public_key(&key),
//! ))?;
//! let hash = client.send_native(&key, from, to, amount, None, None).await?;
//! let receipt = client.wait_for_transaction(hash, client.default_timeout()).await?;
//! ```

pub mod account;
pub mod client;
pub mod config;
pub mod contractkit;
pub mod error;
pub mod ledger;
pub mod lifecycle;
pub mod observability;

pub use client::CeloClient;
pub use config::ClientConfig;
pub use error::{Error, Result};
