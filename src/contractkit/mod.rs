//! Read-only access to Celo core contracts.
//!
//! # Data Flow
//! ```text
//! RegistryResolver (registry at 0x…ce10, getAddressForString)
//!     → BalanceReader (GoldToken, StableToken, StableTokenEUR)
//!     → BalanceSource::balance → Balance { CELO, cUSD, cEUR }
//! ```

pub mod balance;
pub mod registry;
pub mod token;

pub use balance::{BalanceReader, BalanceSource};
pub use registry::{RegistryResolver, REGISTRY_ADDRESS};
pub use token::{Balance, CeloToken};
