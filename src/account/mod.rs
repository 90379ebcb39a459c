//! Key and address handling.
//!
//! # Data Flow
//! ```text
//! generate_private_key()
//!     → derive_public_key()   (uncompressed, format byte omitted)
//!     → compress_public_key() / decompress_public_key()
//!     → derive_address()      (keccak256 of coordinates, last 20 bytes)
//! ```
//!
//! # Security Constraints
//! - Private keys are never logged or persisted
//! - `must_*` wrappers abort the process and are for pre-validated input only

pub mod key;
pub mod must;

pub use key::{
    compress_public_key, decompress_public_key, derive_address, derive_public_key,
    generate_private_key, parse_address, parse_private_key,
};
pub use must::{
    must_compress_public_key, must_decompress_public_key, must_derive_address,
    must_derive_public_key,
};
