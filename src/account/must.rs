//! Abort-on-error wrappers around the key conversions.
//!
//! Only for inputs already known to be valid, such as a key this process
//! just generated. Each wrapper calls the fallible variant and nothing else.

use crate::account::key;

fn or_abort(result: crate::error::Result<String>, operation: &str) -> String {
    result.unwrap_or_else(|e| panic!("{operation}: {e}"))
}

/// [`key::derive_public_key`], panicking on error.
pub fn must_derive_public_key(private_key_hex: &str) -> String {
    or_abort(key::derive_public_key(private_key_hex), "derive public key")
}

/// [`key::derive_address`], panicking on error.
pub fn must_derive_address(public_key_hex: &str) -> String {
    or_abort(key::derive_address(public_key_hex), "derive address")
}

/// [`key::compress_public_key`], panicking on error.
pub fn must_compress_public_key(public_key_hex: &str) -> String {
    or_abort(key::compress_public_key(public_key_hex), "compress public key")
}

/// [`key::decompress_public_key`], panicking on error.
pub fn must_decompress_public_key(compressed_hex: &str) -> String {
    or_abort(key::decompress_public_key(compressed_hex), "decompress public key")
}
