//! Conversions between private keys, public keys and addresses.
//!
//! # String conventions
//! - Private key: 64 lower-case hex digits, no `0x`.
//! - Uncompressed public key: 128 hex digits, no `0x`, without the `04`
//!   SEC1 format byte.
//! - Compressed public key: 66 hex digits, no `0x`, starting with the
//!   `02`/`03` parity byte.
//! - Address: 40 lower-case hex digits, no `0x`.
//!
//! Every input is length- and prefix-checked before decoding so malformed
//! strings are rejected instead of being silently truncated.

use alloy::primitives::{keccak256, Address};
use k256::ecdsa::SigningKey;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::PublicKey;
use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::{Error, Result};

/// Length in bytes of a secp256k1 private scalar.
pub const PRIVATE_KEY_LEN: usize = 32;

/// Length in bytes of an uncompressed public key without its format byte.
pub const PUBLIC_KEY_LEN: usize = 64;

/// Length in bytes of a compressed public key, parity byte included.
pub const COMPRESSED_PUBLIC_KEY_LEN: usize = 33;

/// SEC1 marker for an uncompressed point.
const UNCOMPRESSED_TAG: u8 = 0x04;

/// Generate a fresh private key from the operating system's CSPRNG.
///
/// # Panics
/// Panics if the entropy source is unavailable. A broken entropy source is
/// an environment failure, not something callers can recover from.
pub fn generate_private_key() -> String {
    loop {
        let mut bytes = [0u8; PRIVATE_KEY_LEN];
        if let Err(e) = OsRng.try_fill_bytes(&mut bytes) {
            panic!("entropy source unavailable: {e}");
        }
        // Out-of-range scalars are astronomically rare; draw again.
        if let Ok(key) = SigningKey::from_slice(&bytes) {
            return hex::encode(key.to_bytes());
        }
    }
}

/// Parse a hex private key into a signing key.
pub fn parse_private_key(private_key_hex: &str) -> Result<SigningKey> {
    let bytes = decode_exact(private_key_hex, PRIVATE_KEY_LEN, "private key")?;
    SigningKey::from_slice(&bytes)
        .map_err(|_| Error::InvalidKeyFormat("private key is not a valid secp256k1 scalar".into()))
}

/// Derive the uncompressed public key (format byte omitted) of a private key.
pub fn derive_public_key(private_key_hex: &str) -> Result<String> {
    let key = parse_private_key(private_key_hex)?;
    let point = key.verifying_key().to_encoded_point(false);
    Ok(hex::encode(&point.as_bytes()[1..]))
}

/// Derive the account address of an uncompressed public key.
pub fn derive_address(public_key_hex: &str) -> Result<String> {
    let public_key = parse_public_key(public_key_hex)?;
    Ok(hex::encode(address_of(&public_key)))
}

/// Compress an uncompressed public key (format byte omitted).
pub fn compress_public_key(public_key_hex: &str) -> Result<String> {
    let public_key = parse_public_key(public_key_hex)?;
    Ok(hex::encode(public_key.to_encoded_point(true).as_bytes()))
}

/// Expand a compressed public key back to its uncompressed form.
pub fn decompress_public_key(compressed_hex: &str) -> Result<String> {
    let bytes = decode_exact(compressed_hex, COMPRESSED_PUBLIC_KEY_LEN, "compressed public key")?;
    if bytes[0] != 0x02 && bytes[0] != 0x03 {
        return Err(Error::InvalidKeyFormat(format!(
            "compressed public key must start with 02 or 03, got {:02x}",
            bytes[0]
        )));
    }
    let public_key = PublicKey::from_sec1_bytes(&bytes)
        .map_err(|_| Error::InvalidKeyFormat("compressed public key is not on the curve".into()))?;
    Ok(hex::encode(&public_key.to_encoded_point(false).as_bytes()[1..]))
}

/// Parse a user-supplied address. Accepts an optional `0x` and any case.
pub fn parse_address(address: &str) -> Result<Address> {
    let digits = address.strip_prefix("0x").unwrap_or(address);
    let bytes = decode_exact(digits, Address::len_bytes(), "address")?;
    Ok(Address::from_slice(&bytes))
}

/// Address of a signing key, as used for `from` checks.
pub fn address_of_signing_key(key: &SigningKey) -> Address {
    address_of(&PublicKey::from(key.verifying_key()))
}

fn parse_public_key(public_key_hex: &str) -> Result<PublicKey> {
    let coordinates = decode_exact(public_key_hex, PUBLIC_KEY_LEN, "public key")?;
    let mut sec1 = Vec::with_capacity(PUBLIC_KEY_LEN + 1);
    sec1.push(UNCOMPRESSED_TAG);
    sec1.extend_from_slice(&coordinates);
    PublicKey::from_sec1_bytes(&sec1)
        .map_err(|_| Error::InvalidKeyFormat("public key is not on the curve".into()))
}

fn address_of(public_key: &PublicKey) -> Address {
    let point = public_key.to_encoded_point(false);
    Address::from_slice(&keccak256(&point.as_bytes()[1..])[12..])
}

fn decode_exact(input: &str, len: usize, what: &str) -> Result<Vec<u8>> {
    if input.len() != len * 2 {
        return Err(Error::InvalidKeyFormat(format!(
            "{what} must be {} hex digits, got {}",
            len * 2,
            input.len()
        )));
    }
    hex::decode(input).map_err(|e| Error::InvalidKeyFormat(format!("{what}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PRIVATE_KEY: &str = "c3af5ee3619783355c1504814e12230bdfc7b5e336f18fef336615e54881f4db";
    const PUBLIC_KEY: &str = "171363aaa6ddbfb5b3c1e6b24e8722518760f387a7133a8b472418f1fd320e96f62b4669753ae808af93653187f93fd4e972c1865ef023184408085cc40e007c";
    const COMPRESSED: &str = "02171363aaa6ddbfb5b3c1e6b24e8722518760f387a7133a8b472418f1fd320e96";
    const ADDRESS: &str = "5dB994389C7495996A313F830f21015B9F8127B0";

    #[test]
    fn test_known_vector() {
        let public_key = derive_public_key(PRIVATE_KEY).unwrap();
        assert_eq!(public_key, PUBLIC_KEY);
        assert_eq!(compress_public_key(&public_key).unwrap(), COMPRESSED);

        let address = derive_address(&public_key).unwrap();
        assert!(address.eq_ignore_ascii_case(ADDRESS));
        assert_eq!(address, address.to_lowercase());
    }

    #[test]
    fn test_decompress_round_trip() {
        assert_eq!(decompress_public_key(COMPRESSED).unwrap(), PUBLIC_KEY);

        let key = generate_private_key();
        let public_key = derive_public_key(&key).unwrap();
        let compressed = compress_public_key(&public_key).unwrap();
        assert_eq!(decompress_public_key(&compressed).unwrap(), public_key);
    }

    #[test]
    fn test_generated_key_format() {
        let key = generate_private_key();
        assert_eq!(key.len(), 64);
        assert!(key.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(key, generate_private_key());
    }

    #[test]
    fn test_address_derivation_is_stable() {
        let key = generate_private_key();
        let first = derive_address(&derive_public_key(&key).unwrap()).unwrap();
        let second = derive_address(&derive_public_key(&key).unwrap()).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 40);
    }

    #[test]
    fn test_signing_key_address_matches_string_path() {
        let key = parse_private_key(PRIVATE_KEY).unwrap();
        assert_eq!(address_of_signing_key(&key), parse_address(ADDRESS).unwrap());
    }

    #[test]
    fn test_malformed_private_key() {
        let prefixed = format!("0x{PRIVATE_KEY}");
        let extended = format!("{PRIVATE_KEY}00");
        for input in ["", "zz", &PRIVATE_KEY[..62], prefixed.as_str(), extended.as_str()] {
            assert!(matches!(derive_public_key(input), Err(Error::InvalidKeyFormat(_))), "{input}");
        }
        let zero = "0".repeat(64);
        assert!(matches!(derive_public_key(&zero), Err(Error::InvalidKeyFormat(_))));
        let non_hex = "g".repeat(64);
        assert!(matches!(derive_public_key(&non_hex), Err(Error::InvalidKeyFormat(_))));
    }

    #[test]
    fn test_malformed_public_key() {
        // Leading format byte is not accepted: the length check catches it.
        let with_prefix = format!("04{PUBLIC_KEY}");
        assert!(matches!(derive_address(&with_prefix), Err(Error::InvalidKeyFormat(_))));
        assert!(matches!(compress_public_key(&PUBLIC_KEY[2..]), Err(Error::InvalidKeyFormat(_))));

        // Right length, but not a curve point.
        let off_curve = format!("{}{}", &PUBLIC_KEY[..127], if PUBLIC_KEY.ends_with('c') { "d" } else { "c" });
        assert!(matches!(derive_address(&off_curve), Err(Error::InvalidKeyFormat(_))));
    }

    #[test]
    fn test_malformed_compressed_key() {
        let bad_tag = format!("04{}", &COMPRESSED[2..]);
        assert!(matches!(decompress_public_key(&bad_tag), Err(Error::InvalidKeyFormat(_))));
        assert!(matches!(decompress_public_key(&COMPRESSED[..64]), Err(Error::InvalidKeyFormat(_))));
        assert!(matches!(decompress_public_key("xyz"), Err(Error::InvalidKeyFormat(_))));
    }

    #[test]
    fn test_parse_address() {
        let lower = parse_address(&ADDRESS.to_lowercase()).unwrap();
        let prefixed = parse_address(&format!("0x{ADDRESS}")).unwrap();
        assert_eq!(lower, prefixed);
        assert!(parse_address("0x1234").is_err());
    }
}
