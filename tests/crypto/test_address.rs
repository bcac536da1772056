// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Trust Domain address derivation

use k256::SecretKey;
use rand::rngs::OsRng;
use td_patch_sealer::crypto::{derive_td_address, keccak256, TdAddress, TdPublicKey};

/// secp256k1 generator point, i.e. the public key of secret scalar 1
const GENERATOR_HEX: &str = "0x0479be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798483ada7726a3c4655da4fbfc0e1108a8fd17b448a68554199c47d08ffb10d4b8";

#[test]
fn test_generator_address_vector() {
    let key = TdPublicKey::from_hex(GENERATOR_HEX).unwrap();

    // Keccak-256 over all 65 bytes, 0x04 prefix included
    assert_eq!(
        key.address().to_string(),
        "0x7d6e99bb8abf8cc013bb0e912d0b176596fe7b88"
    );
}

#[test]
fn test_address_differs_from_ethereum_convention() {
    let key = TdPublicKey::from_hex(GENERATOR_HEX).unwrap();
    let uncompressed = key.to_uncompressed();

    // Ethereum hashes only x || y; for the generator that is 0x7e5f...5bdf
    let eth_hash = keccak256(&uncompressed[1..]);
    assert_eq!(
        hex::encode(&eth_hash[12..]),
        "7e5f4552091a69125d5dfcb7b8c2659029395bdf"
    );
    assert_ne!(key.address().as_bytes()[..], eth_hash[12..]);
}

#[test]
fn test_address_is_last_twenty_bytes_of_hash() {
    let secret = SecretKey::random(&mut OsRng);
    let key = TdPublicKey::from_public_key(secret.public_key());
    let uncompressed = key.to_uncompressed();

    let hash = keccak256(&uncompressed);
    assert_eq!(derive_td_address(&uncompressed).as_bytes()[..], hash[12..]);
    assert_eq!(key.address(), derive_td_address(&uncompressed));
}

#[test]
fn test_distinct_keys_have_distinct_addresses() {
    let a = TdPublicKey::from_public_key(SecretKey::random(&mut OsRng).public_key());
    let b = TdPublicKey::from_public_key(SecretKey::random(&mut OsRng).public_key());
    assert_ne!(a.address(), b.address());
}

#[test]
fn test_address_string_round_trip() {
    let key = TdPublicKey::from_hex(GENERATOR_HEX).unwrap();
    let address = key.address();

    let parsed: TdAddress = address.to_string().parse().unwrap();
    assert_eq!(parsed, address);

    let json = serde_json::to_string(&address).unwrap();
    assert_eq!(json, "\"0x7d6e99bb8abf8cc013bb0e912d0b176596fe7b88\"");
    let back: TdAddress = serde_json::from_str(&json).unwrap();
    assert_eq!(back, address);
}

#[test]
fn test_zero_address() {
    assert!(TdAddress::ZERO.is_zero());
    assert_eq!(
        TdAddress::ZERO.to_string(),
        "0x0000000000000000000000000000000000000000"
    );
    assert!("0x1234".parse::<TdAddress>().is_err());
}
