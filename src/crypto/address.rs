// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Trust Domain Address Derivation
//!
//! A sealed patch is bound to the Trust Domain that can open it through a
//! 20-byte identifier: the last 20 bytes of Keccak-256 over the TD's
//! uncompressed public key.
//!
//! Unlike an Ethereum account address, the `0x04` SEC1 prefix is part of the
//! hashed input. The on-chain registry stores TD identities in this form.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use tiny_keccak::{Hasher, Keccak};

use super::error::CryptoError;
use super::public_key::UNCOMPRESSED_KEY_LEN;

/// Length of a Trust Domain address in bytes
pub const TD_ADDRESS_LEN: usize = 20;

/// 20-byte Trust Domain identifier
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TdAddress([u8; TD_ADDRESS_LEN]);

impl TdAddress {
    /// All-zero address carried by the empty patch
    pub const ZERO: TdAddress = TdAddress([0u8; TD_ADDRESS_LEN]);

    pub fn from_bytes(bytes: [u8; TD_ADDRESS_LEN]) -> Self {
        TdAddress(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; TD_ADDRESS_LEN] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; TD_ADDRESS_LEN]
    }
}

impl fmt::Display for TdAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for TdAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TdAddress({})", self)
    }
}

impl FromStr for TdAddress {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex_str = s.trim();
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str).map_err(|e| CryptoError::InvalidPayload {
            field: "td_address".to_string(),
            reason: format!("hex decode error: {}", e),
        })?;
        let bytes: [u8; TD_ADDRESS_LEN] =
            bytes
                .as_slice()
                .try_into()
                .map_err(|_| CryptoError::InvalidPayload {
                    field: "td_address".to_string(),
                    reason: format!(
                        "expected {} bytes, got {}",
                        TD_ADDRESS_LEN,
                        bytes.len()
                    ),
                })?;
        Ok(TdAddress(bytes))
    }
}

impl Serialize for TdAddress {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for TdAddress {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(D::Error::custom)
    }
}

/// Keccak-256 digest
pub fn keccak256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    let mut hash = [0u8; 32];
    hasher.update(data);
    hasher.finalize(&mut hash);
    hash
}

/// Derive the Trust Domain address from an uncompressed public key
///
/// Pure function: the same 65 input bytes always yield the same address.
pub fn derive_td_address(uncompressed_pubkey: &[u8; UNCOMPRESSED_KEY_LEN]) -> TdAddress {
    let hash = keccak256(uncompressed_pubkey);
    let mut address = [0u8; TD_ADDRESS_LEN];
    address.copy_from_slice(&hash[32 - TD_ADDRESS_LEN..]);
    TdAddress(address)
}
