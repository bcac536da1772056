// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Trust Domain Public Key
//!
//! The TD public key is supplied once per run as a `0x`-prefixed hex string
//! encoding an uncompressed secp256k1 point (130 hex characters after the
//! prefix), either on the command line or via the `TD_PUBLIC_KEY`
//! environment variable.
//!
//! Parsing rejects wrong lengths, bad hex, compressed encodings, off-curve
//! points and the identity point. All checks run before any cryptographic work
//! so a bad key never consumes randomness.

use k256::{elliptic_curve::sec1::ToEncodedPoint, PublicKey};
use std::env;
use std::fmt;
use std::str::FromStr;
use tracing::info;

use super::address::{derive_td_address, TdAddress};
use super::error::CryptoError;

/// Uncompressed SEC1 encoding: `0x04 || x (32) || y (32)`
pub const UNCOMPRESSED_KEY_LEN: usize = 65;

/// Hex characters after the `0x` prefix
pub const UNCOMPRESSED_KEY_HEX_LEN: usize = UNCOMPRESSED_KEY_LEN * 2;

/// Environment variable consulted when no key is given explicitly
pub const TD_PUBLIC_KEY_ENV: &str = "TD_PUBLIC_KEY";

const SEC1_UNCOMPRESSED_TAG: u8 = 0x04;

/// Validated secp256k1 public key of a Trust Domain
#[derive(Clone, PartialEq, Eq)]
pub struct TdPublicKey {
    point: PublicKey,
    uncompressed: [u8; UNCOMPRESSED_KEY_LEN],
}

impl TdPublicKey {
    /// Parse `0x` + 130 hex characters
    pub fn from_hex(key_str: &str) -> Result<Self, CryptoError> {
        let key_str = key_str.trim();

        if key_str.is_empty() {
            return Err(CryptoError::invalid_td_key("public key is empty"));
        }

        let hex_str = key_str
            .strip_prefix("0x")
            .ok_or_else(|| CryptoError::invalid_td_key("public key must start with '0x' prefix"))?;

        if hex_str.len() != UNCOMPRESSED_KEY_HEX_LEN {
            return Err(CryptoError::invalid_td_key(format!(
                "expected {} hex characters after '0x', got {}",
                UNCOMPRESSED_KEY_HEX_LEN,
                hex_str.len()
            )));
        }

        let bytes = hex::decode(hex_str)?;
        Self::from_uncompressed(&bytes)
    }

    /// Parse raw uncompressed SEC1 bytes
    pub fn from_uncompressed(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.len() != UNCOMPRESSED_KEY_LEN {
            return Err(CryptoError::invalid_td_key(format!(
                "expected {} bytes, got {}",
                UNCOMPRESSED_KEY_LEN,
                bytes.len()
            )));
        }

        if bytes[0] != SEC1_UNCOMPRESSED_TAG {
            return Err(CryptoError::invalid_td_key(format!(
                "expected uncompressed point tag 0x04, got 0x{:02x}",
                bytes[0]
            )));
        }

        // Rejects off-curve coordinates; the identity has no 65-byte encoding
        let point = PublicKey::from_sec1_bytes(bytes)
            .map_err(|_| CryptoError::invalid_td_key("point is not on the secp256k1 curve"))?;

        Ok(Self::from_public_key(point))
    }

    /// Read the key from the `TD_PUBLIC_KEY` environment variable
    pub fn from_env() -> Result<Self, CryptoError> {
        let key_str = env::var(TD_PUBLIC_KEY_ENV).map_err(|_| {
            CryptoError::invalid_td_key(format!("{} environment variable not set", TD_PUBLIC_KEY_ENV))
        })?;
        let key = Self::from_hex(&key_str)?;
        info!("Trust Domain public key loaded (address {})", key.address());
        Ok(key)
    }

    pub fn from_public_key(point: PublicKey) -> Self {
        let encoded = point.to_encoded_point(false);
        let mut uncompressed = [0u8; UNCOMPRESSED_KEY_LEN];
        uncompressed.copy_from_slice(encoded.as_bytes());
        Self {
            point,
            uncompressed,
        }
    }

    pub fn as_point(&self) -> &PublicKey {
        &self.point
    }

    pub fn to_uncompressed(&self) -> [u8; UNCOMPRESSED_KEY_LEN] {
        self.uncompressed
    }

    /// Address this key is registered under
    pub fn address(&self) -> TdAddress {
        derive_td_address(&self.uncompressed)
    }

    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.uncompressed))
    }
}

impl FromStr for TdPublicKey {
    type Err = CryptoError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Display for TdPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl fmt::Debug for TdPublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TdPublicKey({})", self.to_hex())
    }
}
