// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ciphertext Blob Wire Format
//!
//! ```text
//! [ephemeral public key (65) | nonce (16) | tag (16) | ciphertext (len(plaintext))]
//! ```
//!
//! - Ephemeral public key: uncompressed SEC1 point, fresh per blob
//! - Nonce: 16 random bytes (AES-GCM with a 128-bit IV)
//! - Tag: 16-byte GCM authentication tag
//! - Ciphertext: same length as the plaintext
//!
//! A decryptor parses the 97-byte fixed prefix and treats the rest as ciphertext.

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use std::fmt;

use super::error::CryptoError;
use crate::utils::hex_bytes;

pub const EPHEMERAL_KEY_LEN: usize = 65;
pub const NONCE_LEN: usize = 16;
pub const TAG_LEN: usize = 16;

/// Fixed bytes added on top of the plaintext length
pub const BLOB_OVERHEAD: usize = EPHEMERAL_KEY_LEN + NONCE_LEN + TAG_LEN;

/// One sealed field value
#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CiphertextBlob(#[serde(with = "hex_bytes")] Vec<u8>);

/// Borrowed view of the blob segments
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlobParts<'a> {
    pub ephemeral_public_key: &'a [u8],
    pub nonce: &'a [u8],
    pub tag: &'a [u8],
    pub ciphertext: &'a [u8],
}

impl CiphertextBlob {
    pub(crate) fn assemble(
        ephemeral_public_key: &[u8],
        nonce: &[u8; NONCE_LEN],
        tag: &[u8],
        ciphertext: &[u8],
    ) -> Self {
        debug_assert_eq!(ephemeral_public_key.len(), EPHEMERAL_KEY_LEN);
        debug_assert_eq!(tag.len(), TAG_LEN);

        let mut blob = Vec::with_capacity(BLOB_OVERHEAD + ciphertext.len());
        blob.extend_from_slice(ephemeral_public_key);
        blob.extend_from_slice(nonce);
        blob.extend_from_slice(tag);
        blob.extend_from_slice(ciphertext);
        CiphertextBlob(blob)
    }

    /// Wrap received bytes, checking only the fixed prefix length
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, CryptoError> {
        if bytes.len() < BLOB_OVERHEAD {
            return Err(CryptoError::InvalidPayload {
                field: "ciphertext_blob".to_string(),
                reason: format!(
                    "blob too short: expected at least {} bytes, got {}",
                    BLOB_OVERHEAD,
                    bytes.len()
                ),
            });
        }
        Ok(CiphertextBlob(bytes))
    }

    /// Parse from hex, with or without `0x`
    pub fn from_hex(hex_str: &str) -> Result<Self, CryptoError> {
        let hex_str = hex_str.trim();
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str).map_err(|e| CryptoError::InvalidPayload {
            field: "ciphertext_blob".to_string(),
            reason: format!("hex decode error: {}", e),
        })?;
        Self::from_bytes(bytes)
    }

    pub fn parts(&self) -> BlobParts<'_> {
        let (ephemeral_public_key, rest) = self.0.split_at(EPHEMERAL_KEY_LEN);
        let (nonce, rest) = rest.split_at(NONCE_LEN);
        let (tag, ciphertext) = rest.split_at(TAG_LEN);
        BlobParts {
            ephemeral_public_key,
            nonce,
            tag,
            ciphertext,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    /// Length of the plaintext this blob seals
    pub fn plaintext_len(&self) -> usize {
        self.0.len() - BLOB_OVERHEAD
    }

    /// Unprefixed lowercase hex
    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl AsRef<[u8]> for CiphertextBlob {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<'de> Deserialize<'de> for CiphertextBlob {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let bytes = hex_bytes::deserialize(deserializer)?;
        CiphertextBlob::from_bytes(bytes).map_err(D::Error::custom)
    }
}

impl fmt::Debug for CiphertextBlob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CiphertextBlob")
            .field("len", &self.0.len())
            .field("ephemeral_public_key", &hex::encode(self.parts().ephemeral_public_key))
            .finish()
    }
}
