// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Patch data model
//!
//! A patch overrides or extends an HTTP request with values only the Trust
//! Domain may see. `PatchSpec` is the operator-supplied plaintext form,
//! `SealedPatch` the encrypted form, and `WirePatch` the flat structure the
//! registry contracts accept (including the all-empty "no patch" value).

use serde::{Deserialize, Serialize};

use super::PatchError;
use crate::crypto::{CiphertextBlob, CryptoError, TdAddress};
use crate::utils::hex_bytes;

/// Plaintext header or query parameter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Plaintext patch as written in a request file
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatchSpec {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub path_suffix: String,
    #[serde(default)]
    pub headers: Vec<KeyValue>,
    #[serde(default)]
    pub parameters: Vec<KeyValue>,
}

impl PatchSpec {
    /// Parse a patch from raw JSON bytes
    ///
    /// Every value must be a UTF-8 string; anything else is an encoding error.
    pub fn from_json_bytes(bytes: &[u8]) -> Result<Self, PatchError> {
        let text = std::str::from_utf8(bytes).map_err(|e| CryptoError::Encoding {
            field: "patch".to_string(),
            reason: format!("patch is not valid UTF-8: {}", e),
        })?;
        Self::from_json(text)
    }

    pub fn from_json(text: &str) -> Result<Self, PatchError> {
        serde_json::from_str(text).map_err(|e| {
            PatchError::Crypto(CryptoError::Encoding {
                field: "patch".to_string(),
                reason: e.to_string(),
            })
        })
    }

    /// Number of values that will be sealed
    pub fn field_count(&self) -> usize {
        2 + self.headers.len() + self.parameters.len()
    }
}

/// Header or parameter with a sealed value; the key stays in the clear
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedPair {
    pub key: String,
    pub ciphertext: CiphertextBlob,
}

/// Patch sealed for one Trust Domain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SealedPatch {
    pub body: CiphertextBlob,
    pub path_suffix: CiphertextBlob,
    pub headers: Vec<EncryptedPair>,
    pub parameters: Vec<EncryptedPair>,
    pub td_address: TdAddress,
}

/// Either a sealed patch or the explicit absence of one
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchSlot {
    Sealed(SealedPatch),
    NoPatch,
}

impl PatchSlot {
    pub fn is_sealed(&self) -> bool {
        matches!(self, PatchSlot::Sealed(_))
    }

    pub fn as_sealed(&self) -> Option<&SealedPatch> {
        match self {
            PatchSlot::Sealed(patch) => Some(patch),
            PatchSlot::NoPatch => None,
        }
    }

    /// Trust Domain the patch is bound to, zero for no patch
    pub fn td_address(&self) -> TdAddress {
        match self {
            PatchSlot::Sealed(patch) => patch.td_address,
            PatchSlot::NoPatch => TdAddress::ZERO,
        }
    }

    /// Flatten into the contract structure
    pub fn to_wire(&self) -> WirePatch {
        match self {
            PatchSlot::Sealed(patch) => WirePatch::from(patch),
            PatchSlot::NoPatch => WirePatch::empty(),
        }
    }
}

impl From<SealedPatch> for PatchSlot {
    fn from(patch: SealedPatch) -> Self {
        PatchSlot::Sealed(patch)
    }
}

/// Pair as submitted on-chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WirePair {
    pub key: String,
    #[serde(with = "hex_bytes")]
    pub ciphertext: Vec<u8>,
}

/// Patch as submitted on-chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WirePatch {
    #[serde(with = "hex_bytes")]
    pub path_suffix: Vec<u8>,
    pub headers: Vec<WirePair>,
    pub parameters: Vec<WirePair>,
    #[serde(with = "hex_bytes")]
    pub body: Vec<u8>,
    pub td_address: TdAddress,
}

impl WirePatch {
    /// The "no patch" value: empty fields and a zero TD address
    pub fn empty() -> Self {
        Self {
            path_suffix: Vec::new(),
            headers: Vec::new(),
            parameters: Vec::new(),
            body: Vec::new(),
            td_address: TdAddress::ZERO,
        }
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::empty()
    }
}

impl From<&SealedPatch> for WirePatch {
    fn from(patch: &SealedPatch) -> Self {
        Self {
            path_suffix: patch.path_suffix.as_bytes().to_vec(),
            headers: wire_pairs(&patch.headers),
            parameters: wire_pairs(&patch.parameters),
            body: patch.body.as_bytes().to_vec(),
            td_address: patch.td_address,
        }
    }
}

fn wire_pairs(pairs: &[EncryptedPair]) -> Vec<WirePair> {
    pairs
        .iter()
        .map(|pair| WirePair {
            key: pair.key.clone(),
            ciphertext: pair.ciphertext.as_bytes().to_vec(),
        })
        .collect()
}
