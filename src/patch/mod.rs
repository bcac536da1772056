// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Private request patches for Trust Domains

pub mod encryptor;
pub mod types;

pub use encryptor::PatchEncryptor;
pub use types::{
    EncryptedPair, KeyValue, PatchSlot, PatchSpec, SealedPatch, WirePair, WirePatch,
};

use crate::crypto::CryptoError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatchError {
    /// Sealing a single field failed
    #[error("Failed to seal patch field '{field}': {source}")]
    Seal {
        field: String,
        #[source]
        source: CryptoError,
    },

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}
