// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Structured Patch Encryptor
//!
//! Seals every leaf value of a patch independently for one Trust Domain.
//! Keys of headers and parameters stay in the clear, order is preserved and
//! duplicate keys are sealed one by one. When no patch is supplied nothing is
//! sealed and no randomness is consumed.

use rand::{rngs::OsRng, CryptoRng, RngCore};
use tracing::debug;

use super::types::{EncryptedPair, KeyValue, PatchSlot, PatchSpec, SealedPatch};
use super::PatchError;
use crate::crypto::{encrypt_with_rng, CiphertextBlob, TdAddress, TdPublicKey};

/// Seals patches for a fixed Trust Domain key
#[derive(Debug, Clone)]
pub struct PatchEncryptor {
    td_key: TdPublicKey,
    td_address: TdAddress,
}

impl PatchEncryptor {
    pub fn new(td_key: TdPublicKey) -> Self {
        let td_address = td_key.address();
        Self { td_key, td_address }
    }

    pub fn td_key(&self) -> &TdPublicKey {
        &self.td_key
    }

    pub fn td_address(&self) -> TdAddress {
        self.td_address
    }

    /// Seal one value with the OS RNG
    pub fn seal_value(&self, value: &str) -> Result<CiphertextBlob, PatchError> {
        self.seal_field("value", value, &mut OsRng)
    }

    /// Seal a patch with the OS RNG
    pub fn seal(&self, patch: Option<&PatchSpec>) -> Result<PatchSlot, PatchError> {
        self.seal_with_rng(patch, &mut OsRng)
    }

    pub fn seal_with_rng<R>(
        &self,
        patch: Option<&PatchSpec>,
        rng: &mut R,
    ) -> Result<PatchSlot, PatchError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let Some(spec) = patch else {
            debug!("No patch supplied, emitting empty patch");
            return Ok(PatchSlot::NoPatch);
        };

        let sealed = SealedPatch {
            body: self.seal_field("body", &spec.body, rng)?,
            path_suffix: self.seal_field("pathSuffix", &spec.path_suffix, rng)?,
            headers: self.seal_pairs("headers", &spec.headers, rng)?,
            parameters: self.seal_pairs("parameters", &spec.parameters, rng)?,
            td_address: self.td_address,
        };

        debug!(
            td_address = %self.td_address,
            fields = spec.field_count(),
            "Sealed patch for trust domain"
        );

        Ok(PatchSlot::Sealed(sealed))
    }

    fn seal_field<R>(
        &self,
        field: &str,
        value: &str,
        rng: &mut R,
    ) -> Result<CiphertextBlob, PatchError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        encrypt_with_rng(value.as_bytes(), &self.td_key, rng).map_err(|source| PatchError::Seal {
            field: field.to_string(),
            source,
        })
    }

    fn seal_pairs<R>(
        &self,
        field: &str,
        pairs: &[KeyValue],
        rng: &mut R,
    ) -> Result<Vec<EncryptedPair>, PatchError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        pairs
            .iter()
            .enumerate()
            .map(|(index, pair)| {
                let ciphertext = self.seal_field(&format!("{}[{}]", field, index), &pair.value, rng)?;
                Ok(EncryptedPair {
                    key: pair.key.clone(),
                    ciphertext,
                })
            })
            .collect()
    }
}
