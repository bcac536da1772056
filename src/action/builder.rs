// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Oracle action and feed assembly
//!
//! Turns an operator request file into the structures the registry contracts
//! accept. The sealed patch is kept as a `PatchSlot` until the very end, so
//! the zero-filled "no patch" form only appears in the final wire output.

use rand::{rngs::OsRng, CryptoRng, RngCore};
use serde::Serialize;
use tracing::info;

use super::request::{FeedFile, RequestFile, WireRequest};
use super::ActionError;
use crate::patch::{PatchEncryptor, PatchSlot, WirePatch};

/// Action ready for `addAction`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OracleAction {
    pub request: WireRequest,
    pub patch: WirePatch,
    pub jq_filter: String,
    pub response_schema: String,
}

/// Parts of a feed, each registered separately before `addFeed`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedRequest {
    pub request: WireRequest,
    pub patch: PatchSlot,
    pub schema: String,
    pub filter: String,
}

/// Builds actions and feeds with a fixed Trust Domain key
#[derive(Debug, Clone)]
pub struct ActionBuilder {
    encryptor: PatchEncryptor,
}

impl ActionBuilder {
    pub fn new(encryptor: PatchEncryptor) -> Self {
        Self { encryptor }
    }

    pub fn encryptor(&self) -> &PatchEncryptor {
        &self.encryptor
    }

    pub fn build_action(&self, file: &RequestFile) -> Result<OracleAction, ActionError> {
        self.build_action_with_rng(file, &mut OsRng)
    }

    pub fn build_action_with_rng<R>(
        &self,
        file: &RequestFile,
        rng: &mut R,
    ) -> Result<OracleAction, ActionError>
    where
        R: RngCore + CryptoRng + ?Sized,
    {
        let request = file.request.to_wire()?;
        let patch = self.encryptor.seal_with_rng(file.patch.as_ref(), rng)?;

        info!(
            method = %request.method,
            host = %request.host,
            patched = patch.is_sealed(),
            "Assembled oracle action"
        );

        Ok(OracleAction {
            request,
            patch: patch.to_wire(),
            jq_filter: file.jq_filter.clone(),
            response_schema: file.response_schema.clone(),
        })
    }

    pub fn build_feed(&self, file: &FeedFile) -> Result<FeedRequest, ActionError> {
        let request = file.request.to_wire()?;
        let patch = self.encryptor.seal(file.patch.as_ref())?;

        info!(
            method = %request.method,
            host = %request.host,
            patched = patch.is_sealed(),
            "Assembled feed request"
        );

        Ok(FeedRequest {
            request,
            patch,
            schema: file.schema.clone(),
            filter: file.filter.clone(),
        })
    }
}
