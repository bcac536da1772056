// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Ledger submission seam
//!
//! The registry contracts are reached through [`LedgerSubmitter`]. An
//! implementation sends one transaction per [`Submission`], waits for the
//! receipt and returns the 32-byte identifier emitted in its first log.
//! Transport, timeout and revert failures surface as [`SubmissionError`].

pub mod flow;
pub mod provisioner;

pub use flow::{FlowParams, FlowTarget};
pub use provisioner::{FeedIds, FlowIds, Provisioner, ProvisionerConfig};

use async_trait::async_trait;
use ethers::types::U256;
use std::fmt;
use thiserror::Error;

use crate::action::{OracleAction, WireRequest};
use crate::crypto::TdAddress;
use crate::patch::WirePatch;

/// Opaque 32-byte identifier returned by a registry contract
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct RecordId([u8; 32]);

impl RecordId {
    /// Identifier standing in for "no patch" on the feed path
    pub const ZERO: RecordId = RecordId([0u8; 32]);

    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        RecordId(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 32]
    }

    /// Big-endian integer view, as contracts take ids in `uint256` slots
    pub fn to_u256(&self) -> U256 {
        U256::from_big_endian(&self.0)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RecordId({})", self)
    }
}

/// One registry transaction
#[derive(Debug, Clone, PartialEq)]
pub enum Submission {
    Request(WireRequest),
    PrivatePatch {
        td_address: TdAddress,
        patch: WirePatch,
    },
    JqFilter(String),
    ResponseSchema(String),
    Feed {
        request_id: RecordId,
        patch_id: RecordId,
        schema_id: RecordId,
        filter_id: RecordId,
    },
    Action(OracleAction),
    Flow(FlowParams),
}

impl Submission {
    /// Contract function this submission maps to
    pub fn kind(&self) -> &'static str {
        match self {
            Submission::Request(_) => "addRequest",
            Submission::PrivatePatch { .. } => "addPrivatePatch",
            Submission::JqFilter(_) => "addJqFilter",
            Submission::ResponseSchema(_) => "addResponseSchema",
            Submission::Feed { .. } => "addFeed",
            Submission::Action(_) => "addAction",
            Submission::Flow(_) => "createFlow",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SubmissionError {
    #[error("Submission of {kind} failed: {reason}")]
    Failed { kind: String, reason: String },

    #[error("Submission of {kind} timed out after {timeout_secs}s")]
    Timeout { kind: String, timeout_secs: u64 },
}

/// Sends registry transactions and waits for their receipts
#[async_trait]
pub trait LedgerSubmitter: Send + Sync {
    async fn submit(&self, submission: Submission) -> Result<RecordId, SubmissionError>;
}
