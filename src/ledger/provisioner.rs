// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Feed and flow provisioning
//!
//! Drives the registry transactions in the order the contracts expect:
//!
//! - feed: request → patch → response schema → jq filter → feed
//! - flow: action → flow
//!
//! A missing patch is never submitted; the feed references `RecordId::ZERO`.
//! Each submission is bounded by a timeout; retries are left to the
//! submitter implementation.

use std::time::Duration;
use tracing::{info, warn};

use super::{FlowParams, FlowTarget, LedgerSubmitter, RecordId, Submission, SubmissionError};
use crate::action::{FeedRequest, OracleAction};
use crate::patch::PatchSlot;

#[derive(Debug, Clone)]
pub struct ProvisionerConfig {
    /// Upper bound for one transaction including receipt polling
    pub submission_timeout: Duration,
}

impl Default for ProvisionerConfig {
    fn default() -> Self {
        Self {
            submission_timeout: Duration::from_secs(120),
        }
    }
}

/// Identifiers produced while registering a feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeedIds {
    pub request_id: RecordId,
    pub patch_id: RecordId,
    pub schema_id: RecordId,
    pub filter_id: RecordId,
    pub feed_id: RecordId,
}

/// Identifiers produced while creating a flow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FlowIds {
    pub action_id: RecordId,
    pub flow_id: RecordId,
}

pub struct Provisioner<S: LedgerSubmitter> {
    submitter: S,
    config: ProvisionerConfig,
}

impl<S: LedgerSubmitter> Provisioner<S> {
    pub fn new(submitter: S) -> Self {
        Self::with_config(submitter, ProvisionerConfig::default())
    }

    pub fn with_config(submitter: S, config: ProvisionerConfig) -> Self {
        Self { submitter, config }
    }

    pub fn submitter(&self) -> &S {
        &self.submitter
    }

    /// Register every part of a feed, then the feed itself
    pub async fn create_feed(&self, feed: FeedRequest) -> Result<FeedIds, SubmissionError> {
        let request_id = self.submit(Submission::Request(feed.request)).await?;
        let patch_id = self.register_patch(&feed.patch).await?;
        let schema_id = self.submit(Submission::ResponseSchema(feed.schema)).await?;
        let filter_id = self.submit(Submission::JqFilter(feed.filter)).await?;

        let feed_id = self
            .submit(Submission::Feed {
                request_id,
                patch_id,
                schema_id,
                filter_id,
            })
            .await?;

        Ok(FeedIds {
            request_id,
            patch_id,
            schema_id,
            filter_id,
            feed_id,
        })
    }

    /// Register a sealed patch; the empty patch maps to the zero id
    pub async fn register_patch(&self, patch: &PatchSlot) -> Result<RecordId, SubmissionError> {
        match patch {
            PatchSlot::NoPatch => {
                info!("No patch supplied, using zero patch id");
                Ok(RecordId::ZERO)
            }
            PatchSlot::Sealed(sealed) => {
                self.submit(Submission::PrivatePatch {
                    td_address: sealed.td_address,
                    patch: patch.to_wire(),
                })
                .await
            }
        }
    }

    pub async fn create_action(&self, action: OracleAction) -> Result<RecordId, SubmissionError> {
        self.submit(Submission::Action(action)).await
    }

    pub async fn create_flow(&self, params: FlowParams) -> Result<RecordId, SubmissionError> {
        self.submit(Submission::Flow(params)).await
    }

    /// Register an action and create a flow pointing at it
    pub async fn provision_flow(
        &self,
        action: OracleAction,
        target: FlowTarget,
    ) -> Result<FlowIds, SubmissionError> {
        let action_id = self.create_action(action).await?;
        let flow_id = self.create_flow(FlowParams::new(action_id, target)).await?;
        Ok(FlowIds { action_id, flow_id })
    }

    async fn submit(&self, submission: Submission) -> Result<RecordId, SubmissionError> {
        let kind = submission.kind();
        let timeout = self.config.submission_timeout;

        match tokio::time::timeout(timeout, self.submitter.submit(submission)).await {
            Ok(Ok(id)) => {
                info!(kind, id = %id, "Submission confirmed");
                Ok(id)
            }
            Ok(Err(e)) => {
                warn!(kind, error = %e, "Submission failed");
                Err(e)
            }
            Err(_) => {
                warn!(kind, timeout_secs = timeout.as_secs(), "Submission timed out");
                Err(SubmissionError::Timeout {
                    kind: kind.to_string(),
                    timeout_secs: timeout.as_secs(),
                })
            }
        }
    }
}
