// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use ethers::types::{Address, Bytes, U256};
use serde::{Deserialize, Serialize};

use super::RecordId;

/// Where flow results are delivered and how much gas the callback gets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowTarget {
    pub gas_limit: u64,
    pub pool: Address,
    pub consumer: Address,
    pub callback: Bytes,
}

/// Arguments of `createFlow`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FlowParams {
    pub gas_limit: u64,
    pub action_id: U256,
    pub pool: Address,
    pub consumer: Address,
    pub callback: Bytes,
}

impl FlowParams {
    pub fn new(action_id: RecordId, target: FlowTarget) -> Self {
        Self {
            gas_limit: target.gas_limit,
            action_id: action_id.to_u256(),
            pool: target.pool,
            consumer: target.consumer,
            callback: target.callback,
        }
    }
}
