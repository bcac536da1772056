// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Request files
//!
//! Operators describe an oracle request in a JSON file. Two layouts exist:
//!
//! ```json
//! // action (flow) file
//! { "request": {...}, "patch": {...}, "jqFilter": "...", "responseSchema": "..." }
//!
//! // feed file
//! { "request": {...}, "patch": {...}, "filter": "...", "schema": "..." }
//! ```
//!
//! `patch` is optional in both. The public part of the request is published
//! as-is; only the patch is sealed.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs;
use std::path::Path;

use super::{ActionError, HttpMethod};
use crate::patch::{KeyValue, PatchSpec};
use crate::utils::hex_bytes;

/// Public HTTP request as written by the operator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpRequestSpec {
    pub method: HttpMethod,
    #[serde(default)]
    pub host: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub headers: Vec<KeyValue>,
    #[serde(default)]
    pub parameters: Vec<KeyValue>,
    /// String bodies are sent verbatim, JSON values are serialized,
    /// null or missing means no body
    #[serde(default)]
    pub body: Option<Value>,
}

impl HttpRequestSpec {
    pub fn body_bytes(&self) -> Result<Vec<u8>, ActionError> {
        match &self.body {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::String(text)) => Ok(text.as_bytes().to_vec()),
            Some(other) => serde_json::to_vec(other).map_err(ActionError::Json),
        }
    }

    pub fn to_wire(&self) -> Result<WireRequest, ActionError> {
        Ok(WireRequest {
            method: self.method,
            host: self.host.clone(),
            path: self.path.clone(),
            headers: self.headers.clone(),
            parameters: self.parameters.clone(),
            body: self.body_bytes()?,
        })
    }
}

/// Public request as submitted on-chain
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WireRequest {
    pub method: HttpMethod,
    pub host: String,
    pub path: String,
    pub headers: Vec<KeyValue>,
    pub parameters: Vec<KeyValue>,
    #[serde(with = "hex_bytes")]
    pub body: Vec<u8>,
}

/// Action (flow) request file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestFile {
    pub request: HttpRequestSpec,
    #[serde(default)]
    pub patch: Option<PatchSpec>,
    #[serde(default)]
    pub jq_filter: String,
    #[serde(default)]
    pub response_schema: String,
}

impl RequestFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ActionError> {
        read_json(path.as_ref())
    }
}

/// Feed request file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedFile {
    pub request: HttpRequestSpec,
    #[serde(default)]
    pub patch: Option<PatchSpec>,
    #[serde(default)]
    pub schema: String,
    #[serde(default)]
    pub filter: String,
}

impl FeedFile {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ActionError> {
        read_json(path.as_ref())
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, ActionError> {
    let contents = fs::read_to_string(path).map_err(|source| ActionError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(ActionError::Json)
}
