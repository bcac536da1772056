// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Oracle action assembly
//!
//! Builds the request, patch, filter and schema structures registered before
//! an oracle flow can be created.

pub mod builder;
pub mod method;
pub mod request;

pub use builder::{ActionBuilder, FeedRequest, OracleAction};
pub use method::HttpMethod;
pub use request::{FeedFile, HttpRequestSpec, RequestFile, WireRequest};

use crate::patch::PatchError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ActionError {
    #[error("Unknown HTTP method: {0}")]
    UnknownMethod(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid request JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Patch(#[from] PatchError),
}
