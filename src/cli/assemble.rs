// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Offline assembly commands
//!
//! Print the structures a submission adapter would send, as JSON on stdout.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;
use serde_json::json;
use std::fs;
use std::path::PathBuf;

use crate::action::{ActionBuilder, FeedFile, RequestFile};
use crate::crypto::TdPublicKey;
use crate::patch::{PatchEncryptor, PatchSpec};

/// Common Trust Domain key argument
#[derive(Args, Debug, Clone)]
pub struct TdKeyArgs {
    /// The trust domain's public key in hex format (must start with 0x)
    #[arg(long = "td-public-key", env = "TD_PUBLIC_KEY")]
    pub td_public_key: String,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl TdKeyArgs {
    fn encryptor(&self) -> Result<PatchEncryptor> {
        let td_key = TdPublicKey::from_hex(&self.td_public_key)
            .context("Failed to parse trust domain public key")?;
        Ok(PatchEncryptor::new(td_key))
    }

    fn render<T: Serialize>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        Ok(json)
    }
}

#[derive(Args, Debug, Clone)]
pub struct SealPatchArgs {
    /// JSON file with body, pathSuffix, headers and parameters
    #[arg(long)]
    pub patch_file: PathBuf,

    #[command(flatten)]
    pub key: TdKeyArgs,
}

#[derive(Args, Debug, Clone)]
pub struct BuildActionArgs {
    /// Request file with request, optional patch, jqFilter and responseSchema
    #[arg(long)]
    pub request_file: PathBuf,

    #[command(flatten)]
    pub key: TdKeyArgs,
}

#[derive(Args, Debug, Clone)]
pub struct BuildFeedArgs {
    /// Feed file with request, optional patch, schema and filter
    #[arg(long)]
    pub feed_file: PathBuf,

    #[command(flatten)]
    pub key: TdKeyArgs,
}

pub fn seal_patch(args: &SealPatchArgs) -> Result<String> {
    let encryptor = args.key.encryptor()?;
    let bytes = fs::read(&args.patch_file)
        .with_context(|| format!("Failed to read {}", args.patch_file.display()))?;
    let spec = PatchSpec::from_json_bytes(&bytes)?;

    let slot = encryptor.seal(Some(&spec))?;
    args.key.render(&slot.as_sealed())
}

pub fn build_action(args: &BuildActionArgs) -> Result<String> {
    let builder = ActionBuilder::new(args.key.encryptor()?);
    let file = RequestFile::from_path(&args.request_file)?;

    let action = builder.build_action(&file)?;
    args.key.render(&action)
}

pub fn build_feed(args: &BuildFeedArgs) -> Result<String> {
    let builder = ActionBuilder::new(args.key.encryptor()?);
    let file = FeedFile::from_path(&args.feed_file)?;

    let feed = builder.build_feed(&file)?;
    let patch = feed.patch.as_sealed().map(|_| feed.patch.to_wire());
    args.key.render(&json!({
        "request": feed.request,
        "patch": patch,
        "schema": feed.schema,
        "filter": feed.filter,
    }))
}
