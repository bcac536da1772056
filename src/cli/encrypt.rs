// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{Context, Result};
use clap::Args;

use crate::crypto::{encrypt, TdPublicKey};

/// Seal a single value for a Trust Domain
#[derive(Args, Debug, Clone)]
pub struct EncryptArgs {
    /// The plaintext data to encrypt (as a string)
    #[arg(long)]
    pub data: String,

    /// The trust domain's public key in hex format (must start with 0x)
    #[arg(long = "td-public-key", env = "TD_PUBLIC_KEY")]
    pub td_public_key: String,
}

/// Returns the blob as unprefixed hex
pub fn run(args: &EncryptArgs) -> Result<String> {
    let td_key = TdPublicKey::from_hex(&args.td_public_key)
        .context("Failed to parse trust domain public key")?;

    let blob = encrypt(args.data.as_bytes(), &td_key).context("Failed to encrypt data")?;

    Ok(blob.to_hex())
}
