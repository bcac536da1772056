// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod assemble;
pub mod encrypt;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use assemble::{BuildActionArgs, BuildFeedArgs, SealPatchArgs, TdKeyArgs};
pub use encrypt::EncryptArgs;

/// HTTP Oracle pool Trust domain encryption tool
#[derive(Parser, Debug)]
#[command(name = "td-encrypt")]
#[command(version)]
#[command(
    about = "HTTP Oracle pool Trust domain encryption tool. Encrypts data using ECDH key exchange and AES-GCM encryption for secure transmission to trust domains.",
    long_about = None
)]
pub struct TdEncryptCli {
    #[command(flatten)]
    pub args: EncryptArgs,
}

/// Oracle flow provisioning CLI
#[derive(Parser, Debug)]
#[command(name = "oracle-flow")]
#[command(version)]
#[command(about = "Seal private patches and assemble oracle flow structures", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Encrypt a single value for a trust domain
    Encrypt(EncryptArgs),

    /// Seal a patch file for a trust domain
    SealPatch(SealPatchArgs),

    /// Assemble an oracle action from a request file
    BuildAction(BuildActionArgs),

    /// Assemble the parts of a feed from a feed file
    BuildFeed(BuildFeedArgs),
}

/// Execute CLI command, returning what to print on stdout
pub fn execute(cli: Cli) -> Result<String> {
    match cli.command {
        Commands::Encrypt(args) => encrypt::run(&args),
        Commands::SealPatch(args) => assemble::seal_patch(&args),
        Commands::BuildAction(args) => assemble::build_action(&args),
        Commands::BuildFeed(args) => assemble::build_feed(&args),
    }
}

/// Route logs to stderr so stdout stays machine-readable
pub fn init_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
