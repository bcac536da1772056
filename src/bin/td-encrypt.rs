// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use td_patch_sealer::cli::{encrypt, init_logging, TdEncryptCli};

fn main() {
    dotenv::dotenv().ok();
    init_logging();

    let cli = TdEncryptCli::parse();

    match encrypt::run(&cli.args) {
        Ok(blob_hex) => println!("{}", blob_hex),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
