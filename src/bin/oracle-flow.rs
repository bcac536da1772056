// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use clap::Parser;
use td_patch_sealer::cli::{execute, init_logging, Cli};

fn main() {
    dotenv::dotenv().ok();
    init_logging();

    // Parse CLI arguments
    let cli = Cli::parse();

    match execute(cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}
