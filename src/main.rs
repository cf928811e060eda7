// src/main.rs

use std::process::ExitCode;

use clap::Parser;
use seo_scorer::{cli::Cli, commands, lifecycle};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    lifecycle::init_logging(cli.verbose);

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
