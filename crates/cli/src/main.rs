//! crawlmark entry point.
//!
//! Logging goes to stderr; the exit status carries the command outcome.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.log_json);

    let code = match cli.command {
        Command::Crawl(args) => commands::crawl::run(args).await,
        Command::Forward(args) => commands::forward::run(args).await,
    };

    ExitCode::from(code)
}

/// RUST_LOG wins over `-v`.
fn init_tracing(verbose: bool, json: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}
