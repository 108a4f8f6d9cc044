//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Crawl pages into a markdown corpus and forward it to a webhook.
#[derive(Parser, Debug)]
#[command(name = "crawlmark", version, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Render pages, convert them to markdown and store one JSON record per URL
    Crawl(CrawlArgs),

    /// POST every JSON record in a directory to the webhook as one batch
    Forward(ForwardArgs),
}

#[derive(Args, Debug)]
pub struct CrawlArgs {
    /// URLs to crawl, in order
    #[arg(value_name = "URL")]
    pub urls: Vec<String>,

    /// File with one URL per line; blank lines and `#` comments are skipped
    #[arg(short, long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Crawl again even when a record is already stored
    #[arg(short, long)]
    pub force: bool,

    /// Directory for the JSON records (default: ai_training_data)
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ForwardArgs {
    /// Directory holding the JSON records (default: ai_training_data)
    #[arg(value_name = "DATA_DIR")]
    pub data_dir: Option<PathBuf>,
}
