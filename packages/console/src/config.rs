//! Command-line configuration.

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "kaiwa-console")]
#[command(author, version, about = "Interactive console for the Kaiwa chat repository", long_about = None)]
pub struct ConsoleArgs {
    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,

    /// File to load and save the command history
    #[arg(long)]
    pub history: Option<PathBuf>,
}
