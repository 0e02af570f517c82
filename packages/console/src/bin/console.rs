//! Interactive console for the Kaiwa chat repository.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kaiwa-console -- --log-level debug
//! ```

use clap::Parser;
use kaiwa_console::{ConsoleArgs, run_console};
use kaiwa_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let args = ConsoleArgs::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &args.log_level);

    if let Err(e) = run_console(args).await {
        tracing::error!("Console error: {}", e);
        std::process::exit(1);
    }
}
