//! OSDI list exchange command line.
//!
//! Lists the catalog of a remote OSDI server, or pulls the members of one
//! list with optional custom fields, and prints the result as JSON.
//!
//! Usage:
//!   osdi-exchange --api-url https://osdi.example.org --api-token TOKEN lists
//!   osdi-exchange --features org-features.json people --list-id 722 --field source=import
//!
//! Ctrl-C stops the fetch before the next page.

use anyhow::Result;
use clap::Parser;
use osdi_cli::{Cli, run};
use osdi_sync::CancelToken;
use tracing::{Level, warn};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    let cancel = CancelToken::new();
    let on_interrupt = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling fetch");
            on_interrupt.cancel();
        }
    });

    let output = run(&cli, &cancel).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
