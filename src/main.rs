//! netdiag (nd) - remote network diagnostics for Kubernetes nodes

use anyhow::Result;
use clap::Parser;
use netdiag::cli::Cli;
use netdiag::commands;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(cli.verbose);

    if let Err(err) = commands::run(&cli).await {
        // Errors are part of the output contract: structured, never bare.
        let body = serde_json::to_string_pretty(&err.to_wire())?;
        eprintln!("{body}");
        std::process::exit(1);
    }

    Ok(())
}

/// Setup tracing based on verbosity level
fn setup_tracing(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
