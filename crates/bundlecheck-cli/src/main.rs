//! bundlecheck entry point.
//!
//! ```bash
//! bundlecheck --root /opt/kitty --frozen
//! ```

use std::process::ExitCode;

use anyhow::Result;
use bundlecheck_cli::Cli;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // stdout carries the report, so logs go to stderr
    let default = if cli.verbose { "bundlecheck=debug" } else { "bundlecheck=warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let code = bundlecheck_cli::run(&cli, &mut std::io::stdout().lock())?;
    Ok(if code == 0 {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
