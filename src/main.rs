//! Gomoku launcher
//!
//! `gomoku --ui` plays in the terminal; any other invocation opens the window.

use anyhow::Result;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Initialize logging; stdout belongs to the text front-end
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    gomoku::launcher::launch(std::env::args_os().skip(1))?;

    Ok(())
}
