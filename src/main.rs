//! Pagesmith
//!
//! Visual website builder engine and command-line studio.
//!
//! This is the main entry point for the `pagesmith` binary.

use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn main() {
    // Initialize logging
    let filter = std::env::var("PAGESMITH_LOG")
        .ok()
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_from_default_env().ok())
        .unwrap_or_else(|| EnvFilter::new("info"));

    FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = pagesmith_cli::run() {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}
