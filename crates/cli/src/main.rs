use buildgen_cli::{Cli, utils::normalize_go_flags};
use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing from RUST_LOG, showing classification lines by default
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse_from(normalize_go_flags(std::env::args_os()));

    if let Err(e) = cli.execute() {
        error!("{e:#}");
        std::process::exit(1);
    }
}
