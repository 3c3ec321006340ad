use clap::Parser;
use todotxt::cli::commands::Cli;
use todotxt::cli::handlers;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    let cli = Cli::parse();

    if let Err(e) = handlers::dispatch(cli) {
        eprintln!("error: {}", e);
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr, filtered by `TODOTXT_LOG` (default: warn)
fn init_logging() {
    let filter = EnvFilter::try_from_env("TODOTXT_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
