//! codingorg server entry point.

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{fmt, EnvFilter};

use codingorg::cli::Cli;

#[tokio::main]
async fn main() {
    let mut cli = Cli::parse();

    let env_loaded = match codingorg::load_env_file(&cli.env_file) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if env_loaded {
        // Re-parse so env-backed flags see values from the file.
        cli = Cli::parse();
    }

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(cli.log_level().to_string()));

    fmt().with_env_filter(filter).with_target(false).init();
    debug!(env_file = %cli.env_file.display(), loaded = env_loaded, "environment file");

    if let Err(e) = codingorg::run(cli).await {
        error!(error = %e, "server stopped with an error");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
