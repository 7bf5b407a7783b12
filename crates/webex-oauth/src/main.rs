//! Main entry point for the Webex OAuth integration

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use std::path::PathBuf;
use tracing::{error, info};
use webex_oauth::{config::Config, server::Server, Result};
use webex_oauth_common::logging::{init_logging, LogFormat};

#[derive(Parser)]
#[command(
    name = "webex-oauth",
    about = "Webex OAuth integration server",
    version,
    author
)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Generate example configuration file
    #[arg(long)]
    gen_config: bool,

    /// Log output format
    #[arg(long, value_enum, default_value = "compact")]
    log_format: LogFormat,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_filter = format!("{}=info", env!("CARGO_BIN_NAME").replace('-', "_"));
    init_logging(&args.verbosity, &log_filter, args.log_format)?;

    if args.gen_config {
        let example_config = Config::generate_example()?;
        println!("{example_config}");
        return Ok(());
    }

    info!("Starting Webex OAuth integration v{}", webex_oauth::VERSION);

    let config = Config::load(args.config)?;
    config.validate()?;
    info!(
        "Configuration loaded, binding to {}",
        config.server.bind_address()
    );

    let server = Server::new(config)?;

    match server.run().await {
        Ok(()) => {
            info!("Webex OAuth integration shut down gracefully");
            Ok(())
        }
        Err(e) => {
            error!("Webex OAuth integration error: {}", e);
            Err(e)
        }
    }
}
