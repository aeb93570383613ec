mod cli;
mod commands;
mod output;

use clap::Parser;
use cli::Cli;
use moltbook_core::{CoreError, ErrorExt, ErrorReporter};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

const DEFAULT_LOG_FILTER: &str = "moltbook=warn,moltbook_client=warn,moltbook_core=warn";
const VERBOSE_LOG_FILTER: &str = "moltbook=debug,moltbook_client=debug,moltbook_core=debug";

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new(VERBOSE_LOG_FILTER)
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!("Starting moltbook {}", env!("CARGO_PKG_VERSION"));
    let reporter = ErrorReporter::new().with_error_reporting(cli.verbose);

    match commands::run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {:#}", err);
            if let Some(core) = err.downcast_ref::<CoreError>() {
                reporter.report_error(core);
                if !matches!(core, CoreError::InvalidInput { .. }) {
                    eprintln!("  {}", core.user_friendly_message());
                }
            }
            ExitCode::FAILURE
        }
    }
}
