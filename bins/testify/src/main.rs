use clap::Parser;
use std::io;
use std::process::ExitCode;
use testify::cli::Cli;
use testify::executor::run_tests;
use testify::reporter::Reporter;
use tokio::signal;
use tracing::{error, info, warn};

/// Exit status after an operator interrupt (128 + SIGINT)
const EXIT_INTERRUPTED: u8 = 130;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if e.use_stderr() => {
            eprintln!("{}", Cli::usage_error(&e));
            return Ok(ExitCode::from(e.exit_code() as u8));
        }
        Err(e) => e.exit(),
    };

    let config = match cli.into_config().validate() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", Cli::usage_error(format!("testify: {}", e)));
            return Ok(ExitCode::FAILURE);
        }
    };

    info!(
        program = %config.program.display(),
        test_dir = %config.test_dir.display(),
        verbose = config.verbose,
        "testify starting"
    );

    let mut reporter = Reporter::new(io::stdout().lock());

    // Dropping the batch future kills the running child (kill_on_drop)
    let result = tokio::select! {
        result = run_tests(&config, &mut reporter) => result,
        _ = signal::ctrl_c() => {
            warn!("Interrupted; abandoning batch");
            return Ok(ExitCode::from(EXIT_INTERRUPTED));
        }
    };

    let result = result.map_err(|e| {
        error!(error = %e, "Batch aborted");
        e
    })?;

    reporter.report(&config, &result)?;
    Ok(ExitCode::SUCCESS)
}
