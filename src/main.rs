//! Commission calculator command line

use std::{io, process::ExitCode};

use tracing::error;

use commission::{
    cli::run, config::CliConfig, observability::init_logging, storage::FileStore,
};

/// Commission calculator entry point
pub fn main() -> ExitCode {
    // Load configuration from .env, the environment and CLI arguments
    let config = CliConfig::load().unwrap_or_else(|parse_error| parse_error.exit());

    if let Err(init_error) = init_logging(&config.logging) {
        #[expect(
            clippy::print_stderr,
            reason = "logging failed to initialise, must use eprintln"
        )]
        {
            eprintln!("{init_error}");
        }

        return ExitCode::FAILURE;
    }

    let mut store = match FileStore::open(&config.store) {
        Ok(store) => store,
        Err(open_error) => {
            error!("failed to open store: {open_error}");

            return ExitCode::FAILURE;
        }
    };

    match run(
        config.command,
        config.access.credentials(),
        &mut store,
        io::stdout().lock(),
    ) {
        Ok(()) => ExitCode::SUCCESS,
        Err(run_error) => {
            #[expect(
                clippy::print_stderr,
                reason = "command errors are user-facing, not log lines"
            )]
            {
                eprintln!("error: {run_error}");
            }

            ExitCode::FAILURE
        }
    }
}
