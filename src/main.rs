use clap::Parser;
use dyncmd::cli::{self, Args};
use dyncmd::core::{AppError, DefaultErrorReporter, ErrorReporter};
use dyncmd::logging::{self, ConsoleOutput};
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = Args::parse();

    let guard = match logging::init(&args.command) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("warning: logging disabled: {:#}", err);
            None
        }
    };

    match cli::run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let error = match err.downcast::<AppError>() {
                Ok(app_error) => app_error,
                Err(other) => AppError::from(other),
            };
            DefaultErrorReporter::new().report_error(&error);

            let console_silent = guard
                .as_ref()
                .map(|g| g.console_output() == ConsoleOutput::None)
                .unwrap_or(true);
            if console_silent {
                eprintln!("Error: {}", error);
            }
            ExitCode::FAILURE
        }
    }
}
