use clap::Parser;
use std::process::ExitCode;

use wlctrl::cli::{Cli, handle_command};
use wlctrl::error::{ControlError, EXIT_ARG_ERROR, EXIT_FAILURE, EXIT_OK};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { EXIT_ARG_ERROR } else { EXIT_OK };
            // Help and version output go to stdout.
            let _ = e.print();
            return ExitCode::from(code);
        }
    };
    wlctrl::logging::init_logging(cli.verbose);

    match handle_command(cli) {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(e) => {
            eprintln!("wlctrl: {:#}", e);
            let code = e
                .downcast_ref::<ControlError>()
                .map(ControlError::exit_code)
                .unwrap_or(EXIT_FAILURE);
            ExitCode::from(code)
        }
    }
}
