//! twig binary entry point.

use std::process::ExitCode;

use twig::ui::output;

fn main() -> ExitCode {
    match twig::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}
