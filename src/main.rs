//! jiratrack binary entry point.

use std::process::ExitCode;

fn main() -> ExitCode {
    match jiratrack::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            jiratrack::ui::output::error(format!("{:#}", err));
            ExitCode::FAILURE
        }
    }
}
