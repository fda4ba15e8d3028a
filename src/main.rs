use std::process::ExitCode;

use imgvendor::ui::output;

fn main() -> ExitCode {
    match imgvendor::cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::error(err);
            ExitCode::FAILURE
        }
    }
}
