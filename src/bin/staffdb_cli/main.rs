mod app;
mod commands;
mod context;
mod formatters;

use std::process::ExitCode;

use log::info;

fn main() -> ExitCode {
    let result = app::run();

    info!("staffdb finished");

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(_) => ExitCode::FAILURE,
    }
}
