mod cli;
mod demo;

use movieland::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
