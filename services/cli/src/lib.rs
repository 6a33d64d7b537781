mod cli;
mod commands;
mod infra;
mod wizard;

use mutra_pariksha::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
