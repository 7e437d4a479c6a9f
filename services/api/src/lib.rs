mod cli;
mod demo;
mod infra;
mod routes;
mod server;

use ke_academy::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
