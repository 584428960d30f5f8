mod cli;
mod infra;
mod routes;
mod server;

use dreamjob::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
