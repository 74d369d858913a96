mod cli;
mod infra;
mod routes;
mod server;
mod table;

use retro_ratings::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
