mod cli;
mod infra;
mod report;
mod routes;
mod server;

use mock_placement::error::AppError;

pub async fn run() -> Result<(), AppError> {
    cli::run().await
}
