use std::time::Duration;

use color_eyre::eyre::{Result, WrapErr};
use college_api::init_tracing;
use college_db::{create_pool, schema::initialize_database};
use dotenv::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();
    init_tracing(&std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()))?;

    let database_url = std::env::var("DATABASE_URL")
        .wrap_err("DATABASE_URL environment variable must be set")?;

    info!("Connecting to database...");
    let db_pool = create_pool(&database_url, 1, Duration::from_secs(10)).await?;

    // Initialize database schema
    initialize_database(&db_pool).await?;
    info!("Database schema initialized successfully");

    Ok(())
}
