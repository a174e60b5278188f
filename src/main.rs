use std::sync::Arc;

use color_eyre::eyre::Result;
use college_api::{config::ApiConfig, init_tracing, start_server};
use college_db::{create_pool, schema::initialize_database, PgDocumentStore};
use dotenv::dotenv;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Load configuration
    let config = ApiConfig::from_env()?;
    init_tracing(&config.log_level)?;

    // Create database connection pool
    let db_pool = create_pool(
        &config.database_url,
        config.database_max_connections,
        config.database_connect_timeout,
    )
    .await?;
    info!("Connected to database");

    // Initialize database schema
    initialize_database(&db_pool).await?;

    // Start API server
    start_server(config, Arc::new(PgDocumentStore::new(db_pool))).await?;

    Ok(())
}
