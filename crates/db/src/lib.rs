pub mod guard;
pub mod hydrate;
pub mod lesson_query;
pub mod memory;
pub mod postgres;
pub mod repositories;
pub mod schema;
pub mod statistics;
pub mod store;

pub mod mock;

use std::time::Duration;

use eyre::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};

pub use memory::MemoryStore;
pub use postgres::PgDocumentStore;
pub use store::{Collection, Condition, DocumentStore, Filter, Update};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(
    database_url: &str,
    max_connections: u32,
    connect_timeout: Duration,
) -> Result<DbPool> {
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(connect_timeout)
        .connect(database_url)
        .await?;

    Ok(pool)
}
