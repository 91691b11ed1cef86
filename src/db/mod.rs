pub mod queries;

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Error;

pub use queries::categories::{Category, CategoryTable};
pub use queries::questions::{NewQuestion, Question};

pub async fn establish_connection(path: &str, create_if_missing: bool) -> Result<SqlitePool, Error> {
    let options = SqliteConnectOptions::from_str(&format!("sqlite:{}", path))?
        .create_if_missing(create_if_missing);
    SqlitePoolOptions::new().connect_with(options).await
}

/// Single-connection pool over a private in-memory database. Every
/// connection to `sqlite::memory:` gets its own database, so the pool must
/// never open a second one.
pub async fn in_memory() -> Result<SqlitePool, Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}

pub async fn run_migrations(pool: &SqlitePool) -> Result<(), Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
