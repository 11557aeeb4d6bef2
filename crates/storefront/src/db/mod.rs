//! Database operations for storefront `PostgreSQL`.
//!
//! # Database: `kirana_storefront`
//!
//! The storefront owns no domain tables; the catalog and order APIs are the
//! source of truth for products and orders. The only table here is
//! `sessions` (tower-sessions storage), which holds the persisted cart
//! snapshots.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

/// Pool sizing: the storefront only reads/writes sessions, so a small pool
/// is plenty.
const MAX_CONNECTIONS: u32 = 10;
const MIN_CONNECTIONS: u32 = 2;
const ACQUIRE_TIMEOUT: Duration = Duration::from_secs(10);

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .min_connections(MIN_CONNECTIONS)
        .acquire_timeout(ACQUIRE_TIMEOUT)
        .connect(database_url.expose_secret())
        .await
}
