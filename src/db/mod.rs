//! Database connection layer
//!
//! Handlers never share a connection: each request asks the provider for a
//! fresh one and hands it back to [`release`] once its statement has run.

use async_trait::async_trait;
use sqlx::{AnyConnection, Connection};

use crate::Result;

pub mod schema;
pub mod url;

pub use schema::ensure_schema;
pub use url::UrlConnectionProvider;

/// Supplies ready-to-use database connections
#[async_trait]
pub trait ConnectionProvider: Send + Sync {
    /// Open a new connection
    async fn connect(&self) -> Result<AnyConnection>;
}

/// Close a connection, logging rather than failing if the close itself fails.
///
/// Dropping an `AnyConnection` also closes it, which covers cancelled requests.
pub async fn release(conn: AnyConnection) {
    if let Err(err) = conn.close().await {
        tracing::debug!(error = %err, "Database connection did not close cleanly");
    }
}
