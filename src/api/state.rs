//! API server state

use std::sync::Arc;

use sqlx::AnyConnection;

use crate::config::StatusPolicy;
use crate::db::ConnectionProvider;
use crate::Result;

/// API server state
///
/// Immutable and cheap to clone; requests never share a connection.
#[derive(Clone)]
pub struct AppState {
    /// Source of per-request database connections
    pub provider: Arc<dyn ConnectionProvider>,

    /// Status code mapping for handler outcomes
    pub status_policy: StatusPolicy,
}

impl AppState {
    pub fn new(provider: Arc<dyn ConnectionProvider>, status_policy: StatusPolicy) -> Self {
        Self {
            provider,
            status_policy,
        }
    }

    /// Open a connection scoped to the current request
    pub async fn connect(&self) -> Result<AnyConnection> {
        self.provider.connect().await
    }
}
