//! URL-based connection provider

use async_trait::async_trait;
use sqlx::{AnyConnection, Connection};

use crate::{Error, Result};

use super::ConnectionProvider;

/// Connects by URL through sqlx's `Any` driver (`mysql://` or `sqlite://`)
pub struct UrlConnectionProvider {
    url: String,
}

impl UrlConnectionProvider {
    pub fn new(url: impl Into<String>) -> Self {
        sqlx::any::install_default_drivers();
        Self { url: url.into() }
    }
}

#[async_trait]
impl ConnectionProvider for UrlConnectionProvider {
    async fn connect(&self) -> Result<AnyConnection> {
        AnyConnection::connect(&self.url)
            .await
            .map_err(Error::Connect)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_connect_sqlite_file() {
        let temp_dir = TempDir::new().unwrap();
        let url = format!(
            "sqlite://{}?mode=rwc",
            temp_dir.path().join("usuarios.db").display()
        );
        let provider = UrlConnectionProvider::new(url);

        let conn = provider.connect().await.unwrap();
        assert_eq!(conn.backend_name(), "SQLite");
        crate::db::release(conn).await;
    }

    #[tokio::test]
    async fn test_connect_missing_database() {
        let temp_dir = TempDir::new().unwrap();
        let url = format!(
            "sqlite://{}",
            temp_dir.path().join("missing").join("usuarios.db").display()
        );
        let provider = UrlConnectionProvider::new(url);

        let err = provider.connect().await.unwrap_err();
        assert!(matches!(err, Error::Connect(_)));
    }
}
