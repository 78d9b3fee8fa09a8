//! `usuarios` table bootstrap
//!
//! Creates the table when it is missing. This is a convenience for local
//! runs and tests; it never alters an existing table.

use crate::error::StatementKind;
use crate::{Error, Result};

use super::ConnectionProvider;

const CREATE_TABLE_MYSQL: &str = "create table if not exists usuarios (
    id int unsigned auto_increment primary key,
    nome varchar(50) not null,
    email varchar(50) not null
) engine=InnoDB";

const CREATE_TABLE_SQLITE: &str = "create table if not exists usuarios (
    id integer primary key autoincrement,
    nome text not null,
    email text not null
)";

/// DDL for the backend reported by `AnyConnection::backend_name`
pub fn create_table_sql(backend: &str) -> &'static str {
    if backend.eq_ignore_ascii_case("mysql") {
        CREATE_TABLE_MYSQL
    } else {
        CREATE_TABLE_SQLITE
    }
}

/// Create the `usuarios` table if it does not exist yet
pub async fn ensure_schema(provider: &dyn ConnectionProvider) -> Result<()> {
    let mut conn = provider.connect().await?;
    let backend = conn.backend_name().to_string();

    let outcome = sqlx::query(create_table_sql(&backend))
        .execute(&mut conn)
        .await
        .map(|_| ())
        .map_err(|e| Error::execute(StatementKind::CreateTable, e));

    super::release(conn).await;

    if outcome.is_ok() {
        tracing::info!(%backend, "usuarios table ready");
    }
    outcome
}
