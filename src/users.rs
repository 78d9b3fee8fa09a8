//! Parameterized statements over the `usuarios` table
//!
//! Every function borrows a connection owned by the caller and issues a
//! single statement on it. Placeholders are `?`, which both MySQL and
//! SQLite accept through the `Any` driver.

use sqlx::any::AnyRow;
use sqlx::{AnyConnection, Executor, Row, Statement as _};

use crate::error::StatementKind;
use crate::types::{User, UserId};
use crate::{Error, Result};

const INSERT: &str = "insert into usuarios (nome, email) values (?, ?)";
const SELECT_ALL: &str = "select id, nome, email from usuarios";
const SELECT_BY_ID: &str = "select id, nome, email from usuarios where id = ?";
// The Any driver decodes MySQL `INT UNSIGNED` as i32, so widen it server-side
const SELECT_ALL_MYSQL: &str = "select cast(id as signed) as id, nome, email from usuarios";
const SELECT_BY_ID_MYSQL: &str =
    "select cast(id as signed) as id, nome, email from usuarios where id = ?";
const UPDATE: &str = "update usuarios set nome = ?, email = ? where id = ?";
const DELETE: &str = "delete from usuarios where id = ?";

/// Insert a user and return the id the database assigned to it
pub async fn insert(conn: &mut AnyConnection, user: &User) -> Result<UserId> {
    let statement = (&mut *conn)
        .prepare(INSERT)
        .await
        .map_err(|e| Error::prepare(StatementKind::Insert, e))?;

    let result = statement
        .query()
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .execute(&mut *conn)
        .await
        .map_err(|e| Error::execute(StatementKind::Insert, e))?;

    let raw_id = match result.last_insert_id() {
        Some(id) => id,
        None => query_last_insert_id(conn).await?,
    };

    UserId::try_from(raw_id)
        .map_err(|_| Error::LastInsertId(format!("id {} does not fit in u32", raw_id)))
}

/// Some drivers do not report the generated id on the query result
async fn query_last_insert_id(conn: &mut AnyConnection) -> Result<i64> {
    let sql = if conn.backend_name().eq_ignore_ascii_case("sqlite") {
        "select last_insert_rowid()"
    } else {
        "select last_insert_id()"
    };

    sqlx::query_scalar::<_, i64>(sql)
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| Error::LastInsertId(e.to_string()))
}

/// Fetch every user, in the order the database returns them
pub async fn list(conn: &mut AnyConnection) -> Result<Vec<User>> {
    let sql = select_sql(conn.backend_name(), StatementKind::SelectAll);
    let rows = sqlx::query(sql)
        .fetch_all(&mut *conn)
        .await
        .map_err(|e| Error::execute(StatementKind::SelectAll, e))?;

    rows.iter()
        .map(user_from_row)
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::Scan)
}

/// Fetch one user; a missing row yields the zero-valued [`User`]
pub async fn get(conn: &mut AnyConnection, id: UserId) -> Result<User> {
    let sql = select_sql(conn.backend_name(), StatementKind::SelectById);
    let row = sqlx::query(sql)
        .bind(i64::from(id))
        .fetch_optional(&mut *conn)
        .await
        .map_err(|e| Error::execute(StatementKind::SelectById, e))?;

    match row {
        Some(row) => user_from_row(&row).map_err(Error::Scan),
        None => Ok(User::default()),
    }
}

/// Overwrite name and email of the user with `id`, returning rows affected
pub async fn update(conn: &mut AnyConnection, id: UserId, user: &User) -> Result<u64> {
    let statement = (&mut *conn)
        .prepare(UPDATE)
        .await
        .map_err(|e| Error::prepare(StatementKind::Update, e))?;

    let result = statement
        .query()
        .bind(user.name.as_str())
        .bind(user.email.as_str())
        .bind(i64::from(id))
        .execute(&mut *conn)
        .await
        .map_err(|e| Error::execute(StatementKind::Update, e))?;

    Ok(result.rows_affected())
}

/// Delete the user with `id`, returning rows affected
pub async fn delete(conn: &mut AnyConnection, id: UserId) -> Result<u64> {
    let statement = (&mut *conn)
        .prepare(DELETE)
        .await
        .map_err(|e| Error::prepare(StatementKind::Delete, e))?;

    let result = statement
        .query()
        .bind(i64::from(id))
        .execute(&mut *conn)
        .await
        .map_err(|e| Error::execute(StatementKind::Delete, e))?;

    Ok(result.rows_affected())
}

/// Select text for `backend`, as reported by `AnyConnection::backend_name`
pub fn select_sql(backend: &str, statement: StatementKind) -> &'static str {
    let mysql = backend.eq_ignore_ascii_case("mysql");
    match (statement, mysql) {
        (StatementKind::SelectById, true) => SELECT_BY_ID_MYSQL,
        (StatementKind::SelectById, false) => SELECT_BY_ID,
        (_, true) => SELECT_ALL_MYSQL,
        (_, false) => SELECT_ALL,
    }
}

fn user_from_row(row: &AnyRow) -> std::result::Result<User, sqlx::Error> {
    let id: i64 = row.try_get("id")?;
    let id = UserId::try_from(id).map_err(|e| sqlx::Error::Decode(Box::new(e)))?;

    Ok(User {
        id,
        name: row.try_get("nome")?,
        email: row.try_get("email")?,
    })
}
