//! API handlers
//!
//! Each handler runs one linear sequence: parse input, open a connection,
//! run a single statement, release the connection, write the response.
//! Failures stop the sequence and are rendered by [`response::failure`].

use axum::{
    extract::{
        rejection::{BytesRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::api::response;
use crate::api::AppState;
use crate::db;
use crate::types::{parse_user_id, User, UserId};
use crate::users;
use crate::{Error, Result};

/// Liveness probe; does not touch the database
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create a user from a `{"nome", "email"}` body
pub async fn create_user(
    State(state): State<AppState>,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    match insert_user(&state, body).await {
        Ok(id) => {
            tracing::info!(user_id = id, "User created");
            response::text(
                StatusCode::CREATED,
                format!("O ultimo id inserido foi {}", id),
            )
        }
        Err(err) => response::failure(state.status_policy, "create_user", &err),
    }
}

async fn insert_user(
    state: &AppState,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<UserId> {
    let user = decode_user(body)?;

    let mut conn = state.connect().await?;
    let inserted = users::insert(&mut conn, &user).await;
    db::release(conn).await;

    inserted
}

/// List every user as a JSON array
pub async fn list_users(State(state): State<AppState>) -> Response {
    match fetch_users(&state).await {
        Ok(body) => response::json(StatusCode::OK, body),
        Err(err) => response::failure(state.status_policy, "list_users", &err),
    }
}

async fn fetch_users(state: &AppState) -> Result<Vec<u8>> {
    let mut conn = state.connect().await?;
    let listed = users::list(&mut conn).await;
    db::release(conn).await;

    serde_json::to_vec(&listed?).map_err(Error::Encode)
}

/// Fetch one user by id
///
/// An unknown id answers with the zero-valued user rather than an error.
pub async fn get_user(State(state): State<AppState>, raw_id: RawId) -> Response {
    match fetch_user(&state, raw_id).await {
        Ok(body) => response::json(state.status_policy.found(), body),
        Err(err) => response::failure(state.status_policy, "get_user", &err),
    }
}

async fn fetch_user(state: &AppState, raw_id: RawId) -> Result<Vec<u8>> {
    let id = path_id(raw_id)?;

    let mut conn = state.connect().await?;
    let found = users::get(&mut conn, id).await;
    db::release(conn).await;

    let user = found?;
    if user.id == 0 {
        tracing::debug!(user_id = id, "No user with this id");
    }

    serde_json::to_vec(&user).map_err(Error::Encode)
}

/// Replace name and email of an existing user
pub async fn update_user(
    State(state): State<AppState>,
    raw_id: RawId,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Response {
    match overwrite_user(&state, raw_id, body).await {
        Ok(()) => no_content(),
        Err(err) => response::failure(state.status_policy, "update_user", &err),
    }
}

async fn overwrite_user(
    state: &AppState,
    raw_id: RawId,
    body: std::result::Result<Bytes, BytesRejection>,
) -> Result<()> {
    let id = path_id(raw_id)?;
    let user = decode_user(body)?;

    let mut conn = state.connect().await?;
    let updated = users::update(&mut conn, id, &user).await;
    db::release(conn).await;

    let rows = updated?;
    tracing::info!(user_id = id, rows, "User updated");
    Ok(())
}

/// Delete a user by id
pub async fn delete_user(State(state): State<AppState>, raw_id: RawId) -> Response {
    match remove_user(&state, raw_id).await {
        Ok(()) => no_content(),
        Err(err) => response::failure(state.status_policy, "delete_user", &err),
    }
}

async fn remove_user(state: &AppState, raw_id: RawId) -> Result<()> {
    let id = path_id(raw_id)?;

    let mut conn = state.connect().await?;
    let deleted = users::delete(&mut conn, id).await;
    db::release(conn).await;

    let rows = deleted?;
    tracing::info!(user_id = id, rows, "User deleted");
    Ok(())
}

/// The `:id` segment; a segment axum cannot decode is an invalid id
type RawId = std::result::Result<Path<String>, PathRejection>;

fn path_id(raw_id: RawId) -> Result<UserId> {
    let Path(raw_id) = raw_id.map_err(|e| Error::InvalidId(e.body_text()))?;
    parse_user_id(&raw_id)
}

fn decode_user(body: std::result::Result<Bytes, BytesRejection>) -> Result<User> {
    let body = body.map_err(|e| Error::ReadBody(e.body_text()))?;
    User::from_request_body(&body).map_err(Error::DecodeBody)
}

fn no_content() -> Response {
    StatusCode::NO_CONTENT.into_response()
}
