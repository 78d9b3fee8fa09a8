//! Usuarios - CRUD endpoints over a relational users table
//!
//! - One `User` entity (`id`, `nome`, `email`) stored in `usuarios`
//! - Each request opens its own connection and runs one statement
//! - MySQL in production, SQLite for local runs and tests (sqlx `Any`)
//! - Legacy or standard status code mapping, chosen by configuration

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod types;
pub mod users;

pub use error::{Error, Result};
