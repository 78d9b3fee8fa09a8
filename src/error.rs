//! Error types for usuarios
//!
//! Display strings are the plain-text bodies written back to HTTP clients,
//! so they never include the underlying driver error.

use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// The SQL statements issued by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Insert,
    SelectAll,
    SelectById,
    Update,
    Delete,
    CreateTable,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            StatementKind::Insert => "insert",
            StatementKind::SelectAll => "select_all",
            StatementKind::SelectById => "select_by_id",
            StatementKind::Update => "update",
            StatementKind::Delete => "delete",
            StatementKind::CreateTable => "create_table",
        }
    }

    fn failure_message(&self) -> &'static str {
        match self {
            StatementKind::Insert => "Erro ao executar o statement",
            StatementKind::SelectAll => "Erro ao buscar usuarios",
            StatementKind::SelectById => "Erro ao procurar usuario no banco",
            StatementKind::Update => "Erro ao atualizar usuario",
            StatementKind::Delete => "Erro ao deletar o usuario",
            StatementKind::CreateTable => "Erro ao criar a tabela de usuarios",
        }
    }
}

impl std::fmt::Display for StatementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug)]
pub enum Error {
    #[error("Falha ao ler o corpo da requisicao")]
    ReadBody(String),

    #[error("Erro ao converter o usuario para struct")]
    DecodeBody(#[source] serde_json::Error),

    #[error("Erro ao converter o ID para int")]
    InvalidId(String),

    #[error("Erro ao conectar ao banco")]
    Connect(#[source] sqlx::Error),

    #[error("Erro ao criar um statement")]
    Prepare {
        statement: StatementKind,
        #[source]
        source: sqlx::Error,
    },

    #[error("{}", .statement.failure_message())]
    Execute {
        statement: StatementKind,
        #[source]
        source: sqlx::Error,
    },

    #[error("Erro ao obter o ultimo id inserido")]
    LastInsertId(String),

    #[error("Erro ao escanear os usuarios")]
    Scan(#[source] sqlx::Error),

    #[error("Erro ao converter para JSON")]
    Encode(#[source] serde_json::Error),
}

impl Error {
    pub fn prepare(statement: StatementKind, source: sqlx::Error) -> Self {
        Error::Prepare { statement, source }
    }

    pub fn execute(statement: StatementKind, source: sqlx::Error) -> Self {
        Error::Execute { statement, source }
    }

    /// Whether the failure was caused by the request rather than the database
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::ReadBody(_) | Error::DecodeBody(_) | Error::InvalidId(_)
        )
    }

    /// Conventional HTTP status for this failure
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::ReadBody(_) | Error::DecodeBody(_) | Error::InvalidId(_) => {
                StatusCode::BAD_REQUEST
            }
            Error::Connect(_) => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Underlying cause, for logs only
    pub fn detail(&self) -> String {
        match self {
            Error::ReadBody(reason) | Error::InvalidId(reason) | Error::LastInsertId(reason) => {
                reason.clone()
            }
            Error::DecodeBody(err) | Error::Encode(err) => err.to_string(),
            Error::Connect(err) | Error::Scan(err) => err.to_string(),
            Error::Prepare { source, .. } | Error::Execute { source, .. } => source.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_hide_driver_errors() {
        let err = Error::execute(
            StatementKind::Delete,
            sqlx::Error::Protocol("connection reset".to_string()),
        );
        assert_eq!(err.to_string(), "Erro ao deletar o usuario");
        assert!(err.detail().contains("connection reset"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            Error::InvalidId("abc".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            Error::Connect(sqlx::Error::PoolTimedOut).status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            Error::prepare(StatementKind::Insert, sqlx::Error::RowNotFound).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert!(Error::ReadBody("eof".to_string()).is_client_error());
        assert!(!Error::LastInsertId("none".to_string()).is_client_error());
    }
}
