//! Response construction under the configured [`StatusPolicy`]

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

use crate::config::StatusPolicy;
use crate::Error;

const TEXT_PLAIN: &str = "text/plain; charset=utf-8";
const APPLICATION_JSON: &str = "application/json";

impl StatusPolicy {
    /// Status for a successful lookup of a single user
    pub fn found(&self) -> StatusCode {
        match self {
            StatusPolicy::Legacy => StatusCode::FOUND,
            StatusPolicy::Standard => StatusCode::OK,
        }
    }

    /// Status for a failed operation
    pub fn failure(&self, err: &Error) -> StatusCode {
        match self {
            StatusPolicy::Legacy => StatusCode::OK,
            StatusPolicy::Standard => err.status_code(),
        }
    }
}

/// Plain-text body
pub fn text(status: StatusCode, body: impl Into<String>) -> Response {
    (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], body.into()).into_response()
}

/// Pre-encoded JSON body
pub fn json(status: StatusCode, body: Vec<u8>) -> Response {
    (status, [(header::CONTENT_TYPE, APPLICATION_JSON)], body).into_response()
}

/// Log a handler failure and render it as a plain-text response
pub fn failure(policy: StatusPolicy, operation: &'static str, err: &Error) -> Response {
    if err.is_client_error() {
        tracing::warn!(operation, error = %err, detail = %err.detail(), "Rejected request");
    } else {
        tracing::error!(operation, error = %err, detail = %err.detail(), "Request failed");
    }

    text(policy.failure(err), err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legacy_policy_hides_failures_behind_200() {
        let err = Error::InvalidId("abc".to_string());
        assert_eq!(StatusPolicy::Legacy.failure(&err), StatusCode::OK);
        assert_eq!(StatusPolicy::Legacy.found(), StatusCode::FOUND);
    }

    #[test]
    fn test_standard_policy_uses_error_status() {
        let err = Error::InvalidId("abc".to_string());
        assert_eq!(StatusPolicy::Standard.failure(&err), StatusCode::BAD_REQUEST);
        assert_eq!(StatusPolicy::Standard.found(), StatusCode::OK);
    }

    #[test]
    fn test_failure_response_is_plain_text() {
        let err = Error::Connect(sqlx::Error::PoolTimedOut);
        let response = failure(StatusPolicy::Standard, "list_users", &err);

        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            TEXT_PLAIN
        );
    }
}
