// Error classification and the classified failure type shared by every
// endpoint.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::store::StoreError;

/// Codes the store uses for caller-fixable input problems. Entries are only
/// ever added here, never removed.
pub const VALIDATION_CODES: &[&str] = &["P0001", "22004", "22001", "22023", "22027", "22P02"];

/// Codes the store uses for a single-row miss.
pub const NOT_FOUND_CODES: &[&str] = &["P0002", "PGRST116"];

/// Placeholder code used when the raw error carried none; the failure
/// envelope's field set must stay stable.
pub const UNKNOWN_CODE: &str = "UNKNOWN";

/// Stable failure taxonomy. Every raw store error maps to exactly one
/// category; unrecognized codes collapse to `Internal` rather than leaking
/// transport-level detail as a 4xx the caller cannot act on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Unauthorized,
    Internal,
}

impl ErrorCategory {
    /// Classify a raw store error code. Total: any code outside the known
    /// sets, including its absence, is `Internal`.
    pub fn of_code(code: Option<&str>) -> Self {
        match code {
            Some(c) if VALIDATION_CODES.contains(&c) => ErrorCategory::Validation,
            Some(c) if NOT_FOUND_CODES.contains(&c) => ErrorCategory::NotFound,
            _ => ErrorCategory::Internal,
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ErrorCategory::Validation => StatusCode::BAD_REQUEST,
            ErrorCategory::NotFound => StatusCode::NOT_FOUND,
            ErrorCategory::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCategory::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// A failure already classified and ready for the handler boundary to
/// surface. One variant per category so handler matches stay exhaustive;
/// message and code are the store's own text, preserved verbatim.
#[derive(Debug, Clone, Error)]
pub enum GatewayError {
    #[error("{message}")]
    Validation { message: String, code: String },

    #[error("{message}")]
    NotFound { message: String, code: String },

    #[error("{message}")]
    Unauthorized { message: String, code: String },

    #[error("{message}")]
    Internal { message: String, code: String },
}

impl GatewayError {
    /// Classify a raw store error, keeping its message and code intact.
    pub fn from_store(err: StoreError) -> Self {
        let category = ErrorCategory::of_code(err.code.as_deref());
        let code = err.code.unwrap_or_else(|| UNKNOWN_CODE.to_string());
        let message = err.message;
        match category {
            ErrorCategory::Validation => GatewayError::Validation { message, code },
            ErrorCategory::NotFound => GatewayError::NotFound { message, code },
            ErrorCategory::Unauthorized => GatewayError::Unauthorized { message, code },
            ErrorCategory::Internal => GatewayError::Internal { message, code },
        }
    }

    /// A miss on a single-row lookup, referencing the key that was asked for.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        GatewayError::NotFound {
            message: format!("no {} found with id: {}", resource, id),
            code: "NOT_FOUND".to_string(),
        }
    }

    pub fn unauthorized() -> Self {
        GatewayError::Unauthorized {
            message: "Unauthorized".to_string(),
            code: "UNAUTHORIZED".to_string(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        GatewayError::Internal {
            message: message.into(),
            code: UNKNOWN_CODE.to_string(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            GatewayError::Validation { .. } => ErrorCategory::Validation,
            GatewayError::NotFound { .. } => ErrorCategory::NotFound,
            GatewayError::Unauthorized { .. } => ErrorCategory::Unauthorized,
            GatewayError::Internal { .. } => ErrorCategory::Internal,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        self.category().status()
    }

    pub fn message(&self) -> &str {
        match self {
            GatewayError::Validation { message, .. }
            | GatewayError::NotFound { message, .. }
            | GatewayError::Unauthorized { message, .. }
            | GatewayError::Internal { message, .. } => message,
        }
    }

    pub fn error_code(&self) -> &str {
        match self {
            GatewayError::Validation { code, .. }
            | GatewayError::NotFound { code, .. }
            | GatewayError::Unauthorized { code, .. }
            | GatewayError::Internal { code, .. } => code,
        }
    }

    /// Failure envelope body: `{ success: false, error, code }`.
    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message(),
            "code": self.error_code(),
        })
    }
}

impl From<StoreError> for GatewayError {
    fn from(err: StoreError) -> Self {
        GatewayError::from_store(err)
    }
}

// The single place a classified failure becomes an HTTP response.
impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        match self.category() {
            ErrorCategory::Internal => {
                tracing::error!(code = self.error_code(), "request failed: {}", self.message());
            }
            ErrorCategory::Unauthorized => {
                tracing::warn!("unauthorized request: {}", self.message());
            }
            ErrorCategory::Validation | ErrorCategory::NotFound => {
                tracing::debug!(code = self.error_code(), "request rejected: {}", self.message());
            }
        }
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_codes_map_to_400() {
        for code in VALIDATION_CODES {
            assert_eq!(
                ErrorCategory::of_code(Some(code)).status(),
                StatusCode::BAD_REQUEST,
                "code {}",
                code
            );
        }
    }

    #[test]
    fn not_found_codes_map_to_404() {
        for code in NOT_FOUND_CODES {
            assert_eq!(ErrorCategory::of_code(Some(code)).status(), StatusCode::NOT_FOUND);
        }
    }

    #[test]
    fn unrecognized_codes_collapse_to_500() {
        assert_eq!(
            ErrorCategory::of_code(Some("PGRST301")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ErrorCategory::of_code(Some("42P01")).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(ErrorCategory::of_code(None).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn from_store_preserves_message_and_code_verbatim() {
        let raw = StoreError::new("duplicate key value violates constraint", Some("23505"));
        let err = GatewayError::from_store(raw);
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.message(), "duplicate key value violates constraint");
        assert_eq!(err.error_code(), "23505");
    }

    #[test]
    fn missing_code_falls_back_to_placeholder() {
        let err = GatewayError::from_store(StoreError::new("connection reset", None));
        assert_eq!(err.error_code(), UNKNOWN_CODE);
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn failure_envelope_round_trips_message_and_code() {
        let raw = StoreError::new("company name too long", Some("22001"));
        let body = GatewayError::from_store(raw).to_json();
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "company name too long");
        assert_eq!(body["code"], "22001");
    }

    #[test]
    fn not_found_message_references_the_id() {
        let err = GatewayError::not_found("order", "6a1f0c52-0000-0000-0000-000000000000");
        assert!(err.message().contains("6a1f0c52"));
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
