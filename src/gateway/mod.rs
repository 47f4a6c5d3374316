// Normalization layer between raw store calls and the rest of the service.
//
// Every resource goes through the same two operation shapes:
//   list:    null result sets become empty vecs; store failures are
//            classified and raised, never swallowed into an empty list
//   get one: a coded miss becomes a distinguished NotFound failure naming
//            the id; a `{data: None, error: None}` response becomes
//            `Lookup::Missing`, a legitimate outcome rather than an error
//
// Failures are logged with the resource name (and id, for single lookups)
// before they propagate.

pub mod communications;
pub mod customers;
pub mod orders;
pub mod user_data;

pub use communications::CommunicationsGateway;
pub use customers::CustomersGateway;
pub use orders::OrdersGateway;
pub use user_data::UserDataGateway;

use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::error::GatewayError;
use crate::store::{ListResponse, SingleResponse};

/// Three-way outcome of a single-row lookup, with the failure half carried
/// separately in `Result`: present, absent-but-valid, or failed.
#[derive(Debug, Clone, PartialEq)]
pub enum Lookup<T> {
    Found(T),
    Missing,
}

impl<T> Lookup<T> {
    pub fn is_missing(&self) -> bool {
        matches!(self, Lookup::Missing)
    }

    /// Collapse a miss into the distinguished NotFound failure for `id`.
    pub fn or_not_found(self, resource: &str, id: impl std::fmt::Display) -> Result<T, GatewayError> {
        match self {
            Lookup::Found(value) => Ok(value),
            Lookup::Missing => Err(GatewayError::not_found(resource, id)),
        }
    }
}

/// Validate an identifier locally before any store round-trip. Empty or
/// structurally invalid ids are doomed queries; reject them as a
/// validation failure up front.
pub(crate) fn parse_id(resource: &str, raw: &str) -> Result<Uuid, GatewayError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        tracing::warn!(resource, "rejected empty id");
        return Err(GatewayError::Validation {
            message: format!("{} id must not be empty", resource),
            code: "22P02".to_string(),
        });
    }
    Uuid::parse_str(trimmed).map_err(|_| {
        tracing::warn!(resource, id = raw, "rejected malformed id");
        GatewayError::Validation {
            message: format!("invalid {} id: {}", resource, raw),
            code: "22P02".to_string(),
        }
    })
}

/// Normalize a list response: classified failure on error, otherwise the
/// rows with a null result set defaulted to empty.
pub(crate) fn normalize_list<T: DeserializeOwned>(
    resource: &str,
    response: ListResponse,
) -> Result<Vec<T>, GatewayError> {
    if let Some(err) = response.error {
        tracing::error!(
            resource,
            code = err.code.as_deref().unwrap_or("-"),
            "list query failed: {}",
            err.message
        );
        return Err(GatewayError::from_store(err));
    }

    response
        .data
        .unwrap_or_default()
        .into_iter()
        .map(|row| {
            serde_json::from_value(row).map_err(|e| {
                tracing::error!(resource, "malformed row in list result: {}", e);
                GatewayError::internal(format!("malformed {} row: {}", resource, e))
            })
        })
        .collect()
}

/// Normalize a single-row response into the three-way outcome.
pub(crate) fn normalize_single<T: DeserializeOwned>(
    resource: &str,
    id: Uuid,
    response: SingleResponse,
) -> Result<Lookup<T>, GatewayError> {
    if let Some(err) = response.error {
        tracing::error!(
            resource,
            %id,
            code = err.code.as_deref().unwrap_or("-"),
            "lookup failed: {}",
            err.message
        );
        return Err(match GatewayError::from_store(err) {
            // A coded miss is an expected outcome; name the key that missed
            // while keeping the store's own code.
            GatewayError::NotFound { code, .. } => GatewayError::NotFound {
                message: format!("no {} found with id: {}", resource, id),
                code,
            },
            other => other,
        });
    }

    match response.data {
        Some(row) => serde_json::from_value(row)
            .map(Lookup::Found)
            .map_err(|e| {
                tracing::error!(resource, %id, "malformed row in lookup result: {}", e);
                GatewayError::internal(format!("malformed {} row: {}", resource, e))
            }),
        // Some call modes report a miss with neither data nor error; that is
        // not a failure.
        None => Ok(Lookup::Missing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCategory;
    use crate::models::Order;
    use crate::store::StoreError;
    use serde_json::json;

    fn order_row(id: &str, status: &str) -> serde_json::Value {
        json!({
            "id": id,
            "customer_id": "52f3b7a1-11de-4f8a-8f5d-3c2f9e0a6b02",
            "total_amount": 100.0,
            "status": status,
            "created_at": "2024-01-01T10:00:00Z",
            "updated_at": "2024-01-01T10:00:00Z",
            "items": null,
        })
    }

    #[test]
    fn empty_id_is_rejected_as_validation() {
        let err = parse_id("order", "").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        let err = parse_id("order", "   ").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    #[test]
    fn malformed_id_is_rejected_as_validation() {
        let err = parse_id("order", "not-a-uuid").unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.message().contains("not-a-uuid"));
    }

    #[test]
    fn list_with_null_data_and_no_error_is_empty() {
        let rows: Vec<Order> =
            normalize_list("orders", ListResponse { data: None, error: None }).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn list_error_is_classified_not_swallowed() {
        let response = ListResponse {
            data: None,
            error: Some(StoreError::new("JWT expired", Some("PGRST301"))),
        };
        let err = normalize_list::<Order>("orders", response).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.message(), "JWT expired");
        assert_eq!(err.error_code(), "PGRST301");
    }

    #[test]
    fn list_rows_deserialize() {
        let response = ListResponse {
            data: Some(vec![
                order_row("7b1e9a60-63f7-4f0e-9c2a-5a9d2f8b1c01", "completed"),
                order_row("9c2a5a9d-2f8b-4c01-8f5d-3c2f9e0a6b02", "pending"),
            ]),
            error: None,
        };
        let rows: Vec<Order> = normalize_list("orders", response).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].status, "completed");
    }

    #[test]
    fn coded_miss_becomes_not_found_naming_the_id() {
        let id = Uuid::parse_str("7b1e9a60-63f7-4f0e-9c2a-5a9d2f8b1c01").unwrap();
        let response = SingleResponse {
            data: None,
            error: Some(StoreError::new(
                "JSON object requested, multiple (or no) rows returned",
                Some("PGRST116"),
            )),
        };
        let err = normalize_single::<Order>("order", id, response).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::NotFound);
        assert!(err.message().contains(&id.to_string()));
        assert_eq!(err.error_code(), "PGRST116");
    }

    #[test]
    fn non_miss_error_keeps_original_message() {
        let id = Uuid::parse_str("7b1e9a60-63f7-4f0e-9c2a-5a9d2f8b1c01").unwrap();
        let response = SingleResponse {
            data: None,
            error: Some(StoreError::new("connection refused", Some("PGRST301"))),
        };
        let err = normalize_single::<Order>("order", id, response).unwrap_err();
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert_eq!(err.message(), "connection refused");
    }

    #[test]
    fn miss_with_neither_data_nor_error_is_not_an_error() {
        let id = Uuid::parse_str("7b1e9a60-63f7-4f0e-9c2a-5a9d2f8b1c01").unwrap();
        let outcome =
            normalize_single::<Order>("order", id, SingleResponse { data: None, error: None })
                .unwrap();
        assert!(outcome.is_missing());
    }

    #[test]
    fn found_row_deserializes() {
        let id = Uuid::parse_str("7b1e9a60-63f7-4f0e-9c2a-5a9d2f8b1c01").unwrap();
        let response = SingleResponse {
            data: Some(order_row("7b1e9a60-63f7-4f0e-9c2a-5a9d2f8b1c01", "completed")),
            error: None,
        };
        match normalize_single::<Order>("order", id, response).unwrap() {
            Lookup::Found(order) => assert_eq!(order.id, id),
            Lookup::Missing => panic!("expected a row"),
        }
    }
}
