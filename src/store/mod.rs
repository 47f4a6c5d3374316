// External collaborator boundary: the relational store and the auth provider.
//
// Both are expressed as injected capabilities rather than module-level
// singletons so tests can substitute fakes without patching shared state.
// Responses mirror the store's wire contract: a `{data, error}` pair where
// either side may be absent. Interpreting those pairs is the gateway's job,
// never the caller's.

pub mod postgres;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{AuthUser, Session};

/// Opaque failure reported by the store or auth provider. The message and
/// code are carried verbatim through classification; nothing in this crate
/// rewrites them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreError {
    pub message: String,
    pub code: Option<String>,
}

impl StoreError {
    pub fn new(message: impl Into<String>, code: Option<&str>) -> Self {
        Self {
            message: message.into(),
            code: code.map(str::to_string),
        }
    }
}

/// Result of a list query: zero or more rows, or a failure. Some store call
/// modes report an empty result as `data: None` with no error.
#[derive(Debug, Clone, Default)]
pub struct ListResponse {
    pub data: Option<Vec<Value>>,
    pub error: Option<StoreError>,
}

/// Result of a single-row query. A genuine miss arrives either as a
/// `NOT_FOUND`-coded error or as `{data: None, error: None}` depending on
/// the call mode; both shapes are legitimate.
#[derive(Debug, Clone, Default)]
pub struct SingleResponse {
    pub data: Option<Value>,
    pub error: Option<StoreError>,
}

/// Parameter for a stored procedure call.
#[derive(Debug, Clone)]
pub enum SqlParam {
    Uuid(Uuid),
    Text(String),
}

/// Narrowing filters for list queries.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
    /// Equality filter on a single column.
    pub eq: Option<(String, Uuid)>,
    /// Descending sort column.
    pub order_desc: Option<String>,
}

impl ListQuery {
    pub fn eq(column: impl Into<String>, value: Uuid) -> Self {
        Self {
            eq: Some((column.into(), value)),
            ..Self::default()
        }
    }

    pub fn newest_first(column: impl Into<String>) -> Self {
        Self {
            order_desc: Some(column.into()),
            ..Self::default()
        }
    }
}

/// Relational store client. Implementations never raise; every outcome is
/// reported through the `{data, error}` response pair.
#[async_trait]
pub trait StoreClient: Send + Sync {
    async fn list(&self, table: &str, query: ListQuery) -> ListResponse;

    async fn get_one(&self, table: &str, id: Uuid) -> SingleResponse;

    /// Invoke a stored procedure returning at most one row.
    async fn rpc(&self, function: &str, params: Vec<SqlParam>) -> SingleResponse;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), StoreError>;
}

/// Result of a session lookup. Absence of a session is a first-class
/// outcome, independent of whether `error` is populated.
#[derive(Debug, Clone, Default)]
pub struct SessionResponse {
    pub session: Option<Session>,
    pub error: Option<StoreError>,
}

/// Result of resolving the authenticated user behind a session.
#[derive(Debug, Clone, Default)]
pub struct UserResponse {
    pub user: Option<AuthUser>,
    pub error: Option<StoreError>,
}

/// Authentication provider for the current request context.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn session(&self) -> SessionResponse;

    async fn user(&self) -> UserResponse;
}
