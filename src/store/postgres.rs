// Postgres-backed store client. Rows come back as `row_to_json` values so
// the gateway's normalization sees the same wire shape every backend
// produces; SQLSTATE codes are surfaced verbatim for classification.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::info;
use uuid::Uuid;

use crate::config;
use crate::store::{ListQuery, ListResponse, SingleResponse, SqlParam, StoreClient, StoreError};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Connect using `DATABASE_URL`, with pool limits from configuration.
    pub async fn connect() -> Result<Self, StoreError> {
        let raw = std::env::var("DATABASE_URL")
            .map_err(|_| StoreError::new("DATABASE_URL is not set", None))?;
        let parsed = url::Url::parse(&raw)
            .map_err(|_| StoreError::new("DATABASE_URL is not a valid URL", None))?;

        let cfg = config::config();
        let pool = PgPoolOptions::new()
            .max_connections(cfg.database.max_connections)
            .acquire_timeout(Duration::from_secs(cfg.database.connection_timeout))
            .connect(parsed.as_str())
            .await
            .map_err(store_error)?;

        info!(
            host = parsed.host_str().unwrap_or("-"),
            "connected to store database"
        );
        Ok(Self { pool })
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Quote SQL identifier to prevent injection
    fn quote_identifier(name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }
}

#[async_trait]
impl StoreClient for PgStore {
    async fn list(&self, table: &str, query: ListQuery) -> ListResponse {
        let mut sql = format!(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM {}",
            Self::quote_identifier(table)
        );
        if let Some((column, _)) = &query.eq {
            sql.push_str(&format!(" WHERE {} = $1", Self::quote_identifier(column)));
        }
        if let Some(column) = &query.order_desc {
            sql.push_str(&format!(" ORDER BY {} DESC", Self::quote_identifier(column)));
        }
        sql.push_str(") t");

        let fetched = match query.eq {
            Some((_, value)) => sqlx::query(&sql).bind(value).fetch_all(&self.pool).await,
            None => sqlx::query(&sql).fetch_all(&self.pool).await,
        };

        match fetched {
            Ok(rows) => ListResponse {
                data: Some(
                    rows.iter()
                        .map(|row| row.try_get::<Value, _>("row").unwrap_or(Value::Null))
                        .collect(),
                ),
                error: None,
            },
            Err(e) => ListResponse {
                data: None,
                error: Some(store_error(e)),
            },
        }
    }

    async fn get_one(&self, table: &str, id: Uuid) -> SingleResponse {
        let sql = format!(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM {} WHERE id = $1) t",
            Self::quote_identifier(table)
        );

        match sqlx::query(&sql).bind(id).fetch_optional(&self.pool).await {
            // A miss in this call mode is data-less and error-less.
            Ok(row) => SingleResponse {
                data: row.map(|r| r.try_get::<Value, _>("row").unwrap_or(Value::Null)),
                error: None,
            },
            Err(e) => SingleResponse {
                data: None,
                error: Some(store_error(e)),
            },
        }
    }

    async fn rpc(&self, function: &str, params: Vec<SqlParam>) -> SingleResponse {
        let placeholders: Vec<String> = (1..=params.len()).map(|i| format!("${}", i)).collect();
        let sql = format!(
            "SELECT row_to_json(t) AS row FROM (SELECT * FROM {}({})) t",
            Self::quote_identifier(function),
            placeholders.join(", ")
        );

        let mut query = sqlx::query(&sql);
        for param in params {
            query = match param {
                SqlParam::Uuid(value) => query.bind(value),
                SqlParam::Text(value) => query.bind(value),
            };
        }

        match query.fetch_optional(&self.pool).await {
            Ok(row) => SingleResponse {
                data: row.map(|r| r.try_get::<Value, _>("row").unwrap_or(Value::Null)),
                error: None,
            },
            Err(e) => SingleResponse {
                data: None,
                error: Some(store_error(e)),
            },
        }
    }

    async fn ping(&self) -> Result<(), StoreError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map(|_| ())
            .map_err(store_error)
    }
}

/// Translate a sqlx failure into the raw `{message, code}` wire shape,
/// keeping the database's SQLSTATE when one exists.
fn store_error(err: sqlx::Error) -> StoreError {
    let code = match &err {
        sqlx::Error::Database(db) => db.code().map(|c| c.to_string()),
        _ => None,
    };
    StoreError {
        message: err.to_string(),
        code,
    }
}
