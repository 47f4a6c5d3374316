// Domain records returned by the store. Request-scoped; nothing here
// persists beyond a single handler invocation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub company: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub total_amount: f64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Line items as stored. Historical rows carry nulls or junk in this
    /// column; anything that is not an item array deserializes to `None`
    /// and aggregation treats it as empty.
    #[serde(default, deserialize_with = "lenient_items")]
    pub items: Option<Vec<OrderItem>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: Uuid,
    pub product_id: Uuid,
    pub price: f64,
    pub quantity: i64,
}

/// Accept `items` only when it is an actual array of items; null, scalars,
/// or objects become `None` instead of failing the whole row.
fn lenient_items<'de, D>(deserializer: D) -> Result<Option<Vec<OrderItem>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match value {
        Value::Array(_) => Ok(serde_json::from_value(value).ok()),
        _ => Ok(None),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Communication {
    pub id: Uuid,
    pub message: String,
    pub sender_id: Uuid,
    pub recipient_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Joined user rows; absent when the store was queried without embeds.
    #[serde(default)]
    pub sender: Option<UserSummary>,
    #[serde(default)]
    pub recipient: Option<UserSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A row of per-user protected data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub data: Value,
    pub created_at: DateTime<Utc>,
}

/// The authenticated principal resolved by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub email: String,
}

/// An authenticated session as reported by the auth provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub user: AuthUser,
    pub expires_at: Option<DateTime<Utc>>,
}
