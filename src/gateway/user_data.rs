use std::sync::Arc;

use uuid::Uuid;

use crate::error::GatewayError;
use crate::gateway::{normalize_list, normalize_single, parse_id, Lookup};
use crate::models::UserRecord;
use crate::store::{ListQuery, StoreClient};

const TABLE: &str = "user_data";
const RESOURCE: &str = "user record";

/// Data access for per-user protected records. Callers are expected to have
/// resolved the authenticated user already; this gateway only scopes queries
/// to the id it is given.
pub struct UserDataGateway {
    store: Arc<dyn StoreClient>,
}

impl UserDataGateway {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self { store }
    }

    pub async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<UserRecord>, GatewayError> {
        let response = self
            .store
            .list(TABLE, ListQuery::eq("user_id", user_id))
            .await;
        normalize_list(TABLE, response)
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<Lookup<UserRecord>, GatewayError> {
        let id = parse_id(RESOURCE, raw_id)?;
        let response = self.store.get_one(TABLE, id).await;
        normalize_single(RESOURCE, id, response)
    }
}
