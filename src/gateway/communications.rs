use std::sync::Arc;

use crate::error::GatewayError;
use crate::gateway::{normalize_list, normalize_single, parse_id, Lookup};
use crate::models::Communication;
use crate::store::{ListQuery, StoreClient};

const TABLE: &str = "communications";
const RESOURCE: &str = "communication";

/// Data access for communications between users.
pub struct CommunicationsGateway {
    store: Arc<dyn StoreClient>,
}

impl CommunicationsGateway {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self { store }
    }

    /// All communications, newest first.
    pub async fn list(&self) -> Result<Vec<Communication>, GatewayError> {
        let response = self
            .store
            .list(TABLE, ListQuery::newest_first("created_at"))
            .await;
        normalize_list(TABLE, response)
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<Lookup<Communication>, GatewayError> {
        let id = parse_id(RESOURCE, raw_id)?;
        let response = self.store.get_one(TABLE, id).await;
        normalize_single(RESOURCE, id, response)
    }
}
