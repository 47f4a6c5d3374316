use std::sync::Arc;

use crate::error::GatewayError;
use crate::gateway::{normalize_list, normalize_single, parse_id, Lookup};
use crate::models::Order;
use crate::store::{ListQuery, StoreClient};

const TABLE: &str = "orders";
const RESOURCE: &str = "order";

/// Data access for orders.
pub struct OrdersGateway {
    store: Arc<dyn StoreClient>,
}

impl OrdersGateway {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Order>, GatewayError> {
        let response = self.store.list(TABLE, ListQuery::default()).await;
        normalize_list(TABLE, response)
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<Lookup<Order>, GatewayError> {
        let id = parse_id(RESOURCE, raw_id)?;
        let response = self.store.get_one(TABLE, id).await;
        normalize_single(RESOURCE, id, response)
    }
}
