use std::sync::Arc;

use crate::error::GatewayError;
use crate::gateway::{normalize_list, normalize_single, parse_id, Lookup};
use crate::models::Customer;
use crate::store::{ListQuery, SqlParam, StoreClient};

const TABLE: &str = "customers";
const RESOURCE: &str = "customer";

/// Data access for customers, including the company-update procedure.
pub struct CustomersGateway {
    store: Arc<dyn StoreClient>,
}

impl CustomersGateway {
    pub fn new(store: Arc<dyn StoreClient>) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<Customer>, GatewayError> {
        let response = self.store.list(TABLE, ListQuery::default()).await;
        normalize_list(TABLE, response)
    }

    pub async fn get_by_id(&self, raw_id: &str) -> Result<Lookup<Customer>, GatewayError> {
        let id = parse_id(RESOURCE, raw_id)?;
        let response = self.store.get_one(TABLE, id).await;
        normalize_single(RESOURCE, id, response)
    }

    /// Set a customer's company through the store's `update_customer_company`
    /// procedure. Domain validation (empty name, length limits, unknown
    /// customer) is enforced by the procedure itself and surfaces through
    /// the usual classification: `22xxx`/`P0001` as validation failures,
    /// `P0002` as a miss.
    pub async fn update_company(
        &self,
        raw_id: &str,
        company: &str,
    ) -> Result<Customer, GatewayError> {
        let id = parse_id(RESOURCE, raw_id)?;
        let response = self
            .store
            .rpc(
                "update_customer_company",
                vec![SqlParam::Uuid(id), SqlParam::Text(company.to_string())],
            )
            .await;
        normalize_single(RESOURCE, id, response)?.or_not_found(RESOURCE, id)
    }
}
