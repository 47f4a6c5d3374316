use axum::extract::{Path, State};
use axum::Json;
use serde::Deserialize;

use crate::api::{ApiResponse, ApiResult};
use crate::gateway::CustomersGateway;
use crate::handlers::AppState;
use crate::models::Customer;

#[derive(Debug, Deserialize)]
pub struct UpdateCompanyBody {
    pub company: String,
}

/// GET /api/customers - all customers
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Customer>> {
    let customers = CustomersGateway::new(state.store).list().await?;
    Ok(ApiResponse::success(customers))
}

/// GET /api/customers/:id - one customer by id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Customer> {
    let customer = CustomersGateway::new(state.store)
        .get_by_id(&id)
        .await?
        .or_not_found("customer", &id)?;
    Ok(ApiResponse::success(customer))
}

/// PUT /api/customers/:id - update a customer's company
pub async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCompanyBody>,
) -> ApiResult<Customer> {
    let customer = CustomersGateway::new(state.store)
        .update_company(&id, &body.company)
        .await?;
    Ok(ApiResponse::success(customer))
}
