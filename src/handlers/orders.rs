use axum::extract::{Path, State};

use crate::analytics;
use crate::analytics::{OrderStatistics, OrderTotals};
use crate::api::{ApiResponse, ApiResult};
use crate::gateway::OrdersGateway;
use crate::handlers::AppState;
use crate::models::Order;

/// GET /api/orders - all orders
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Order>> {
    let orders = OrdersGateway::new(state.store).list().await?;
    Ok(ApiResponse::success(orders))
}

/// GET /api/orders/:id - one order by id
pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<Order> {
    let order = OrdersGateway::new(state.store)
        .get_by_id(&id)
        .await?
        .or_not_found("order", &id)?;
    Ok(ApiResponse::success(order))
}

/// GET /api/orders/analytics/totals - revenue metrics over all orders
pub async fn totals(State(state): State<AppState>) -> ApiResult<OrderTotals> {
    let orders = OrdersGateway::new(state.store).list().await?;
    Ok(ApiResponse::success(analytics::totals(&orders)))
}

/// GET /api/orders/analytics/statistics - status distribution over all orders
pub async fn statistics(State(state): State<AppState>) -> ApiResult<OrderStatistics> {
    let orders = OrdersGateway::new(state.store).list().await?;
    Ok(ApiResponse::success(analytics::statistics(&orders)))
}
