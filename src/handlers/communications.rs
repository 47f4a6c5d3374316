use axum::extract::{Path, State};

use crate::api::{ApiResponse, ApiResult};
use crate::gateway::CommunicationsGateway;
use crate::handlers::AppState;
use crate::models::Communication;

/// GET /api/communications - all communications, newest first
pub async fn list(State(state): State<AppState>) -> ApiResult<Vec<Communication>> {
    let communications = CommunicationsGateway::new(state.store).list().await?;
    Ok(ApiResponse::success(communications))
}

/// GET /api/communications/:id - one communication by id
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Communication> {
    let communication = CommunicationsGateway::new(state.store)
        .get_by_id(&id)
        .await?
        .or_not_found("communication", &id)?;
    Ok(ApiResponse::success(communication))
}
