use axum::extract::{Path, State};

use crate::api::{ApiResponse, ApiResult};
use crate::auth;
use crate::error::GatewayError;
use crate::gateway::UserDataGateway;
use crate::handlers::AppState;
use crate::models::UserRecord;

/// GET /api/me/records - the authenticated user's protected records
pub async fn list_records(State(state): State<AppState>) -> ApiResult<Vec<UserRecord>> {
    let user = auth::require_user(state.auth.as_ref()).await?;
    let records = UserDataGateway::new(state.store)
        .list_for_user(user.id)
        .await?;
    Ok(ApiResponse::success(records))
}

/// GET /api/me/records/:id - one of the authenticated user's records
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<UserRecord> {
    let user = auth::require_user(state.auth.as_ref()).await?;
    let record = UserDataGateway::new(state.store)
        .get_by_id(&id)
        .await?
        .or_not_found("user record", &id)?;

    // Another user's record is indistinguishable from a miss.
    if record.user_id != user.id {
        return Err(GatewayError::not_found("user record", &id));
    }

    Ok(ApiResponse::success(record))
}
