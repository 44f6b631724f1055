use std::sync::Arc;

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use super::{ApiError, ApiJson};
use crate::api::AppState;
use crate::application::party::{HandlePresence, HandlePresenceInput};
use crate::domain::value_objects::{PresenceStatus, RoleId, UserId};

/// Member presence change forwarded by the gateway adapter
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceRequest {
    pub user_id: u64,
    pub status: PresenceStatus,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PresenceResponse {
    pub success: bool,
    pub left_parties: Vec<RoleId>,
}

/// POST /api/presence - member presence update
pub async fn presence_update(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<PresenceRequest>,
) -> Result<Json<PresenceResponse>, ApiError> {
    let use_case = HandlePresence::new(state.registry.clone());
    let result = use_case
        .execute(HandlePresenceInput {
            user_id: UserId(body.user_id),
            status: body.status,
        })
        .await;

    Ok(Json(PresenceResponse {
        success: true,
        left_parties: result.left.iter().map(|role| role.id).collect(),
    }))
}
