use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::Json};
use serde::{Deserialize, Serialize};

use super::{api_error, ApiError, ApiJson};
use crate::api::AppState;
use crate::application::party::{
    JoinParty, JoinPartyError, JoinPartyInput, LeaveParty, LeavePartyError, LeavePartyInput,
};
use crate::domain::entities::PartySnapshot;
use crate::domain::value_objects::{PartyAction, UserId};

const STALE_MESSAGE: &str = "This party no longer exists.";

/// Button press forwarded by the gateway adapter
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InteractionRequest {
    pub custom_id: String,
    pub user_id: u64,
}

#[derive(Debug, Serialize)]
pub struct InteractionResponse {
    pub success: bool,
    pub message: String,
    /// Party after the action, absent once it has been dissolved
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<PartySnapshot>,
}

/// POST /api/interactions - Join/Leave buttons on a party status message
pub async fn handle_interaction(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<InteractionRequest>,
) -> Result<Json<InteractionResponse>, ApiError> {
    let (action, party_id) = PartyAction::parse_custom_id(&body.custom_id).ok_or_else(|| {
        api_error(
            StatusCode::BAD_REQUEST,
            "UNKNOWN_INTERACTION",
            format!("Unknown interaction: {}", body.custom_id),
        )
    })?;
    let user_id = UserId(body.user_id);
    let mention = user_id.mention();

    tracing::debug!(%party_id, %user_id, action = action.as_str(), "Party interaction");

    match action {
        PartyAction::Join => {
            let use_case = JoinParty::new(state.registry.clone());
            let result = use_case
                .execute(JoinPartyInput { party_id, user_id })
                .await
                .map_err(|e| match e {
                    JoinPartyError::StaleReference => {
                        api_error(StatusCode::GONE, "PARTY_GONE", STALE_MESSAGE)
                    }
                    JoinPartyError::AlreadyInParty => api_error(
                        StatusCode::CONFLICT,
                        "ALREADY_IN_PARTY",
                        format!("{} is already in the party!", mention),
                    ),
                    JoinPartyError::PartyFull => api_error(
                        StatusCode::CONFLICT,
                        "PARTY_FULL",
                        "The party is full!",
                    ),
                })?;

            Ok(Json(InteractionResponse {
                success: true,
                message: format!("{} joined the party!", mention),
                party: Some(result.party.snapshot()),
            }))
        }
        PartyAction::Leave => {
            let use_case = LeaveParty::new(state.registry.clone());
            let result = use_case
                .execute(LeavePartyInput { party_id, user_id })
                .await
                .map_err(|e| match e {
                    LeavePartyError::StaleReference => {
                        api_error(StatusCode::GONE, "PARTY_GONE", STALE_MESSAGE)
                    }
                    LeavePartyError::NotInParty => api_error(
                        StatusCode::CONFLICT,
                        "NOT_IN_PARTY",
                        format!("{} is not in the party!", mention),
                    ),
                })?;

            Ok(Json(InteractionResponse {
                success: true,
                message: format!("{} left the party!", mention),
                party: (!result.party_deleted).then(|| result.party.snapshot()),
            }))
        }
    }
}
