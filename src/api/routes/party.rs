use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::{api_error, ApiError, ApiJson};
use crate::api::AppState;
use crate::application::party::{
    AdjustParty, AdjustPartyError, AdjustPartyInput, CreateParty, CreatePartyError,
    CreatePartyInput, KickPlayer, KickPlayerError, KickPlayerInput, ListParties, RemoveParty,
    RemovePartyError, RemovePartyInput,
};
use crate::domain::entities::PartySnapshot;
use crate::domain::value_objects::{ChannelId, Role, RoleId, UserId};

// ============================================================================
// Request/Response DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartyRequest {
    pub channel_id: u64,
    pub creator_id: u64,
    pub role_id: u64,
    pub role_name: String,
    pub size: usize,
}

#[derive(Debug, Deserialize)]
pub struct AdjustPartyRequest {
    pub size: usize,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KickPlayerRequest {
    pub user_id: u64,
}

/// Response to a party command; `message` is shown to the invoking user
#[derive(Debug, Serialize)]
pub struct CommandResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub party: Option<PartySnapshot>,
}

#[derive(Debug, Serialize)]
pub struct ListPartiesResponse {
    pub success: bool,
    pub message: String,
    pub parties: Vec<PartySnapshot>,
    pub total: usize,
}

fn no_party(role_id: RoleId) -> ApiError {
    api_error(
        StatusCode::NOT_FOUND,
        "PARTY_NOT_FOUND",
        format!("No party for {}", role_id.mention()),
    )
}

/// Plain-text listing: one block per party with its members indented below
fn format_party_list(parties: &[PartySnapshot]) -> String {
    if parties.is_empty() {
        return "No parties available".to_string();
    }

    let blocks: Vec<String> = parties
        .iter()
        .map(|party| {
            let mut block = format!("{} ({}/{})", party.role.name, party.players.len(), party.size);
            for player in &party.players {
                block.push_str(&format!("\n  - {}", player.mention()));
            }
            block
        })
        .collect();

    format!("Current parties:\n\n{}", blocks.join("\n\n"))
}

// ============================================================================
// Route Handlers
// ============================================================================

/// POST /api/party - party create <role, size>
pub async fn create_party(
    State(state): State<Arc<AppState>>,
    ApiJson(body): ApiJson<CreatePartyRequest>,
) -> Result<(StatusCode, Json<CommandResponse>), ApiError> {
    let use_case = CreateParty::new(state.registry.clone());
    let result = use_case
        .execute(CreatePartyInput {
            channel_id: ChannelId(body.channel_id),
            creator_id: UserId(body.creator_id),
            role: Role::new(body.role_id, body.role_name),
            size: body.size,
        })
        .await
        .map_err(|e| match e {
            CreatePartyError::AlreadyExists(_) => {
                api_error(StatusCode::CONFLICT, "PARTY_EXISTS", e.to_string())
            }
            CreatePartyError::Validation(msg) => {
                api_error(StatusCode::BAD_REQUEST, "INVALID_SIZE", msg)
            }
        })?;

    let party = result.party.snapshot();
    Ok((
        StatusCode::CREATED,
        Json(CommandResponse {
            success: true,
            message: format!(
                "Party created for {} with size {}",
                party.role.mention(),
                party.size
            ),
            party: Some(party),
        }),
    ))
}

/// POST /api/party/:roleId/adjust - party adjust <role, size>
pub async fn adjust_party(
    State(state): State<Arc<AppState>>,
    Path(role_id): Path<u64>,
    ApiJson(body): ApiJson<AdjustPartyRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let role_id = RoleId(role_id);
    let use_case = AdjustParty::new(state.registry.clone());
    let result = use_case
        .execute(AdjustPartyInput {
            role_id,
            size: body.size,
        })
        .await
        .map_err(|e| match e {
            AdjustPartyError::PartyNotFound => no_party(role_id),
            AdjustPartyError::InvalidSize { .. } => {
                api_error(StatusCode::BAD_REQUEST, "INVALID_SIZE", e.to_string())
            }
        })?;

    let party = result.party.snapshot();
    Ok(Json(CommandResponse {
        success: true,
        message: format!(
            "Party size adjusted for {} to {}",
            party.role.mention(),
            party.size
        ),
        party: Some(party),
    }))
}

/// GET /api/party - party list (admin)
pub async fn list_parties(State(state): State<Arc<AppState>>) -> Json<ListPartiesResponse> {
    let result = ListParties::new(state.registry.clone()).execute().await;

    Json(ListPartiesResponse {
        success: true,
        message: format_party_list(&result.parties),
        total: result.parties.len(),
        parties: result.parties,
    })
}

/// POST /api/party/:roleId/kick - party kick <role, user> (admin)
pub async fn kick_player(
    State(state): State<Arc<AppState>>,
    Path(role_id): Path<u64>,
    ApiJson(body): ApiJson<KickPlayerRequest>,
) -> Result<Json<CommandResponse>, ApiError> {
    let role_id = RoleId(role_id);
    let user_id = UserId(body.user_id);
    let use_case = KickPlayer::new(state.registry.clone());
    let result = use_case
        .execute(KickPlayerInput { role_id, user_id })
        .await
        .map_err(|e| match e {
            KickPlayerError::PartyNotFound => no_party(role_id),
            KickPlayerError::NotInParty(role) => api_error(
                StatusCode::NOT_FOUND,
                "NOT_IN_PARTY",
                format!("{} is not in the party for {}", user_id.mention(), role.name),
            ),
        })?;

    let party = result.party.snapshot();
    Ok(Json(CommandResponse {
        success: true,
        message: format!("Kicked {} from {}", user_id.mention(), party.role.mention()),
        party: (!result.party_deleted).then_some(party),
    }))
}

/// DELETE /api/party/:roleId - party remove <role> (admin)
pub async fn remove_party(
    State(state): State<Arc<AppState>>,
    Path(role_id): Path<u64>,
) -> Result<Json<CommandResponse>, ApiError> {
    let role_id = RoleId(role_id);
    let use_case = RemoveParty::new(state.registry.clone());
    let result = use_case
        .execute(RemovePartyInput { role_id })
        .await
        .map_err(|e| match e {
            RemovePartyError::PartyNotFound => no_party(role_id),
        })?;

    Ok(Json(CommandResponse {
        success: true,
        message: format!("Removed party for {}", result.role.mention()),
        party: None,
    }))
}
