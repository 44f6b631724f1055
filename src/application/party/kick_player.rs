use std::sync::Arc;

use crate::domain::entities::Party;
use crate::domain::repositories::PartyRegistry;
use crate::domain::value_objects::{Role, RoleId, UserId};

/// Kick player input
pub struct KickPlayerInput {
    pub role_id: RoleId,
    pub user_id: UserId,
}

/// Kick player output
pub struct KickPlayerOutput {
    pub party: Arc<Party>,
    pub party_deleted: bool,
}

/// Kick player use case (admin)
pub struct KickPlayer {
    registry: Arc<PartyRegistry>,
}

impl KickPlayer {
    pub fn new(registry: Arc<PartyRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, input: KickPlayerInput) -> Result<KickPlayerOutput, KickPlayerError> {
        let party = self
            .registry
            .get(input.role_id)
            .ok_or(KickPlayerError::PartyNotFound)?;

        let removed = party
            .remove(input.user_id)
            .map_err(|_| KickPlayerError::PartyNotFound)?;
        if !removed {
            return Err(KickPlayerError::NotInParty(party.role().clone()));
        }

        // An emptied party goes away now rather than on the next tick
        let party_deleted = party.is_empty();
        if party_deleted {
            party.destroy().await;
        } else {
            party.refresh().await;
        }

        Ok(KickPlayerOutput {
            party,
            party_deleted,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KickPlayerError {
    #[error("Party not found")]
    PartyNotFound,
    #[error("Not in the party for {}", .0.name)]
    NotInParty(Role),
}
