use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{Party, RefreshOutcome};
use crate::domain::repositories::PartyRegistry;
use crate::domain::value_objects::UserId;

/// Leave party input (Leave button)
pub struct LeavePartyInput {
    pub party_id: Uuid,
    pub user_id: UserId,
}

/// Leave party output
pub struct LeavePartyOutput {
    pub party: Arc<Party>,
    pub party_deleted: bool,
}

/// Leave party use case
pub struct LeaveParty {
    registry: Arc<PartyRegistry>,
}

impl LeaveParty {
    pub fn new(registry: Arc<PartyRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        input: LeavePartyInput,
    ) -> Result<LeavePartyOutput, LeavePartyError> {
        let party = self
            .registry
            .get_by_id(input.party_id)
            .ok_or(LeavePartyError::StaleReference)?;

        let removed = party
            .remove(input.user_id)
            .map_err(|_| LeavePartyError::StaleReference)?;
        if !removed {
            return Err(LeavePartyError::NotInParty);
        }

        // Refreshing an emptied party destroys it
        let party_deleted = party.refresh().await == RefreshOutcome::Destroyed;

        Ok(LeavePartyOutput {
            party,
            party_deleted,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeavePartyError {
    #[error("Party no longer exists")]
    StaleReference,
    #[error("Not in party")]
    NotInParty,
}
