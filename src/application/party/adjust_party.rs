use std::sync::Arc;

use crate::domain::entities::{Party, PartyError};
use crate::domain::repositories::PartyRegistry;
use crate::domain::value_objects::RoleId;

/// Adjust party input
pub struct AdjustPartyInput {
    pub role_id: RoleId,
    pub size: usize,
}

/// Adjust party output
pub struct AdjustPartyOutput {
    pub party: Arc<Party>,
}

/// Adjust party size use case
pub struct AdjustParty {
    registry: Arc<PartyRegistry>,
}

impl AdjustParty {
    pub fn new(registry: Arc<PartyRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        input: AdjustPartyInput,
    ) -> Result<AdjustPartyOutput, AdjustPartyError> {
        let party = self
            .registry
            .get(input.role_id)
            .ok_or(AdjustPartyError::PartyNotFound)?;

        party.set_size(input.size).map_err(|e| match e {
            PartyError::StaleReference => AdjustPartyError::PartyNotFound,
            PartyError::InvalidSize { requested, members } => {
                AdjustPartyError::InvalidSize { requested, members }
            }
        })?;

        party.refresh().await;

        Ok(AdjustPartyOutput { party })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AdjustPartyError {
    #[error("Party not found")]
    PartyNotFound,
    #[error("Cannot adjust party size to {requested} as there are already {members} players in the party.")]
    InvalidSize { requested: usize, members: usize },
}
