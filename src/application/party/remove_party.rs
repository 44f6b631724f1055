use std::sync::Arc;

use crate::domain::repositories::PartyRegistry;
use crate::domain::value_objects::{Role, RoleId};

/// Remove party input
pub struct RemovePartyInput {
    pub role_id: RoleId,
}

/// Remove party output
pub struct RemovePartyOutput {
    pub role: Role,
}

/// Remove party use case (admin)
pub struct RemoveParty {
    registry: Arc<PartyRegistry>,
}

impl RemoveParty {
    pub fn new(registry: Arc<PartyRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        input: RemovePartyInput,
    ) -> Result<RemovePartyOutput, RemovePartyError> {
        let party = self
            .registry
            .get(input.role_id)
            .ok_or(RemovePartyError::PartyNotFound)?;

        party.destroy().await;

        Ok(RemovePartyOutput {
            role: party.role().clone(),
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RemovePartyError {
    #[error("Party not found")]
    PartyNotFound,
}
