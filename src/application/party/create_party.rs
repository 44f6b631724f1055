use std::sync::Arc;

use crate::domain::entities::Party;
use crate::domain::repositories::{PartyRegistry, RegistryError};
use crate::domain::value_objects::{ChannelId, Role, UserId};

/// Create party input
pub struct CreatePartyInput {
    pub channel_id: ChannelId,
    pub creator_id: UserId,
    pub role: Role,
    pub size: usize,
}

/// Create party output
pub struct CreatePartyOutput {
    pub party: Arc<Party>,
}

/// Create party use case
pub struct CreateParty {
    registry: Arc<PartyRegistry>,
}

impl CreateParty {
    pub fn new(registry: Arc<PartyRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(
        &self,
        input: CreatePartyInput,
    ) -> Result<CreatePartyOutput, CreatePartyError> {
        let role = input.role.clone();

        let party = self
            .registry
            .create(input.channel_id, input.creator_id, input.role, input.size)
            .map_err(|e| match e {
                RegistryError::AlreadyExists(_) => CreatePartyError::AlreadyExists(role),
                RegistryError::InvalidSize => {
                    CreatePartyError::Validation("Party size must be at least 1".into())
                }
            })?;

        Ok(CreatePartyOutput { party })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CreatePartyError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("Party already exists for {}", .0.name)]
    AlreadyExists(Role),
}
