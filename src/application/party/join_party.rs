use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::Party;
use crate::domain::repositories::PartyRegistry;
use crate::domain::value_objects::UserId;

/// Join party input (Join button)
pub struct JoinPartyInput {
    pub party_id: Uuid,
    pub user_id: UserId,
}

/// Join party output
pub struct JoinPartyOutput {
    pub party: Arc<Party>,
}

/// Join party use case
pub struct JoinParty {
    registry: Arc<PartyRegistry>,
}

impl JoinParty {
    pub fn new(registry: Arc<PartyRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, input: JoinPartyInput) -> Result<JoinPartyOutput, JoinPartyError> {
        let party = self
            .registry
            .get_by_id(input.party_id)
            .ok_or(JoinPartyError::StaleReference)?;

        if party.contains(input.user_id) {
            return Err(JoinPartyError::AlreadyInParty);
        }

        let added = party
            .add(input.user_id)
            .map_err(|_| JoinPartyError::StaleReference)?;
        if !added {
            return Err(JoinPartyError::PartyFull);
        }

        party.refresh().await;

        Ok(JoinPartyOutput { party })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum JoinPartyError {
    #[error("Party no longer exists")]
    StaleReference,
    #[error("Already in party")]
    AlreadyInParty,
    #[error("Party is full")]
    PartyFull,
}
