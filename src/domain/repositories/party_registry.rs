use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::domain::entities::Party;
use crate::domain::value_objects::{ChannelId, PartySettings, Role, RoleId, UserId};
use crate::infrastructure::services::ChatClient;

/// Error type for registry operations
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Party already exists for role {0}")]
    AlreadyExists(RoleId),
    #[error("Party size must be at least 1")]
    InvalidSize,
}

/// In-memory registry of live parties, at most one per role
pub struct PartyRegistry {
    parties: RwLock<HashMap<RoleId, Arc<Party>>>,
    settings: PartySettings,
    chat: Arc<dyn ChatClient>,
}

impl PartyRegistry {
    pub fn new(chat: Arc<dyn ChatClient>, settings: PartySettings) -> Arc<Self> {
        Arc::new(Self {
            parties: RwLock::new(HashMap::new()),
            settings,
            chat,
        })
    }

    /// Live party bound to `role`
    pub fn get(&self, role: RoleId) -> Option<Arc<Party>> {
        self.parties.read().get(&role).cloned()
    }

    /// Live party with the given id
    pub fn get_by_id(&self, id: Uuid) -> Option<Arc<Party>> {
        self.parties
            .read()
            .values()
            .find(|party| party.id() == id)
            .cloned()
    }

    /// Create and register a party, then start its timer.
    ///
    /// Must be called from within a tokio runtime.
    pub fn create(
        self: &Arc<Self>,
        channel: ChannelId,
        creator: UserId,
        role: Role,
        size: usize,
    ) -> Result<Arc<Party>, RegistryError> {
        if size == 0 {
            return Err(RegistryError::InvalidSize);
        }

        let party = {
            let mut parties = self.parties.write();
            if parties.contains_key(&role.id) {
                return Err(RegistryError::AlreadyExists(role.id));
            }

            let party = Arc::new(Party::new(
                channel,
                creator,
                role,
                size,
                self.settings.clone(),
                Arc::downgrade(self),
                self.chat.clone(),
            ));
            parties.insert(party.role().id, party.clone());
            party
        };

        party.start();

        info!(
            party = %party.id(),
            role = %party.role().id,
            %creator,
            "Party created for {} with size {}",
            party.role().name,
            size
        );
        Ok(party)
    }

    /// Deregister `party`. Returns `false` if it was not registered.
    pub fn remove(&self, party: &Party) -> bool {
        let mut parties = self.parties.write();
        match parties.get(&party.role().id) {
            Some(current) if current.id() == party.id() => {
                parties.remove(&party.role().id);
                true
            }
            _ => false,
        }
    }

    /// Snapshot of all live parties
    pub fn list(&self) -> Vec<Arc<Party>> {
        self.parties.read().values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.parties.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.parties.read().is_empty()
    }

    /// Destroy every live party
    pub async fn shutdown(&self) {
        for party in self.list() {
            party.destroy().await;
        }
    }
}
