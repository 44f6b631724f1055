use std::sync::Arc;

use tracing::info;

use crate::domain::repositories::PartyRegistry;
use crate::domain::value_objects::{PresenceStatus, Role, UserId};

/// Presence update input
pub struct HandlePresenceInput {
    pub user_id: UserId,
    pub status: PresenceStatus,
}

/// Presence update output
pub struct HandlePresenceOutput {
    /// Roles of the parties the user was removed from
    pub left: Vec<Role>,
}

/// Remove members who go offline from every party
pub struct HandlePresence {
    registry: Arc<PartyRegistry>,
}

impl HandlePresence {
    pub fn new(registry: Arc<PartyRegistry>) -> Self {
        Self { registry }
    }

    pub async fn execute(&self, input: HandlePresenceInput) -> HandlePresenceOutput {
        let mut left = Vec::new();

        if !input.status.is_offline() {
            return HandlePresenceOutput { left };
        }

        for party in self.registry.list() {
            // Not a member, or destroyed since list()
            let Ok(true) = party.remove(input.user_id) else {
                continue;
            };
            party.refresh().await;
            left.push(party.role().clone());
        }

        if !left.is_empty() {
            info!(user = %input.user_id, parties = left.len(), "Offline member removed from parties");
        }

        HandlePresenceOutput { left }
    }
}
