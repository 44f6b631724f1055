use serde::{Deserialize, Serialize};

/// Member presence as reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PresenceStatus {
    Online,
    Idle,
    Dnd,
    Invisible,
    Offline,
}

impl PresenceStatus {
    /// Whether the member appears offline to others
    pub fn is_offline(&self) -> bool {
        matches!(self, PresenceStatus::Offline | PresenceStatus::Invisible)
    }
}
