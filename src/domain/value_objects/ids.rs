use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! snowflake {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

snowflake!(
    /// Platform role identifier, the unique key of a party
    RoleId
);
snowflake!(
    /// Platform text channel identifier
    ChannelId
);
snowflake!(
    /// Platform user identifier
    UserId
);
snowflake!(
    /// Handle of a posted message
    MessageId
);

impl RoleId {
    /// Mention markup rendered by the platform as a role ping
    pub fn mention(&self) -> String {
        format!("<@&{}>", self.0)
    }
}

impl UserId {
    /// Mention markup rendered by the platform as a user ping
    pub fn mention(&self) -> String {
        format!("<@{}>", self.0)
    }
}

/// Role reference captured at party creation.
///
/// Equality only considers the id; the name is a display label.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

impl Role {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id: RoleId(id),
            name: name.into(),
        }
    }

    pub fn mention(&self) -> String {
        self.id.mention()
    }
}

impl PartialEq for Role {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Role {}
