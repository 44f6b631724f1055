use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Role, UserId};

/// Blurple accent used by the platform for informational embeds
pub const EMBED_COLOUR: u32 = 0x5865F2;

/// Interactive action attached to a party status message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyAction {
    Join,
    Leave,
}

impl PartyAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            PartyAction::Join => "join",
            PartyAction::Leave => "leave",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "join" => Some(PartyAction::Join),
            "leave" => Some(PartyAction::Leave),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PartyAction::Join => "Join",
            PartyAction::Leave => "Leave",
        }
    }

    pub fn style(&self) -> ButtonStyle {
        match self {
            PartyAction::Join => ButtonStyle::Success,
            PartyAction::Leave => ButtonStyle::Danger,
        }
    }

    /// Component id carried by the button, addressing one specific party
    pub fn custom_id(&self, party_id: Uuid) -> String {
        format!("party:{}:{}", self.as_str(), party_id)
    }

    /// Parse a component id produced by [`PartyAction::custom_id`]
    pub fn parse_custom_id(custom_id: &str) -> Option<(Self, Uuid)> {
        let mut parts = custom_id.splitn(3, ':');
        if parts.next()? != "party" {
            return None;
        }
        let action = Self::from_str(parts.next()?)?;
        let party_id = Uuid::parse_str(parts.next()?).ok()?;
        Some((action, party_id))
    }
}

/// Button colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ButtonStyle {
    Success,
    Danger,
}

impl ButtonStyle {
    /// Numeric style understood by the platform API
    pub fn code(&self) -> u8 {
        match self {
            ButtonStyle::Success => 3,
            ButtonStyle::Danger => 4,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Button {
    pub label: String,
    pub style: ButtonStyle,
    pub custom_id: String,
}

/// Rendered party status: an embed plus the Join/Leave buttons
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusMessage {
    pub title: String,
    pub colour: u32,
    pub fields: Vec<EmbedField>,
    pub buttons: Vec<Button>,
}

impl StatusMessage {
    pub fn render(party_id: Uuid, role: &Role, size: usize, players: &[UserId]) -> Self {
        let members = players
            .iter()
            .map(UserId::mention)
            .collect::<Vec<_>>()
            .join("\n");

        let fields = vec![
            EmbedField {
                name: "Role".into(),
                value: role.mention(),
                inline: true,
            },
            EmbedField {
                name: "Size".into(),
                value: format!("{}/{}", players.len(), size),
                inline: true,
            },
            EmbedField {
                name: "Players".into(),
                value: members,
                inline: false,
            },
        ];

        let buttons = [PartyAction::Join, PartyAction::Leave]
            .into_iter()
            .map(|action| Button {
                label: action.label().into(),
                style: action.style(),
                custom_id: action.custom_id(party_id),
            })
            .collect();

        Self {
            title: format!("Party for {}", role.name),
            colour: EMBED_COLOUR,
            fields,
            buttons,
        }
    }
}
