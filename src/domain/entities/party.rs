use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use serde::Serialize;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::domain::repositories::PartyRegistry;
use crate::domain::services::party_timer;
use crate::domain::value_objects::{
    ChannelId, MessageId, PartySettings, Role, StatusMessage, UserId,
};
use crate::infrastructure::services::ChatClient;

/// Party state, derived from membership and capacity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PartyState {
    Forming,
    Full,
    Empty,
}

/// What a run of the refresh protocol did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// A new status message was posted
    Posted(MessageId),
    /// The party is full; nothing was posted
    Silent,
    /// Nothing changed since the last post; the existing message was kept
    Unchanged,
    /// The party was empty and has been destroyed
    Destroyed,
    /// Posting failed; the next tick retries
    Failed,
    /// The party was already destroyed
    Skipped,
}

#[derive(Debug, thiserror::Error)]
pub enum PartyError {
    #[error("Party no longer exists")]
    StaleReference,
    #[error("Cannot set size to {requested} with {members} players in the party")]
    InvalidSize { requested: usize, members: usize },
}

/// Point-in-time view of a party
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PartySnapshot {
    pub id: Uuid,
    pub role: Role,
    pub channel: ChannelId,
    pub creator: UserId,
    pub size: usize,
    pub players: Vec<UserId>,
    pub state: PartyState,
    pub created_at: i64,
}

struct Membership {
    size: usize,
    /// Join order, creator first
    players: Vec<UserId>,
    /// Bumped on every mutation
    revision: u64,
}

impl Membership {
    fn state(&self) -> PartyState {
        if self.players.is_empty() {
            PartyState::Empty
        } else if self.players.len() >= self.size {
            PartyState::Full
        } else {
            PartyState::Forming
        }
    }
}

/// Status message currently posted for the party.
///
/// Its mutex also serializes runs of the refresh protocol.
#[derive(Default)]
struct PostedStatus {
    message: Option<MessageId>,
    revision: Option<u64>,
}

/// Party entity: a capacity-bounded group bound to one role and one channel
pub struct Party {
    id: Uuid,
    role: Role,
    channel: ChannelId,
    creator: UserId,
    created_at: i64,
    settings: PartySettings,
    members: Mutex<Membership>,
    posted: tokio::sync::Mutex<PostedStatus>,
    destroyed: AtomicBool,
    timer: CancellationToken,
    registry: Weak<PartyRegistry>,
    chat: Arc<dyn ChatClient>,
}

impl Party {
    /// Build a party with its creator as the only member.
    ///
    /// The refresh timer is not running until [`Party::start`] is called.
    pub(crate) fn new(
        channel: ChannelId,
        creator: UserId,
        role: Role,
        size: usize,
        settings: PartySettings,
        registry: Weak<PartyRegistry>,
        chat: Arc<dyn ChatClient>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            channel,
            creator,
            created_at: chrono::Utc::now().timestamp(),
            settings,
            members: Mutex::new(Membership {
                size,
                players: vec![creator],
                revision: 0,
            }),
            posted: tokio::sync::Mutex::new(PostedStatus::default()),
            destroyed: AtomicBool::new(false),
            timer: CancellationToken::new(),
            registry,
            chat,
        }
    }

    /// Start the periodic refresh/expiry timer. Its first tick runs immediately.
    pub(crate) fn start(self: &Arc<Self>) {
        party_timer::spawn(
            Arc::downgrade(self),
            self.settings.refresh_interval,
            self.timer.clone(),
        );
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn role(&self) -> &Role {
        &self.role
    }

    pub fn size(&self) -> usize {
        self.members.lock().size
    }

    pub fn players(&self) -> Vec<UserId> {
        self.members.lock().players.clone()
    }

    pub fn player_count(&self) -> usize {
        self.members.lock().players.len()
    }

    pub fn contains(&self, player: UserId) -> bool {
        self.members.lock().players.contains(&player)
    }

    pub fn state(&self) -> PartyState {
        self.members.lock().state()
    }

    pub fn is_full(&self) -> bool {
        self.state() == PartyState::Full
    }

    pub fn is_empty(&self) -> bool {
        self.state() == PartyState::Empty
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed.load(Ordering::SeqCst)
    }

    pub fn snapshot(&self) -> PartySnapshot {
        let members = self.members.lock();
        PartySnapshot {
            id: self.id,
            role: self.role.clone(),
            channel: self.channel,
            creator: self.creator,
            size: members.size,
            players: members.players.clone(),
            state: members.state(),
            created_at: self.created_at,
        }
    }

    /// Add a player. Returns `false` when the party is full or the player is already in it.
    pub fn add(&self, player: UserId) -> Result<bool, PartyError> {
        self.ensure_live()?;

        let mut members = self.members.lock();
        if members.state() == PartyState::Full || members.players.contains(&player) {
            return Ok(false);
        }
        members.players.push(player);
        members.revision += 1;

        debug!(party = %self.id, %player, "Player added ({}/{})", members.players.len(), members.size);
        Ok(true)
    }

    /// Remove a player. Returns `false` when the player was not in the party.
    pub fn remove(&self, player: UserId) -> Result<bool, PartyError> {
        self.ensure_live()?;

        let mut members = self.members.lock();
        let Some(index) = members.players.iter().position(|p| *p == player) else {
            return Ok(false);
        };
        members.players.remove(index);
        members.revision += 1;

        debug!(party = %self.id, %player, "Player removed ({}/{})", members.players.len(), members.size);
        Ok(true)
    }

    /// Change capacity; must stay positive and at least the current member count
    pub fn set_size(&self, size: usize) -> Result<(), PartyError> {
        self.ensure_live()?;

        let mut members = self.members.lock();
        if size == 0 || size < members.players.len() {
            return Err(PartyError::InvalidSize {
                requested: size,
                members: members.players.len(),
            });
        }
        if members.size != size {
            members.size = size;
            members.revision += 1;
        }
        Ok(())
    }

    /// Run the refresh protocol now, reposting the status message
    pub async fn refresh(&self) -> RefreshOutcome {
        self.run_protocol(true).await
    }

    /// Periodic run of the protocol; may keep an up to date message in place
    pub(crate) async fn tick(&self) -> RefreshOutcome {
        let repost = self.settings.repost_unchanged;
        self.run_protocol(repost).await
    }

    /// Cancel the timer, deregister, and delete the posted status message.
    ///
    /// Safe to call any number of times.
    pub async fn destroy(&self) {
        if !self.teardown() {
            return;
        }

        // Waits for an in-flight refresh to finish
        let mut posted = self.posted.lock().await;
        if let Some(message) = posted.message.take() {
            self.delete_message(message).await;
        }
        posted.revision = None;
    }

    fn ensure_live(&self) -> Result<(), PartyError> {
        if self.is_destroyed() {
            Err(PartyError::StaleReference)
        } else {
            Ok(())
        }
    }

    /// Synchronous part of destruction. Returns `false` if already destroyed.
    fn teardown(&self) -> bool {
        if self.destroyed.swap(true, Ordering::SeqCst) {
            return false;
        }

        self.timer.cancel();
        if let Some(registry) = self.registry.upgrade() {
            registry.remove(self);
        }

        info!(party = %self.id, role = %self.role.id, "Party for {} destroyed", self.role.name);
        true
    }

    async fn run_protocol(&self, repost: bool) -> RefreshOutcome {
        let mut posted = self.posted.lock().await;

        if self.is_destroyed() {
            return RefreshOutcome::Skipped;
        }

        if !repost && posted.message.is_some() {
            let revision = self.members.lock().revision;
            if posted.revision == Some(revision) {
                debug!(party = %self.id, "Party unchanged, keeping status message");
                return RefreshOutcome::Unchanged;
            }
        }

        if let Some(message) = posted.message.take() {
            self.delete_message(message).await;
        }
        posted.revision = None;

        // Membership may have moved while the delete was in flight
        let (state, size, players, revision) = {
            let members = self.members.lock();
            (
                members.state(),
                members.size,
                members.players.clone(),
                members.revision,
            )
        };

        match state {
            PartyState::Empty => {
                self.teardown();
                RefreshOutcome::Destroyed
            }
            PartyState::Full => {
                debug!(party = %self.id, "Party full, status message withdrawn");
                RefreshOutcome::Silent
            }
            PartyState::Forming if self.is_destroyed() => RefreshOutcome::Skipped,
            PartyState::Forming => {
                let status = StatusMessage::render(self.id, &self.role, size, &players);
                match self.chat.send_status(self.channel, &status).await {
                    Ok(message) => {
                        if self.is_destroyed() {
                            self.delete_message(message).await;
                            return RefreshOutcome::Skipped;
                        }
                        posted.message = Some(message);
                        posted.revision = Some(revision);
                        debug!(party = %self.id, %message, "Posted party status");
                        RefreshOutcome::Posted(message)
                    }
                    Err(e) => {
                        warn!(party = %self.id, channel = %self.channel, error = %e, "Failed to post party status");
                        RefreshOutcome::Failed
                    }
                }
            }
        }
    }

    async fn delete_message(&self, message: MessageId) {
        if let Err(e) = self.chat.delete_message(self.channel, message).await {
            warn!(party = %self.id, %message, error = %e, "Failed to delete party status message");
        }
    }
}

impl std::fmt::Debug for Party {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Party")
            .field("id", &self.id)
            .field("role", &self.role)
            .field("channel", &self.channel)
            .field("destroyed", &self.is_destroyed())
            .finish_non_exhaustive()
    }
}
