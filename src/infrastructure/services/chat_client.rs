//! Chat platform client
//!
//! Abstraction over the chat platform's message API (supports Discord and a mock for tests)

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::value_objects::{ChannelId, MessageId, StatusMessage};

/// Chat platform error
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Platform API error ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Chat client trait
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Post a party status message to a channel
    async fn send_status(
        &self,
        channel: ChannelId,
        message: &StatusMessage,
    ) -> Result<MessageId, ChatError>;

    /// Delete a previously posted message
    async fn delete_message(&self, channel: ChannelId, message: MessageId)
        -> Result<(), ChatError>;
}

/// Message posted through [`MockChatClient`]
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub id: MessageId,
    pub channel: ChannelId,
    pub message: StatusMessage,
}

/// Mock chat client for testing
///
/// Records every post and delete, and can be told to fail either call.
#[derive(Default)]
pub struct MockChatClient {
    next_id: AtomicU64,
    sent: Mutex<Vec<SentMessage>>,
    deleted: Mutex<Vec<MessageId>>,
    fail_sends: AtomicBool,
    fail_deletes: AtomicBool,
}

impl MockChatClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_fail_sends(&self, fail: bool) {
        self.fail_sends.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_deletes(&self, fail: bool) {
        self.fail_deletes.store(fail, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().len()
    }

    pub fn last_sent(&self) -> Option<SentMessage> {
        self.sent.lock().last().cloned()
    }

    pub fn deleted(&self) -> Vec<MessageId> {
        self.deleted.lock().clone()
    }

    /// Messages posted and not deleted since
    pub fn visible(&self) -> Vec<SentMessage> {
        let deleted = self.deleted.lock();
        self.sent
            .lock()
            .iter()
            .filter(|m| !deleted.contains(&m.id))
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ChatClient for MockChatClient {
    async fn send_status(
        &self,
        channel: ChannelId,
        message: &StatusMessage,
    ) -> Result<MessageId, ChatError> {
        // Yield so concurrent callers can interleave the way real network calls do
        tokio::task::yield_now().await;

        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(ChatError::Api {
                status: 503,
                message: "send failed".into(),
            });
        }

        let id = MessageId(self.next_id.fetch_add(1, Ordering::SeqCst) + 1);
        self.sent.lock().push(SentMessage {
            id,
            channel,
            message: message.clone(),
        });
        Ok(id)
    }

    async fn delete_message(
        &self,
        _channel: ChannelId,
        message: MessageId,
    ) -> Result<(), ChatError> {
        tokio::task::yield_now().await;

        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(ChatError::Api {
                status: 404,
                message: "Unknown Message".into(),
            });
        }

        self.deleted.lock().push(message);
        Ok(())
    }
}
