//! InMemory Message Repository 実装

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{
    Message, MessageId, MessageRepository, MessageStore, NewMessage, Reaction, ReactionReadLedger,
    ReactionUpdate, ReadUpdate, RepositoryError, RoomName, Timestamp, Username,
};

/// インメモリ Message Repository 実装
///
/// リアクションと既読の更新は ReactionReadLedger 経由で、同じロックの中で行います。
pub struct InMemoryMessageRepository {
    store: Arc<Mutex<MessageStore>>,
}

impl InMemoryMessageRepository {
    pub fn new(store: Arc<Mutex<MessageStore>>) -> Self {
        Self { store }
    }
}

impl Default for InMemoryMessageRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(MessageStore::new())))
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn append(&self, message: NewMessage, now: Timestamp) -> Message {
        let mut store = self.store.lock().await;
        store.append(message, now)
    }

    async fn paginate(&self, room: &RoomName, offset: usize, limit: usize) -> Vec<Message> {
        let store = self.store.lock().await;
        store.paginate(room, offset, limit)
    }

    async fn get(&self, room: &RoomName, message_id: MessageId) -> Option<Message> {
        let store = self.store.lock().await;
        store.get(room, message_id).cloned()
    }

    async fn add_reaction(
        &self,
        room: &RoomName,
        message_id: MessageId,
        reaction: Reaction,
        username: Username,
    ) -> Result<ReactionUpdate, RepositoryError> {
        let mut store = self.store.lock().await;
        ReactionReadLedger::new(&mut store).add_reaction(room, message_id, reaction, username)
    }

    async fn mark_read(
        &self,
        room: &RoomName,
        message_id: MessageId,
        username: Username,
    ) -> Result<ReadUpdate, RepositoryError> {
        let mut store = self.store.lock().await;
        ReactionReadLedger::new(&mut store).mark_read(room, message_id, username)
    }

    async fn log_overview(&self) -> Vec<(RoomName, usize, Option<Timestamp>)> {
        let store = self.store.lock().await;
        store
            .room_names()
            .map(|room| (room.clone(), store.len_of(room), store.first_timestamp_of(room)))
            .collect()
    }
}
