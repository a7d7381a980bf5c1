//! InMemory Room Repository 実装

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, RoomManager, RoomName, RoomRepository, Timestamp};

/// インメモリ Room Repository 実装
///
/// RoomManager ドメインモデルを保持し、ドメイン層の RoomRepository trait を実装します（依存性の逆転）。
pub struct InMemoryRoomRepository {
    manager: Arc<Mutex<RoomManager>>,
}

impl InMemoryRoomRepository {
    pub fn new(manager: Arc<Mutex<RoomManager>>) -> Self {
        Self { manager }
    }
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(RoomManager::new())))
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn join(
        &self,
        connection: ConnectionId,
        room: RoomName,
        now: Timestamp,
    ) -> Option<RoomName> {
        let mut manager = self.manager.lock().await;
        manager.join(connection, room, now)
    }

    async fn leave(&self, connection: &ConnectionId) -> Option<RoomName> {
        let mut manager = self.manager.lock().await;
        manager.leave(connection)
    }

    async fn members_of(&self, room: &RoomName) -> Vec<ConnectionId> {
        let manager = self.manager.lock().await;
        manager.members_of(room)
    }

    async fn current_room_of(&self, connection: &ConnectionId) -> Option<RoomName> {
        let manager = self.manager.lock().await;
        manager.current_room_of(connection).cloned()
    }

    async fn room_overview(&self) -> Vec<(RoomName, usize, Timestamp)> {
        let manager = self.manager.lock().await;
        manager
            .rooms()
            .map(|room| (room.name.clone(), room.members.len(), room.created_at))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_join_and_leave() {
        // テスト項目: 参加と退出がメンバー一覧に反映される
        // given (前提条件):
        let repo = InMemoryRoomRepository::default();
        let alice = ConnectionId::generate();
        let bob = ConnectionId::generate();
        repo.join(alice, room("general"), Timestamp::new(1000)).await;
        repo.join(bob, room("general"), Timestamp::new(1001)).await;

        // when (操作):
        let left = repo.leave(&alice).await;

        // then (期待する結果):
        assert_eq!(left, Some(room("general")));
        assert_eq!(repo.members_of(&room("general")).await, vec![bob]);
        assert_eq!(repo.current_room_of(&alice).await, None);
        assert_eq!(repo.current_room_of(&bob).await, Some(room("general")));
    }

    #[tokio::test]
    async fn test_room_overview_lists_empty_rooms() {
        // テスト項目: 空になったルームも一覧に残る
        // given (前提条件):
        let repo = InMemoryRoomRepository::default();
        let alice = ConnectionId::generate();
        repo.join(alice, room("general"), Timestamp::new(1000)).await;
        repo.leave(&alice).await;

        // when (操作):
        let overview = repo.room_overview().await;

        // then (期待する結果):
        assert_eq!(overview, vec![(room("general"), 0, Timestamp::new(1000))]);
    }
}
