//! ルームのメンバー管理
//!
//! 接続の現在のルームは高々一つです。ルームは [`RoomManager::join`] で必要になったときに作成され、
//! 削除されません。空になったルームもプロセスが終わるまで残ります。

use std::collections::{HashMap, HashSet};

use super::value_object::{ConnectionId, RoomName, Timestamp};

/// 名前付きの配信グループ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub name: RoomName,
    pub members: HashSet<ConnectionId>,
    pub created_at: Timestamp,
}

impl Room {
    fn new(name: RoomName, created_at: Timestamp) -> Self {
        Self {
            name,
            members: HashSet::new(),
            created_at,
        }
    }
}

#[derive(Debug, Default)]
pub struct RoomManager {
    rooms: HashMap<RoomName, Room>,
    current_room: HashMap<ConnectionId, RoomName>,
}

impl RoomManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// `connection` を `room_name` に追加し（なければ作成）、現在のルームにする
    ///
    /// 前のルームからは退出しない。前のルームを返すので、呼び出し側がポリシーを適用する。
    pub fn join(
        &mut self,
        connection: ConnectionId,
        room_name: RoomName,
        now: Timestamp,
    ) -> Option<RoomName> {
        self.rooms
            .entry(room_name.clone())
            .or_insert_with(|| Room::new(room_name.clone(), now))
            .members
            .insert(connection);
        self.current_room.insert(connection, room_name)
    }

    /// `connection` を現在のルームから外し、現在のルームをクリアする
    ///
    /// 退出したルームを返す。現在のルームがなければ何もしない。
    pub fn leave(&mut self, connection: &ConnectionId) -> Option<RoomName> {
        let room_name = self.current_room.remove(connection)?;
        if let Some(room) = self.rooms.get_mut(&room_name) {
            room.members.remove(connection);
        }
        Some(room_name)
    }

    /// ルームのメンバーのスナップショット（未知のルームは空）
    pub fn members_of(&self, room_name: &RoomName) -> Vec<ConnectionId> {
        self.rooms
            .get(room_name)
            .map(|room| room.members.iter().copied().collect())
            .unwrap_or_default()
    }

    pub fn current_room_of(&self, connection: &ConnectionId) -> Option<&RoomName> {
        self.current_room.get(connection)
    }

    pub fn room(&self, room_name: &RoomName) -> Option<&Room> {
        self.rooms.get(room_name)
    }

    pub fn rooms(&self) -> impl Iterator<Item = &Room> {
        self.rooms.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str) -> RoomName {
        RoomName::new(name.to_string()).unwrap()
    }

    #[test]
    fn test_join_creates_room_lazily() {
        // テスト項目: 初回参加でルームが作成される
        // given (前提条件):
        let mut manager = RoomManager::new();
        let connection = ConnectionId::generate();

        // when (操作):
        let previous = manager.join(connection, room("general"), Timestamp::new(1000));

        // then (期待する結果):
        assert_eq!(previous, None);
        assert_eq!(manager.members_of(&room("general")), vec![connection]);
        assert_eq!(manager.current_room_of(&connection), Some(&room("general")));
        assert_eq!(
            manager.room(&room("general")).map(|r| r.created_at),
            Some(Timestamp::new(1000))
        );
    }

    #[test]
    fn test_join_returns_previous_room_without_leaving_it() {
        // テスト項目: 別ルームへの参加は前のルームを返すが、退出は呼び出し側に任せる
        // given (前提条件):
        let mut manager = RoomManager::new();
        let connection = ConnectionId::generate();
        manager.join(connection, room("general"), Timestamp::new(1000));

        // when (操作):
        let previous = manager.join(connection, room("random"), Timestamp::new(2000));

        // then (期待する結果):
        assert_eq!(previous, Some(room("general")));
        assert_eq!(manager.current_room_of(&connection), Some(&room("random")));
        assert_eq!(manager.members_of(&room("general")), vec![connection]);
    }

    #[test]
    fn test_rejoin_keeps_creation_time() {
        // テスト項目: 既存ルームへの参加で作成時刻は変わらない
        // given (前提条件):
        let mut manager = RoomManager::new();
        manager.join(ConnectionId::generate(), room("general"), Timestamp::new(1000));

        // when (操作):
        manager.join(ConnectionId::generate(), room("general"), Timestamp::new(5000));

        // then (期待する結果):
        assert_eq!(
            manager.room(&room("general")).map(|r| r.created_at),
            Some(Timestamp::new(1000))
        );
        assert_eq!(manager.members_of(&room("general")).len(), 2);
    }

    #[test]
    fn test_leave_removes_membership_and_keeps_room() {
        // テスト項目: 退出でメンバーから外れるが、空のルームは残る
        // given (前提条件):
        let mut manager = RoomManager::new();
        let connection = ConnectionId::generate();
        manager.join(connection, room("general"), Timestamp::new(1000));

        // when (操作):
        let left = manager.leave(&connection);

        // then (期待する結果):
        assert_eq!(left, Some(room("general")));
        assert!(manager.members_of(&room("general")).is_empty());
        assert_eq!(manager.current_room_of(&connection), None);
        assert!(manager.room(&room("general")).is_some());
    }

    #[test]
    fn test_leave_without_room_is_noop() {
        // テスト項目: ルーム未参加の接続の退出は何もしない
        // given (前提条件):
        let mut manager = RoomManager::new();

        // when (操作):
        let left = manager.leave(&ConnectionId::generate());

        // then (期待する結果):
        assert_eq!(left, None);
    }

    #[test]
    fn test_members_of_unknown_room_is_empty() {
        // テスト項目: 存在しないルームのメンバーは空で、ルームは作成されない
        // given (前提条件):
        let manager = RoomManager::new();

        // when (操作):
        let members = manager.members_of(&room("nowhere"));

        // then (期待する結果):
        assert!(members.is_empty());
        assert!(manager.room(&room("nowhere")).is_none());
    }
}
