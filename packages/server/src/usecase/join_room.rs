//! UseCase: ルーム参加処理
//!
//! 接続が同時に参加できるルームは一つです。別のルームに参加すると前のルームから退出し、
//! 残りのメンバーに通知します。

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, PresenceRepository, RoomName, RoomRepository,
    Timestamp,
};

use super::{display_name, error::CommandError, fan_out};

/// ルーム参加のユースケース
pub struct JoinRoomUseCase {
    presence: Arc<dyn PresenceRepository>,
    rooms: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

impl JoinRoomUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRepository>,
        rooms: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            presence,
            rooms,
            message_pusher,
            clock,
        }
    }

    /// ルーム参加を実行
    ///
    /// 前のルームからの退出と新しいルームへの参加を先に済ませ、その後に通知を配信する。
    /// 通知は参加者本人を含む新しいルームの全メンバーに届く。
    ///
    /// # Arguments
    ///
    /// * `connection` - 参加する接続
    /// * `room` - 参加先のルーム名
    ///
    /// # Returns
    ///
    /// * `Ok(Some(RoomName))` - ルームを移動した場合、退出したルーム
    /// * `Ok(None)` - 移動なし（初参加または同じルームへの再参加）
    pub async fn execute(
        &self,
        connection: ConnectionId,
        room: RoomName,
    ) -> Result<Option<RoomName>, CommandError> {
        let name = display_name(self.presence.as_ref(), &connection).await;

        // 1. 状態の更新
        let previous = match self.rooms.current_room_of(&connection).await {
            Some(current) if current != room => {
                self.rooms.leave(&connection).await;
                Some(current)
            }
            _ => None,
        };
        let now = Timestamp::new(self.clock.now_millis());
        self.rooms.join(connection, room.clone(), now).await;

        // 2. 通知の配信
        if let Some(previous) = &previous {
            let remaining = self.rooms.members_of(previous).await;
            fan_out(self.message_pusher.as_ref(), remaining, &Notification::left(&name)).await;
            tracing::info!("'{}' left room '{}'", name, previous);
        }
        let members = self.rooms.members_of(&room).await;
        fan_out(self.message_pusher.as_ref(), members, &Notification::joined(&name)).await;
        tracing::info!("'{}' joined room '{}'", name, room);

        Ok(previous)
    }
}
