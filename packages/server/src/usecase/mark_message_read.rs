//! UseCase: 既読処理

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessageId, MessagePusher, MessageRepository, Notification, PresenceRepository,
    ReadUpdate, RoomName, RoomRepository, Username, ValueObjectError,
};

use super::{error::CommandError, resolve_actor};

/// 既読のユースケース
pub struct MarkMessageReadUseCase {
    presence: Arc<dyn PresenceRepository>,
    rooms: Arc<dyn RoomRepository>,
    messages: Arc<dyn MessageRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl MarkMessageReadUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRepository>,
        rooms: Arc<dyn RoomRepository>,
        messages: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            presence,
            rooms,
            messages,
            message_pusher,
        }
    }

    /// 既読を記録し、差分をルームに配信する
    ///
    /// 既読者がメッセージの送信者本人の場合は `Ok(None)` を返す
    /// （送信者は自分の既読一覧に入らない）。
    /// 同じ既読の再送は一度だけ記録・配信する。
    pub async fn execute(
        &self,
        connection: ConnectionId,
        room: RoomName,
        message_id: MessageId,
        username: Option<Username>,
    ) -> Result<Option<ReadUpdate>, CommandError> {
        let username = resolve_actor(self.presence.as_ref(), &connection, username)
            .await
            .ok_or(ValueObjectError::Missing("username"))?;

        let message = self.messages.get(&room, message_id).await.ok_or_else(|| {
            CommandError::NotFound(format!("message {} not found in room '{}'", message_id, room))
        })?;
        if message.sender == username {
            tracing::debug!("Ignoring self read receipt for message {}", message_id);
            return Ok(None);
        }

        let update = self.messages.mark_read(&room, message_id, username).await?;
        if update.changed {
            let members = self.rooms.members_of(&room).await;
            let delta = Notification::MessageReadUpdate {
                message_id,
                username: update.username.clone(),
            };
            self.message_pusher.broadcast(members, &delta).await?;
        }
        Ok(Some(update))
    }
}
