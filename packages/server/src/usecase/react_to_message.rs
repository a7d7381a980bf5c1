//! UseCase: リアクション処理

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessageId, MessagePusher, MessageRepository, Notification, PresenceRepository,
    Reaction, ReactionUpdate, RoomName, RoomRepository, Username, ValueObjectError,
};

use super::{error::CommandError, resolve_actor};

/// リアクションのユースケース
pub struct ReactToMessageUseCase {
    presence: Arc<dyn PresenceRepository>,
    rooms: Arc<dyn RoomRepository>,
    messages: Arc<dyn MessageRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl ReactToMessageUseCase {
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

    /// リアクションを記録し、差分をルームに配信する
    ///
    /// 同じ (リアクション, ユーザー) の組の再送は何も変えず、再配信もしない。
    pub async fn execute(
        &self,
        connection: ConnectionId,
        room: RoomName,
        message_id: MessageId,
        reaction: Reaction,
        username: Option<Username>,
    ) -> Result<ReactionUpdate, CommandError> {
        let username = resolve_actor(self.presence.as_ref(), &connection, username)
            .await
            .ok_or(ValueObjectError::Missing("username"))?;

        let update = self
            .messages
            .add_reaction(&room, message_id, reaction, username)
            .await?;
        if !update.changed {
            tracing::debug!(
                "'{}' already reacted {} to message {}",
                update.username,
                update.reaction.as_str(),
                message_id
            );
            return Ok(update);
        }

        let members = self.rooms.members_of(&room).await;
        let delta = Notification::MessageReaction {
            message_id,
            reaction: update.reaction.clone(),
            username: update.username.clone(),
        };
        self.message_pusher.broadcast(members, &delta).await?;
        Ok(update)
    }
}
