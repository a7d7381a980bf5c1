//! UseCase: ルームメッセージ送信処理

use std::sync::Arc;

use roomcast_shared::time::Clock;

use crate::domain::{
    ConnectionId, ImagePayload, Message, MessagePusher, MessageRepository, NewMessage,
    Notification, PresenceRepository, RoomName, RoomRepository, Timestamp, Username,
    ValueObjectError,
};

use super::{error::CommandError, resolve_sender};

/// ルームメッセージ送信のユースケース
pub struct SendRoomMessageUseCase {
    presence: Arc<dyn PresenceRepository>,
    rooms: Arc<dyn RoomRepository>,
    messages: Arc<dyn MessageRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    clock: Arc<dyn Clock>,
}

/// 送信者の解決前のルームメッセージ
pub struct RoomMessageRequest {
    pub room: RoomName,
    pub username: Option<Username>,
    pub body: String,
    pub image: Option<ImagePayload>,
    pub ack_id: Option<u64>,
}

impl SendRoomMessageUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRepository>,
        rooms: Arc<dyn RoomRepository>,
        messages: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            presence,
            rooms,
            messages,
            message_pusher,
            clock,
        }
    }

    /// メッセージを保存し、ルームの全メンバーに配信する
    ///
    /// 送信者は接続に登録されたユーザー名、未登録なら自己申告のユーザー名。
    /// `ack_id` があれば、配信後に送信元の接続へ配信確認を送る。
    ///
    /// # Arguments
    ///
    /// * `connection` - 送信元の接続
    /// * `request` - 送信者解決前のルームメッセージ
    ///
    /// # Returns
    ///
    /// * `Ok(Message)` - 保存されたメッセージ（ID とタイムスタンプ付き）
    /// * `Err(CommandError)` - 送信者不明・本文も画像もない・配信失敗
    pub async fn execute(
        &self,
        connection: ConnectionId,
        request: RoomMessageRequest,
    ) -> Result<Message, CommandError> {
        let sender = resolve_sender(self.presence.as_ref(), &connection, request.username)
            .await
            .ok_or(ValueObjectError::Missing("username"))?;
        let new = NewMessage::new(request.room, sender, request.body, request.image)?;

        let now = Timestamp::new(self.clock.now_millis());
        let message = self.messages.append(new, now).await;
        tracing::debug!(
            "Stored message {} from '{}' in room '{}'",
            message.id,
            message.sender,
            message.room
        );

        let members = self.rooms.members_of(&message.room).await;
        self.message_pusher
            .broadcast(members, &Notification::ReceiveRoomMessage(message.clone()))
            .await?;

        if let Some(ack_id) = request.ack_id {
            let ack = Notification::MessageDelivered {
                ack_id,
                message_id: message.id,
            };
            self.message_pusher.push_to(&connection, &ack).await?;
        }

        Ok(message)
    }
}
