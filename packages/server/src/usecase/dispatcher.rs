//! UseCase: コマンドの振り分け
//!
//! 各コマンドは通知の配信まで含めて完了してから次のコマンドが始まります。
//! これによりコマンドは互いにアトミックになり、ルームへの配信順序も一つに定まります。

use std::sync::Arc;

use roomcast_shared::time::Clock;
use tokio::sync::Mutex;

use crate::domain::{
    Command, ConnectionId, MessagePusher, MessageRepository, PresenceRepository, PusherChannel,
    RoomRepository,
};

use super::{
    ConnectUseCase, DisconnectUseCase, JoinRoomUseCase, JoinUseCase, LoadMessagesUseCase,
    MarkMessageReadUseCase, PageSizes, ReactToMessageUseCase, SendPrivateMessageUseCase,
    RoomMessageRequest, SendRoomMessageUseCase, error::CommandError,
};

/// コーディネーターが使う 3 つのストア
#[derive(Clone)]
pub struct Repositories {
    pub presence: Arc<dyn PresenceRepository>,
    pub rooms: Arc<dyn RoomRepository>,
    pub messages: Arc<dyn MessageRepository>,
}

/// コマンドを対応するユースケースへ一つずつ振り分ける
pub struct EventDispatcher {
    gate: Mutex<()>,
    connect: ConnectUseCase,
    disconnect: DisconnectUseCase,
    join: JoinUseCase,
    join_room: JoinRoomUseCase,
    send_room_message: SendRoomMessageUseCase,
    react_to_message: ReactToMessageUseCase,
    mark_message_read: MarkMessageReadUseCase,
    send_private_message: SendPrivateMessageUseCase,
    load_messages: LoadMessagesUseCase,
}

impl EventDispatcher {
    pub fn new(
        repositories: Repositories,
        message_pusher: Arc<dyn MessagePusher>,
        clock: Arc<dyn Clock>,
        page_sizes: PageSizes,
    ) -> Self {
        let Repositories {
            presence,
            rooms,
            messages,
        } = repositories;

        Self {
            gate: Mutex::new(()),
            connect: ConnectUseCase::new(message_pusher.clone()),
            disconnect: DisconnectUseCase::new(
                presence.clone(),
                rooms.clone(),
                message_pusher.clone(),
            ),
            join: JoinUseCase::new(presence.clone(), message_pusher.clone()),
            join_room: JoinRoomUseCase::new(
                presence.clone(),
                rooms.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            send_room_message: SendRoomMessageUseCase::new(
                presence.clone(),
                rooms.clone(),
                messages.clone(),
                message_pusher.clone(),
                clock.clone(),
            ),
            react_to_message: ReactToMessageUseCase::new(
                presence.clone(),
                rooms.clone(),
                messages.clone(),
                message_pusher.clone(),
            ),
            mark_message_read: MarkMessageReadUseCase::new(
                presence.clone(),
                rooms,
                messages.clone(),
                message_pusher.clone(),
            ),
            send_private_message: SendPrivateMessageUseCase::new(
                presence,
                message_pusher.clone(),
                clock,
            ),
            load_messages: LoadMessagesUseCase::new(messages, message_pusher, page_sizes),
        }
    }

    /// 接続を通知の配信対象に加える
    pub async fn connect(&self, connection: ConnectionId, sender: PusherChannel) {
        let _guard = self.gate.lock().await;
        self.connect.execute(connection, sender).await;
    }

    pub async fn dispatch(
        &self,
        connection: ConnectionId,
        command: Command,
    ) -> Result<(), CommandError> {
        let _guard = self.gate.lock().await;
        tracing::debug!("Dispatching '{}' from {}", command.name(), connection);

        match command {
            Command::Join { username } => {
                self.join.execute(connection, username).await?;
            }
            Command::JoinRoom { room } => {
                self.join_room.execute(connection, room).await?;
            }
            Command::SendRoomMessage {
                room,
                username,
                body,
                image,
                ack_id,
            } => {
                let request = RoomMessageRequest {
                    room,
                    username,
                    body,
                    image,
                    ack_id,
                };
                self.send_room_message.execute(connection, request).await?;
            }
            Command::ReactToMessage {
                room,
                message_id,
                reaction,
                username,
            } => {
                self.react_to_message
                    .execute(connection, room, message_id, reaction, username)
                    .await?;
            }
            Command::MessageRead {
                room,
                message_id,
                username,
            } => {
                self.mark_message_read
                    .execute(connection, room, message_id, username)
                    .await?;
            }
            Command::SendPrivateMessage { from, to, message } => {
                self.send_private_message
                    .execute(connection, from, to, message)
                    .await?;
            }
            Command::LoadMessages {
                room,
                offset,
                limit,
            } => {
                self.load_messages
                    .execute(connection, room, offset, limit)
                    .await?;
            }
        }
        Ok(())
    }

    /// 接続の痕跡を全て削除する。join していない接続に対しても呼び出せる
    pub async fn disconnect(&self, connection: ConnectionId) {
        let _guard = self.gate.lock().await;
        self.disconnect.execute(connection).await;
    }
}
