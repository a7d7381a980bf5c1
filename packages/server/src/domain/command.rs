//! 検証済みの受信コマンド

use super::value_object::{ImagePayload, MessageId, Reaction, RoomName, Username};

/// 一つの接続から届いた検証済みのコマンド
///
/// Option のユーザー名はクライアントの自己申告。ユースケースが接続に登録されたユーザー名と
/// どちらを優先するかを決める。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Join {
        username: Username,
    },
    JoinRoom {
        room: RoomName,
    },
    SendRoomMessage {
        room: RoomName,
        username: Option<Username>,
        body: String,
        image: Option<ImagePayload>,
        ack_id: Option<u64>,
    },
    ReactToMessage {
        room: RoomName,
        message_id: MessageId,
        reaction: Reaction,
        username: Option<Username>,
    },
    MessageRead {
        room: RoomName,
        message_id: MessageId,
        username: Option<Username>,
    },
    SendPrivateMessage {
        from: Option<Username>,
        to: Username,
        message: String,
    },
    LoadMessages {
        room: RoomName,
        offset: usize,
        limit: Option<usize>,
    },
}

impl Command {
    /// ログ用のイベント名
    pub fn name(&self) -> &'static str {
        match self {
            Self::Join { .. } => "join",
            Self::JoinRoom { .. } => "join-room",
            Self::SendRoomMessage { .. } => "send-room-message",
            Self::ReactToMessage { .. } => "react-to-message",
            Self::MessageRead { .. } => "message-read",
            Self::SendPrivateMessage { .. } => "send-private-message",
            Self::LoadMessages { .. } => "load-messages",
        }
    }
}
