//! 送信イベント（ドメイン表現）
//!
//! MessagePusher がワイヤーフレームに変換します。ユースケースはどの通知をどの接続に送るかだけを
//! 決めます。

use super::{
    entity::Message,
    value_object::{MessageId, Reaction, Timestamp, Username},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    /// オンラインユーザー名の一覧（`user-list`）
    UserList(Vec<Username>),
    /// ルームの参加・退出のお知らせ（`room-notification`）
    RoomNotification { message: String },
    /// 保存されたばかりのルームメッセージ（`receive-room-message`）
    ReceiveRoomMessage(Message),
    /// リアクションの差分（`message-reaction`）
    MessageReaction {
        message_id: MessageId,
        reaction: Reaction,
        username: Username,
    },
    /// 既読の差分（`message-read-update`）
    MessageReadUpdate {
        message_id: MessageId,
        username: Username,
    },
    /// 個人宛メッセージ（`private-message`）
    PrivateMessage {
        from: Username,
        to: Username,
        message: String,
        timestamp: Timestamp,
    },
    /// 履歴 1 ページ分、古い順（`room-message-history`）
    RoomMessageHistory(Vec<Message>),
    /// ルームメッセージ送信者への配信確認（`message-delivered`）
    MessageDelivered { ack_id: u64, message_id: MessageId },
}

impl Notification {
    pub fn joined(username: &str) -> Self {
        Self::RoomNotification {
            message: format!("{} joined the room.", username),
        }
    }

    pub fn left(username: &str) -> Self {
        Self::RoomNotification {
            message: format!("{} left the room.", username),
        }
    }
}
