//! WebSocket 用 DTO
//!
//! テキストフレームは全て一つのエンベロープ `{"event": "<name>", "data": <payload>}` です。
//! 受信ペイロードのフィールドはこの層では全て Option とし、欠落はパースエラーではなく
//! 変換層での検証エラーにします。

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ========================================
// Inbound (client → server)
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ClientEvent {
    Join(JoinPayload),
    JoinRoom(JoinRoomPayload),
    SendRoomMessage(SendRoomMessagePayload),
    ReactToMessage(ReactToMessagePayload),
    MessageRead(MessageReadPayload),
    SendPrivateMessage(SendPrivateMessagePayload),
    LoadMessages(LoadMessagesPayload),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinPayload {
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JoinRoomPayload {
    #[serde(default)]
    pub room: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendRoomMessagePayload {
    /// クライアント側の ID ヒント。無視し、ID はサーバーが割り当てる
    #[serde(default)]
    pub id: Option<serde_json::Value>,
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// 指定時は送信者に、この ID 付きの `message-delivered` を返す
    #[serde(default)]
    pub ack_id: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReactToMessagePayload {
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub message_id: Option<u64>,
    #[serde(default)]
    pub reaction: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReadPayload {
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub message_id: Option<u64>,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendPrivateMessagePayload {
    #[serde(default)]
    pub from: Option<String>,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadMessagesPayload {
    #[serde(default)]
    pub room: Option<String>,
    #[serde(default)]
    pub offset: Option<usize>,
    #[serde(default)]
    pub limit: Option<usize>,
}

// ========================================
// Outbound (server → client)
// ========================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "kebab-case")]
pub enum ServerEvent {
    UserList(Vec<String>),
    RoomNotification(RoomNotificationPayload),
    ReceiveRoomMessage(MessageRecord),
    MessageReaction(MessageReactionPayload),
    MessageReadUpdate(MessageReadUpdatePayload),
    PrivateMessage(PrivateMessagePayload),
    RoomMessageHistory(Vec<MessageRecord>),
    MessageDelivered(MessageDeliveredPayload),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomNotificationPayload {
    pub message: String,
}

/// メッセージ全体。配信時と履歴ページで使う
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRecord {
    pub id: u64,
    pub username: String,
    pub room: String,
    pub message: String,
    pub image: Option<String>,
    pub reactions: BTreeMap<String, Vec<String>>,
    pub read_by: Vec<String>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReactionPayload {
    pub message_id: u64,
    pub reaction: String,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageReadUpdatePayload {
    pub message_id: u64,
    pub username: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivateMessagePayload {
    pub from: String,
    pub to: String,
    pub message: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageDeliveredPayload {
    pub ack_id: u64,
    pub message_id: u64,
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_send_room_message_envelope() {
        // テスト項目: send-room-message のエンベロープが解析できる
        // given (前提条件):
        let text = r#"{"event":"send-room-message","data":{"id":1700000000000,"username":"alice","room":"general","message":"hi","image":null}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        match event {
            ClientEvent::SendRoomMessage(payload) => {
                assert_eq!(payload.room.as_deref(), Some("general"));
                assert_eq!(payload.message.as_deref(), Some("hi"));
                assert_eq!(payload.image, None);
                assert_eq!(payload.ack_id, None);
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn test_parse_load_messages_without_paging_fields() {
        // テスト項目: offset / limit を省略した load-messages が解析できる
        // given (前提条件):
        let text = r#"{"event":"load-messages","data":{"room":"general"}}"#;

        // when (操作):
        let event: ClientEvent = serde_json::from_str(text).unwrap();

        // then (期待する結果):
        assert_eq!(
            event,
            ClientEvent::LoadMessages(LoadMessagesPayload {
                room: Some("general".to_string()),
                offset: None,
                limit: None,
            })
        );
    }

    #[test]
    fn test_unknown_event_is_rejected() {
        // テスト項目: 未知のイベント名は解析エラーになる
        // given (前提条件):
        let text = r#"{"event":"delete-message","data":{"messageId":1}}"#;

        // when (操作):
        let result = serde_json::from_str::<ClientEvent>(text);

        // then (期待する結果):
        assert!(result.is_err());
    }

    #[test]
    fn test_serialize_user_list() {
        // テスト項目: user-list は文字列配列として出力される
        // given (前提条件):
        let event = ServerEvent::UserList(vec!["alice".to_string(), "bob".to_string()]);

        // when (操作):
        let json = serde_json::to_string(&event).unwrap();

        // then (期待する結果):
        assert_eq!(json, r#"{"event":"user-list","data":["alice","bob"]}"#);
    }

    #[test]
    fn test_serialize_message_record_uses_camel_case() {
        // テスト項目: メッセージレコードは readBy などキャメルケースで出力される
        // given (前提条件):
        let event = ServerEvent::ReceiveRoomMessage(MessageRecord {
            id: 1,
            username: "alice".to_string(),
            room: "general".to_string(),
            message: "hi".to_string(),
            image: None,
            reactions: BTreeMap::new(),
            read_by: vec![],
            timestamp: "2023-01-01T00:00:00.000Z".to_string(),
        });

        // when (操作):
        let value = serde_json::to_value(&event).unwrap();

        // then (期待する結果):
        assert_eq!(value["event"], "receive-room-message");
        assert_eq!(value["data"]["readBy"], serde_json::json!([]));
        assert_eq!(value["data"]["image"], serde_json::Value::Null);
        assert_eq!(value["data"]["reactions"], serde_json::json!({}));
    }
}
