//! DTO とドメイン型の変換

use roomcast_shared::time::timestamp_to_rfc3339;

use crate::domain::{
    Command, ImagePayload, Message, MessageId, Notification, Reaction, RoomName, Username,
    ValueObjectError,
};
use crate::infrastructure::dto::websocket as dto;

fn required(value: Option<String>, field: &'static str) -> Result<String, ValueObjectError> {
    value.ok_or(ValueObjectError::Missing(field))
}

fn required_id(value: Option<u64>) -> Result<MessageId, ValueObjectError> {
    value
        .map(MessageId::new)
        .ok_or(ValueObjectError::Missing("messageId"))
}

/// 自己申告のユーザー名。欠落または空白のみは「指定なし」
fn optional_username(value: Option<String>) -> Result<Option<Username>, ValueObjectError> {
    match value {
        Some(name) if !name.trim().is_empty() => Username::new(name).map(Some),
        _ => Ok(None),
    }
}

// ========================================
// DTO → Domain
// ========================================

impl TryFrom<dto::ClientEvent> for Command {
    type Error = ValueObjectError;

    fn try_from(event: dto::ClientEvent) -> Result<Self, Self::Error> {
        let command = match event {
            dto::ClientEvent::Join(p) => Command::Join {
                username: Username::new(required(p.username, "username")?)?,
            },
            dto::ClientEvent::JoinRoom(p) => Command::JoinRoom {
                room: RoomName::new(required(p.room, "room")?)?,
            },
            dto::ClientEvent::SendRoomMessage(p) => {
                let body = p.message.unwrap_or_default();
                let image = ImagePayload::from_optional(p.image);
                if body.trim().is_empty() && image.is_none() {
                    return Err(ValueObjectError::EmptyMessage);
                }
                Command::SendRoomMessage {
                    room: RoomName::new(required(p.room, "room")?)?,
                    username: optional_username(p.username)?,
                    body,
                    image,
                    ack_id: p.ack_id,
                }
            }
            dto::ClientEvent::ReactToMessage(p) => Command::ReactToMessage {
                room: RoomName::new(required(p.room, "room")?)?,
                message_id: required_id(p.message_id)?,
                reaction: Reaction::new(required(p.reaction, "reaction")?)?,
                username: optional_username(p.username)?,
            },
            dto::ClientEvent::MessageRead(p) => Command::MessageRead {
                room: RoomName::new(required(p.room, "room")?)?,
                message_id: required_id(p.message_id)?,
                username: optional_username(p.username)?,
            },
            dto::ClientEvent::SendPrivateMessage(p) => {
                let message = required(p.message, "message")?;
                if message.trim().is_empty() {
                    return Err(ValueObjectError::Empty("message"));
                }
                Command::SendPrivateMessage {
                    from: optional_username(p.from)?,
                    to: Username::new(required(p.to, "to")?)?,
                    message,
                }
            }
            dto::ClientEvent::LoadMessages(p) => Command::LoadMessages {
                room: RoomName::new(required(p.room, "room")?)?,
                offset: p.offset.unwrap_or(0),
                limit: p.limit,
            },
        };
        Ok(command)
    }
}

// ========================================
// Domain → DTO
// ========================================

impl From<Message> for dto::MessageRecord {
    fn from(model: Message) -> Self {
        Self {
            id: model.id.value(),
            username: model.sender.into_string(),
            room: model.room.into_string(),
            message: model.body,
            image: model.image.map(ImagePayload::into_string),
            reactions: model
                .reactions
                .into_iter()
                .map(|(reaction, users)| {
                    let users = users.into_iter().map(Username::into_string).collect();
                    (reaction.into_string(), users)
                })
                .collect(),
            read_by: model.read_by.into_iter().map(Username::into_string).collect(),
            timestamp: timestamp_to_rfc3339(model.timestamp.value()),
        }
    }
}

impl From<Notification> for dto::ServerEvent {
    fn from(notification: Notification) -> Self {
        match notification {
            Notification::UserList(users) => {
                Self::UserList(users.into_iter().map(Username::into_string).collect())
            }
            Notification::RoomNotification { message } => {
                Self::RoomNotification(dto::RoomNotificationPayload { message })
            }
            Notification::ReceiveRoomMessage(message) => Self::ReceiveRoomMessage(message.into()),
            Notification::MessageReaction {
                message_id,
                reaction,
                username,
            } => Self::MessageReaction(dto::MessageReactionPayload {
                message_id: message_id.value(),
                reaction: reaction.into_string(),
                username: username.into_string(),
            }),
            Notification::MessageReadUpdate {
                message_id,
                username,
            } => Self::MessageReadUpdate(dto::MessageReadUpdatePayload {
                message_id: message_id.value(),
                username: username.into_string(),
            }),
            Notification::PrivateMessage {
                from,
                to,
                message,
                timestamp,
            } => Self::PrivateMessage(dto::PrivateMessagePayload {
                from: from.into_string(),
                to: to.into_string(),
                message,
                timestamp: timestamp_to_rfc3339(timestamp.value()),
            }),
            Notification::RoomMessageHistory(messages) => {
                Self::RoomMessageHistory(messages.into_iter().map(Into::into).collect())
            }
            Notification::MessageDelivered { ack_id, message_id } => {
                Self::MessageDelivered(dto::MessageDeliveredPayload {
                    ack_id,
                    message_id: message_id.value(),
                    status: "delivered".to_string(),
                })
            }
        }
    }
}
