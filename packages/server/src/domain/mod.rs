//! ドメイン層
//!
//! 値オブジェクト、インメモリの registry（プレゼンス、ルーム、メッセージログ、リアクション・既読台帳）、
//! 送信通知、そして UseCase 層が依存する trait を定義します。
//! trait の実装は Infrastructure 層にあります。

pub mod command;
pub mod entity;
pub mod error;
pub mod ledger;
pub mod message_pusher;
pub mod message_store;
pub mod notification;
pub mod presence;
pub mod repository;
pub mod room;
pub mod value_object;

pub use command::Command;
pub use entity::{Message, NewMessage, ReactionUpdate, ReadUpdate, RoomSummary};
pub use error::{MessagePushError, RepositoryError, ValueObjectError};
pub use ledger::ReactionReadLedger;
pub use message_pusher::{MessagePusher, PusherChannel};
#[cfg(test)]
pub use message_pusher::MockMessagePusher;
pub use message_store::MessageStore;
pub use notification::Notification;
pub use presence::PresenceRegistry;
pub use repository::{MessageRepository, PresenceRepository, RoomRepository};
pub use room::{Room, RoomManager};
pub use value_object::{
    ConnectionId, ImagePayload, MessageId, Reaction, RoomName, Timestamp, Username,
};
