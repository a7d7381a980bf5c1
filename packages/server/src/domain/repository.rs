//! Repository trait 定義
//!
//! ドメイン層が必要とするデータアクセスのインターフェースを定義します。
//! 具体的な実装は Infrastructure 層が提供します（依存性の逆転）。
//!
//! 各メソッドは単体でアトミックです。複数の呼び出しにまたがるコマンドは
//! EventDispatcher が直列化します。

use async_trait::async_trait;

use super::{
    entity::{Message, NewMessage, ReactionUpdate, ReadUpdate},
    error::RepositoryError,
    value_object::{ConnectionId, MessageId, Reaction, RoomName, Timestamp, Username},
};

/// オンラインユーザーの双方向の索引（[`PresenceRegistry`](super::PresenceRegistry) を参照）
#[async_trait]
pub trait PresenceRepository: Send + Sync {
    /// ユーザー名を接続に結び付ける（後勝ち）
    async fn register(&self, connection: ConnectionId, username: Username);

    /// 接続の結び付けを削除し、あればそのユーザー名を返す
    async fn unregister(&self, connection: &ConnectionId) -> Option<Username>;

    async fn list_online(&self) -> Vec<Username>;

    async fn resolve(&self, username: &Username) -> Option<ConnectionId>;

    async fn username_of(&self, connection: &ConnectionId) -> Option<Username>;
}

/// ルームのメンバー管理（[`RoomManager`](super::RoomManager) を参照）
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// ルームに参加し、直前のルームを返す
    async fn join(
        &self,
        connection: ConnectionId,
        room: RoomName,
        now: Timestamp,
    ) -> Option<RoomName>;

    /// 現在のルームから退出し、そのルームを返す
    async fn leave(&self, connection: &ConnectionId) -> Option<RoomName>;

    async fn members_of(&self, room: &RoomName) -> Vec<ConnectionId>;

    async fn current_room_of(&self, connection: &ConnectionId) -> Option<RoomName>;

    /// 全ルームの `(ルーム, メンバー数, 作成時刻)`
    async fn room_overview(&self) -> Vec<(RoomName, usize, Timestamp)>;
}

/// メッセージログとリアクション・既読の台帳（[`MessageStore`](super::MessageStore) を参照）
#[async_trait]
pub trait MessageRepository: Send + Sync {
    async fn append(&self, message: NewMessage, now: Timestamp) -> Message;

    async fn paginate(&self, room: &RoomName, offset: usize, limit: usize) -> Vec<Message>;

    async fn get(&self, room: &RoomName, message_id: MessageId) -> Option<Message>;

    async fn add_reaction(
        &self,
        room: &RoomName,
        message_id: MessageId,
        reaction: Reaction,
        username: Username,
    ) -> Result<ReactionUpdate, RepositoryError>;

    async fn mark_read(
        &self,
        room: &RoomName,
        message_id: MessageId,
        username: Username,
    ) -> Result<ReadUpdate, RepositoryError>;

    /// ログのある全ルームの `(ルーム, メッセージ数, 最初のメッセージ時刻)`
    async fn log_overview(&self) -> Vec<(RoomName, usize, Option<Timestamp>)>;
}
