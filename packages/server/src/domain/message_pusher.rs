//! MessagePusher trait 定義
//!
//! ドメイン層が必要とする通知送信のインターフェース。
//! 具体的な実装（WebSocket など）は Infrastructure 層が提供します。

use async_trait::async_trait;
use tokio::sync::mpsc;

use super::{error::MessagePushError, notification::Notification, value_object::ConnectionId};

/// 接続ごとの送信キュー。トランスポート側がソケットへ書き出す
pub type PusherChannel = mpsc::UnboundedSender<String>;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MessagePusher: Send + Sync {
    /// `sender` 経由で `connection` への送信を開始
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel);

    /// `connection` への送信を停止
    async fn unregister_client(&self, connection: &ConnectionId);

    /// 登録中の全接続（順不同）
    async fn connected_clients(&self) -> Vec<ConnectionId>;

    /// 一つの接続に送信
    async fn push_to(
        &self,
        connection: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;

    /// 全ての対象に送信。存在しない・閉じた対象はスキップし、
    /// 残りの対象へのエラーにはしない。
    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError>;
}
