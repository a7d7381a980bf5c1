//! WebSocket を使った MessagePusher 実装
//!
//! ## 責務
//!
//! - 接続ごとの `UnboundedSender` を管理
//! - 通知を JSON フレームに変換して送信（push_to, broadcast）
//!
//! ## 設計ノート
//!
//! WebSocket の受付と sender の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! 送信は非ブロッキングなキュー投入のみで、ソケットへの書き込みは接続ごとの writer タスクが行います。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::{
    domain::{ConnectionId, MessagePushError, MessagePusher, Notification, PusherChannel},
    infrastructure::dto::websocket::ServerEvent,
};

/// WebSocket を使った MessagePusher 実装
///
/// ## 使用例
///
/// ```ignore
/// let pusher = WebSocketMessagePusher::default();
/// pusher.register_client(connection, tx).await;
/// pusher.push_to(&connection, &Notification::UserList(vec![])).await?;
/// ```
pub struct WebSocketMessagePusher {
    /// 接続中のクライアントの送信キュー
    clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>,
}

impl WebSocketMessagePusher {
    pub fn new(clients: Arc<Mutex<HashMap<ConnectionId, PusherChannel>>>) -> Self {
        Self { clients }
    }
}

impl Default for WebSocketMessagePusher {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(HashMap::new())))
    }
}

/// 通知を一つのワイヤーフレームにエンコードする
pub fn encode(notification: &Notification) -> Result<String, MessagePushError> {
    let event = ServerEvent::from(notification.clone());
    serde_json::to_string(&event).map_err(|e| MessagePushError::PushFailed(e.to_string()))
}

#[async_trait]
impl MessagePusher for WebSocketMessagePusher {
    async fn register_client(&self, connection: ConnectionId, sender: PusherChannel) {
        let mut clients = self.clients.lock().await;
        clients.insert(connection, sender);
        tracing::debug!("Connection {} registered to MessagePusher", connection);
    }

    async fn unregister_client(&self, connection: &ConnectionId) {
        let mut clients = self.clients.lock().await;
        clients.remove(connection);
        tracing::debug!("Connection {} unregistered from MessagePusher", connection);
    }

    async fn connected_clients(&self) -> Vec<ConnectionId> {
        let clients = self.clients.lock().await;
        clients.keys().copied().collect()
    }

    async fn push_to(
        &self,
        connection: &ConnectionId,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let frame = encode(notification)?;
        let clients = self.clients.lock().await;

        let sender = clients
            .get(connection)
            .ok_or_else(|| MessagePushError::ClientNotFound(connection.to_string()))?;
        sender
            .send(frame)
            .map_err(|e| MessagePushError::PushFailed(e.to_string()))?;
        tracing::debug!("Pushed message to connection {}", connection);
        Ok(())
    }

    async fn broadcast(
        &self,
        targets: Vec<ConnectionId>,
        notification: &Notification,
    ) -> Result<(), MessagePushError> {
        let frame = encode(notification)?;
        let clients = self.clients.lock().await;

        for target in targets {
            let Some(sender) = clients.get(&target) else {
                tracing::warn!("Connection {} not found during broadcast, skipping", target);
                continue;
            };
            // ブロードキャストでは一部の送信失敗を許容
            if let Err(e) = sender.send(frame.clone()) {
                tracing::warn!("Failed to push message to connection {}: {}", target, e);
            }
        }

        Ok(())
    }
}
