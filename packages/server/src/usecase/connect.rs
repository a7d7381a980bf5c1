//! UseCase: 接続受付処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, PusherChannel};

/// 接続受付のユースケース
///
/// 接続は `join` を送るまで匿名。受付では送信キューを開くだけ
pub struct ConnectUseCase {
    message_pusher: Arc<dyn MessagePusher>,
}

impl ConnectUseCase {
    pub fn new(message_pusher: Arc<dyn MessagePusher>) -> Self {
        Self { message_pusher }
    }

    pub async fn execute(&self, connection: ConnectionId, sender: PusherChannel) {
        self.message_pusher.register_client(connection, sender).await;
        tracing::info!("Connection {} accepted", connection);
    }
}
