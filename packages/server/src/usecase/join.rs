//! UseCase: ユーザー名登録（join）処理

use std::sync::Arc;

use crate::domain::{ConnectionId, MessagePusher, Notification, PresenceRepository, Username};

use super::error::CommandError;

/// ユーザー名登録のユースケース
pub struct JoinUseCase {
    presence: Arc<dyn PresenceRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl JoinUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            presence,
            message_pusher,
        }
    }

    /// ユーザー名を接続に登録し、最新のオンライン一覧を全接続に配信する
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<Username>)` - 登録後のオンラインユーザー一覧（ソート済み）
    pub async fn execute(
        &self,
        connection: ConnectionId,
        username: Username,
    ) -> Result<Vec<Username>, CommandError> {
        self.presence.register(connection, username.clone()).await;
        tracing::info!("Connection {} joined as '{}'", connection, username);

        let online = self.presence.list_online().await;
        let everyone = self.message_pusher.connected_clients().await;
        self.message_pusher
            .broadcast(everyone, &Notification::UserList(online.clone()))
            .await?;
        Ok(online)
    }
}
