//! UseCase: 切断処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - DisconnectUseCase::execute() メソッド
//! - ルームからの退出通知、プレゼンスからの削除、ユーザー一覧の再配信
//!
//! ### どのような状況を想定しているか
//! - 正常系：ルーム参加中の接続の切断
//! - 異常系：通知の配信に失敗しても状態は削除される
//! - エッジケース：ルーム未参加・join 前の接続の切断

use std::sync::Arc;

use crate::domain::{
    ConnectionId, MessagePusher, Notification, PresenceRepository, RoomName, RoomRepository,
    Username,
};

use super::{display_name, fan_out};

/// 切断処理で削除した内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisconnectOutcome {
    pub username: Option<Username>,
    pub left_room: Option<RoomName>,
}

/// 切断のユースケース
pub struct DisconnectUseCase {
    presence: Arc<dyn PresenceRepository>,
    rooms: Arc<dyn RoomRepository>,
    message_pusher: Arc<dyn MessagePusher>,
}

impl DisconnectUseCase {
    pub fn new(
        presence: Arc<dyn PresenceRepository>,
        rooms: Arc<dyn RoomRepository>,
        message_pusher: Arc<dyn MessagePusher>,
    ) -> Self {
        Self {
            presence,
            rooms,
            message_pusher,
        }
    }

    /// 切断された接続を全てのレジストリから削除し、その後に通知を配信する
    ///
    /// 状態の削除は通知の成否に関係なく必ず完了する。
    ///
    /// # Arguments
    ///
    /// * `connection` - 切断された接続
    ///
    /// # Returns
    ///
    /// * `DisconnectOutcome` - 登録されていたユーザー名と退出したルーム
    pub async fn execute(&self, connection: ConnectionId) -> DisconnectOutcome {
        self.message_pusher.unregister_client(&connection).await;

        // 1. 状態の削除
        let name = display_name(self.presence.as_ref(), &connection).await;
        let left_room = self.rooms.leave(&connection).await;
        let username = self.presence.unregister(&connection).await;

        // 2. 通知の配信
        if let Some(room) = &left_room {
            let remaining = self.rooms.members_of(room).await;
            fan_out(self.message_pusher.as_ref(), remaining, &Notification::left(&name)).await;
        }
        let online = self.presence.list_online().await;
        let everyone = self.message_pusher.connected_clients().await;
        fan_out(self.message_pusher.as_ref(), everyone, &Notification::UserList(online)).await;

        tracing::info!(
            "Connection {} ('{}') disconnected and removed from registry",
            connection,
            name
        );
        DisconnectOutcome {
            username,
            left_room,
        }
    }
}
