//! UseCase: メッセージ履歴取得処理

use std::sync::Arc;

use crate::domain::{
    ConnectionId, Message, MessagePusher, MessageRepository, Notification, RoomName,
};

use super::error::CommandError;

/// 履歴ページのサイズ設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizes {
    /// `limit` が省略されたときの件数
    pub default_limit: usize,
    /// これより大きい要求はこの値に切り詰める
    pub max_limit: usize,
}

impl Default for PageSizes {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

impl PageSizes {
    pub fn resolve(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or(self.default_limit).min(self.max_limit)
    }
}

/// メッセージ履歴取得のユースケース
pub struct LoadMessagesUseCase {
    messages: Arc<dyn MessageRepository>,
    message_pusher: Arc<dyn MessagePusher>,
    page_sizes: PageSizes,
}

impl LoadMessagesUseCase {
    pub fn new(
        messages: Arc<dyn MessageRepository>,
        message_pusher: Arc<dyn MessagePusher>,
        page_sizes: PageSizes,
    ) -> Self {
        Self {
            messages,
            message_pusher,
            page_sizes,
        }
    }

    /// 履歴を 1 ページ分（古い順）取得し、要求した接続にだけ送る
    pub async fn execute(
        &self,
        connection: ConnectionId,
        room: RoomName,
        offset: usize,
        limit: Option<usize>,
    ) -> Result<Vec<Message>, CommandError> {
        let limit = self.page_sizes.resolve(limit);
        let page = self.messages.paginate(&room, offset, limit).await;
        tracing::debug!(
            "Loaded {} messages from room '{}' (offset {}, limit {})",
            page.len(),
            room,
            offset,
            limit
        );

        self.message_pusher
            .push_to(&connection, &Notification::RoomMessageHistory(page.clone()))
            .await?;
        Ok(page)
    }
}
