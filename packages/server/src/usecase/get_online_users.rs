//! UseCase: オンラインユーザー一覧取得

use std::sync::Arc;

use crate::domain::{PresenceRepository, Username};

/// オンラインユーザー一覧取得のユースケース
pub struct GetOnlineUsersUseCase {
    presence: Arc<dyn PresenceRepository>,
}

impl GetOnlineUsersUseCase {
    pub fn new(presence: Arc<dyn PresenceRepository>) -> Self {
        Self { presence }
    }

    pub async fn execute(&self) -> Vec<Username> {
        self.presence.list_online().await
    }
}
