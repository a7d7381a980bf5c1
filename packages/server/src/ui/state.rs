//! Server state shared by the handlers.

use std::sync::Arc;

use crate::usecase::{EventDispatcher, GetOnlineUsersUseCase, GetRoomsUseCase};

/// Shared application state
pub struct AppState {
    /// EventDispatcher（WebSocket コマンドの振り分け）
    pub dispatcher: Arc<EventDispatcher>,
    /// GetRoomsUseCase（ルーム一覧・詳細取得のユースケース）
    pub get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetOnlineUsersUseCase（オンラインユーザー一覧取得のユースケース）
    pub get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
}
