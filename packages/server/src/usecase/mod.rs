//! UseCase 層
//!
//! 受信コマンドごとに一つのユースケースがあります。各ユースケースは Repository 経由で状態を
//! 更新し、その結果の通知を `MessagePusher` 経由で配信します。
//! `EventDispatcher` がコマンドをユースケースに振り分け、一つずつ実行します。

mod connect;
mod disconnect;
mod dispatcher;
mod error;
mod get_online_users;
mod get_rooms;
mod join;
mod join_room;
mod load_messages;
mod mark_message_read;
mod react_to_message;
mod send_private_message;
mod send_room_message;

#[cfg(test)]
pub(crate) mod test_support;

pub use connect::ConnectUseCase;
pub use disconnect::{DisconnectOutcome, DisconnectUseCase};
pub use dispatcher::{EventDispatcher, Repositories};
pub use error::CommandError;
pub use get_online_users::GetOnlineUsersUseCase;
pub use get_rooms::{GetRoomsUseCase, summarize_rooms};
pub use join::JoinUseCase;
pub use join_room::JoinRoomUseCase;
pub use load_messages::{LoadMessagesUseCase, PageSizes};
pub use mark_message_read::MarkMessageReadUseCase;
pub use react_to_message::ReactToMessageUseCase;
pub use send_private_message::SendPrivateMessageUseCase;
pub use send_room_message::{RoomMessageRequest, SendRoomMessageUseCase};

use crate::domain::{ConnectionId, MessagePusher, Notification, PresenceRepository, Username};

/// `join` していない接続をルーム通知で表す名前
pub const ANONYMOUS: &str = "anonymous";

/// 接続に登録されたユーザー名を優先し、なければ自己申告のユーザー名を使う
async fn resolve_sender(
    presence: &dyn PresenceRepository,
    connection: &ConnectionId,
    declared: Option<Username>,
) -> Option<Username> {
    match presence.username_of(connection).await {
        Some(registered) => Some(registered),
        None => declared,
    }
}

/// 自己申告のユーザー名を優先し、なければ接続に登録されたユーザー名を使う
async fn resolve_actor(
    presence: &dyn PresenceRepository,
    connection: &ConnectionId,
    declared: Option<Username>,
) -> Option<Username> {
    match declared {
        Some(declared) => Some(declared),
        None => presence.username_of(connection).await,
    }
}

async fn display_name(presence: &dyn PresenceRepository, connection: &ConnectionId) -> String {
    presence
        .username_of(connection)
        .await
        .map_or_else(|| ANONYMOUS.to_string(), Username::into_string)
}

/// 状態変更後の通知配信。失敗は warn ログに残し、呼び出し元の処理は続行する
async fn fan_out(
    message_pusher: &dyn MessagePusher,
    targets: Vec<ConnectionId>,
    notification: &Notification,
) {
    if let Err(e) = message_pusher.broadcast(targets, notification).await {
        tracing::warn!("Failed to fan out notification: {}", e);
    }
}
