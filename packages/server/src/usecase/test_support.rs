//! ユースケースのテストで共有するヘルパー

use std::sync::Arc;

use roomcast_shared::time::FixedClock;
use tokio::sync::mpsc;

use crate::{
    domain::{ConnectionId, MessagePusher, RoomName, Username},
    infrastructure::{
        dto::websocket::ServerEvent,
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryMessageRepository, InMemoryPresenceRepository, InMemoryRoomRepository},
    },
};

use super::{EventDispatcher, PageSizes, Repositories};

pub const NOW: i64 = 1672531200000;

pub fn user(name: &str) -> Username {
    Username::new(name.to_string()).unwrap()
}

pub fn room(name: &str) -> RoomName {
    RoomName::new(name.to_string()).unwrap()
}

/// インメモリ Repository と、テスト用チャンネルにフレームを流す実際の WebSocket pusher
pub struct Harness {
    pub repositories: Repositories,
    pub pusher: Arc<WebSocketMessagePusher>,
    pub clock: Arc<FixedClock>,
}

impl Harness {
    pub fn new() -> Self {
        Self {
            repositories: Repositories {
                presence: Arc::new(InMemoryPresenceRepository::default()),
                rooms: Arc::new(InMemoryRoomRepository::default()),
                messages: Arc::new(InMemoryMessageRepository::default()),
            },
            pusher: Arc::new(WebSocketMessagePusher::default()),
            clock: Arc::new(FixedClock::new(NOW)),
        }
    }

    /// 新しい接続を pusher に登録する
    pub async fn connect(&self) -> (ConnectionId, mpsc::UnboundedReceiver<String>) {
        let connection = ConnectionId::generate();
        let (tx, rx) = mpsc::unbounded_channel();
        self.pusher.register_client(connection, tx).await;
        (connection, rx)
    }

    pub fn dispatcher(&self) -> EventDispatcher {
        EventDispatcher::new(
            self.repositories.clone(),
            self.pusher.clone(),
            self.clock.clone(),
            PageSizes::default(),
        )
    }
}

/// これまでに届いたフレームを全て取り出してデコードする
pub fn drain(rx: &mut mpsc::UnboundedReceiver<String>) -> Vec<ServerEvent> {
    let mut events = Vec::new();
    while let Ok(frame) = rx.try_recv() {
        events.push(serde_json::from_str(&frame).unwrap());
    }
    events
}
