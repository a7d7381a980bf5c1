//! Shared helpers for the integration tests.

#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use futures_util::{SinkExt, StreamExt};
use roomcast_server::{
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryMessageRepository, InMemoryPresenceRepository, InMemoryRoomRepository},
    },
    ui::Server,
    usecase::{EventDispatcher, GetOnlineUsersUseCase, GetRoomsUseCase, PageSizes, Repositories},
};
use roomcast_shared::time::SystemClock;
use serde_json::{Value, json};
use tokio::net::{TcpListener, TcpStream};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async, tungstenite::Message};

const RECV_TIMEOUT: Duration = Duration::from_secs(2);

/// Server running in the test's runtime on an ephemeral port
pub struct TestServer {
    pub port: u16,
}

impl TestServer {
    pub async fn start() -> Self {
        let repositories = Repositories {
            presence: Arc::new(InMemoryPresenceRepository::default()),
            rooms: Arc::new(InMemoryRoomRepository::default()),
            messages: Arc::new(InMemoryMessageRepository::default()),
        };
        let get_rooms = Arc::new(GetRoomsUseCase::new(
            repositories.rooms.clone(),
            repositories.messages.clone(),
        ));
        let get_online_users = Arc::new(GetOnlineUsersUseCase::new(repositories.presence.clone()));
        let dispatcher = Arc::new(EventDispatcher::new(
            repositories,
            Arc::new(WebSocketMessagePusher::default()),
            Arc::new(SystemClock),
            PageSizes::default(),
        ));
        let server = Server::new(dispatcher, get_rooms, get_online_users);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let port = listener.local_addr().expect("No local address").port();
        tokio::spawn(server.serve(listener, std::future::pending()));

        TestServer { port }
    }

    pub fn ws_url(&self) -> String {
        format!("ws://127.0.0.1:{}/ws", self.port)
    }

    pub fn http_url(&self, path: &str) -> String {
        format!("http://127.0.0.1:{}{}", self.port, path)
    }
}

/// WebSocket client speaking the `{"event", "data"}` envelope
pub struct TestClient {
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
}

impl TestClient {
    pub async fn connect(server: &TestServer) -> Self {
        let (stream, _) = connect_async(server.ws_url())
            .await
            .expect("Failed to connect");
        TestClient { stream }
    }

    pub async fn send(&mut self, event: &str, data: Value) {
        let frame = json!({ "event": event, "data": data }).to_string();
        self.stream
            .send(Message::Text(frame.into()))
            .await
            .expect("Failed to send frame");
    }

    pub async fn send_binary(&mut self, data: Vec<u8>) {
        self.stream
            .send(Message::Binary(data.into()))
            .await
            .expect("Failed to send frame");
    }

    /// Next event envelope, or None on timeout
    pub async fn recv(&mut self) -> Option<Value> {
        loop {
            let next = tokio::time::timeout(RECV_TIMEOUT, self.stream.next()).await.ok()??;
            match next.ok()? {
                Message::Text(text) => return serde_json::from_str(text.as_str()).ok(),
                Message::Close(_) => return None,
                _ => continue,
            }
        }
    }

    /// Skip events until one named `event` arrives
    pub async fn recv_event(&mut self, event: &str) -> Value {
        loop {
            let envelope = self
                .recv()
                .await
                .unwrap_or_else(|| panic!("Timed out waiting for '{}'", event));
            if envelope["event"] == event {
                return envelope["data"].clone();
            }
        }
    }

    /// Skip events until `event` arrives carrying exactly `data`
    pub async fn wait_for(&mut self, event: &str, data: &Value) {
        while &self.recv_event(event).await != data {}
    }

    /// Assert nothing arrives for a short while
    pub async fn expect_silence(&mut self) {
        let next = tokio::time::timeout(Duration::from_millis(200), self.stream.next()).await;
        assert!(next.is_err(), "unexpected frame: {:?}", next);
    }

    /// `join` then `join-room`, consuming the resulting notifications
    pub async fn enter(&mut self, username: &str, room: &str) {
        self.send("join", json!({ "username": username })).await;
        self.recv_event("user-list").await;
        self.send("join-room", json!({ "room": room })).await;
        self.recv_event("room-notification").await;
    }

    pub async fn close(mut self) {
        let _ = self.stream.close(None).await;
    }
}
