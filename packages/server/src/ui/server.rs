//! Server execution logic.

use std::{future::Future, sync::Arc};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use crate::usecase::{EventDispatcher, GetOnlineUsersUseCase, GetRoomsUseCase};

use super::{
    handler::{get_room_detail, get_rooms, get_users, health_check, websocket_handler},
    signal::shutdown_signal,
    state::AppState,
};

/// WebSocket chat server
///
/// # Example
///
/// ```ignore
/// let server = Server::new(dispatcher, get_rooms_usecase, get_online_users_usecase);
/// server.run("127.0.0.1".to_string(), 5000).await?;
/// ```
pub struct Server {
    /// EventDispatcher（WebSocket コマンドの振り分け）
    dispatcher: Arc<EventDispatcher>,
    /// GetRoomsUseCase（ルーム一覧・詳細取得のユースケース）
    get_rooms_usecase: Arc<GetRoomsUseCase>,
    /// GetOnlineUsersUseCase（オンラインユーザー一覧取得のユースケース）
    get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
}

impl Server {
    pub fn new(
        dispatcher: Arc<EventDispatcher>,
        get_rooms_usecase: Arc<GetRoomsUseCase>,
        get_online_users_usecase: Arc<GetOnlineUsersUseCase>,
    ) -> Self {
        Self {
            dispatcher,
            get_rooms_usecase,
            get_online_users_usecase,
        }
    }

    /// Build the router with every WebSocket and HTTP endpoint
    pub fn router(&self) -> Router {
        let app_state = Arc::new(AppState {
            dispatcher: self.dispatcher.clone(),
            get_rooms_usecase: self.get_rooms_usecase.clone(),
            get_online_users_usecase: self.get_online_users_usecase.clone(),
        });

        Router::new()
            // WebSocket エンドポイント
            .route("/ws", get(websocket_handler))
            // HTTP エンドポイント
            .route("/api/health", get(health_check))
            .route("/api/users", get(get_users))
            .route("/api/rooms", get(get_rooms))
            .route("/api/rooms/{room}", get(get_room_detail))
            .layer(TraceLayer::new_for_http())
            .with_state(app_state)
    }

    /// Run the server until Ctrl+C or SIGTERM
    ///
    /// # Errors
    ///
    /// Returns an error if the server fails to bind to the specified address or
    /// if there's an error during server execution.
    pub async fn run(self, host: String, port: u16) -> Result<(), Box<dyn std::error::Error>> {
        let bind_addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&bind_addr).await?;

        tracing::info!("Chat server listening on {}", listener.local_addr()?);
        tracing::info!("Connect to: ws://{}/ws", bind_addr);
        tracing::info!("Press Ctrl+C to shutdown gracefully");

        self.serve(listener, shutdown_signal()).await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    /// Serve on an already bound listener until `shutdown` resolves
    pub async fn serve<F>(self, listener: TcpListener, shutdown: F) -> std::io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        axum::serve(listener, self.router())
            .with_graceful_shutdown(shutdown)
            .await
    }
}
