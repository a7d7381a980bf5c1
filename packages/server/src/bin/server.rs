//! Real-time group messaging server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin roomcast-server
//! cargo run --bin roomcast-server -- --host 0.0.0.0 --port 5000
//! ```

use std::{collections::HashMap, sync::Arc};

use clap::Parser;
use roomcast_server::{
    domain::{MessageStore, PresenceRegistry, RoomManager},
    infrastructure::{
        message_pusher::WebSocketMessagePusher,
        repository::{InMemoryMessageRepository, InMemoryPresenceRepository, InMemoryRoomRepository},
    },
    ui::Server,
    usecase::{EventDispatcher, GetOnlineUsersUseCase, GetRoomsUseCase, PageSizes, Repositories},
};
use roomcast_shared::{logger::setup_logger, time::SystemClock};
use tokio::sync::Mutex;

#[derive(Parser, Debug)]
#[command(name = "roomcast-server")]
#[command(about = "Real-time group messaging server over WebSocket", long_about = None)]
struct Args {
    /// Host address to bind the server to
    #[arg(short = 'H', long, default_value = "127.0.0.1")]
    host: String,

    /// Port number to bind the server to
    #[arg(short = 'p', long, default_value = "5000")]
    port: u16,

    /// History page size used when load-messages omits a limit
    #[arg(long, default_value = "20")]
    default_page_size: usize,

    /// Upper bound for history page sizes
    #[arg(long, default_value = "100")]
    max_page_size: usize,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Initialize tracing
    setup_logger("roomcast_server", env!("CARGO_BIN_NAME"), &args.log_level);

    // 1. Create Repositories (in-memory stores)
    let repositories = Repositories {
        presence: Arc::new(InMemoryPresenceRepository::new(Arc::new(Mutex::new(
            PresenceRegistry::new(),
        )))),
        rooms: Arc::new(InMemoryRoomRepository::new(Arc::new(Mutex::new(
            RoomManager::new(),
        )))),
        messages: Arc::new(InMemoryMessageRepository::new(Arc::new(Mutex::new(
            MessageStore::new(),
        )))),
    };

    // 2. Create MessagePusher (WebSocket implementation)
    let message_pusher_clients = Arc::new(Mutex::new(HashMap::new()));
    let message_pusher = Arc::new(WebSocketMessagePusher::new(message_pusher_clients));

    // 3. Create UseCases
    let page_sizes = PageSizes {
        default_limit: args.default_page_size.min(args.max_page_size),
        max_limit: args.max_page_size,
    };
    let get_rooms_usecase = Arc::new(GetRoomsUseCase::new(
        repositories.rooms.clone(),
        repositories.messages.clone(),
    ));
    let get_online_users_usecase =
        Arc::new(GetOnlineUsersUseCase::new(repositories.presence.clone()));
    let dispatcher = Arc::new(EventDispatcher::new(
        repositories,
        message_pusher,
        Arc::new(SystemClock),
        page_sizes,
    ));

    // 4. Create and run the server
    let server = Server::new(dispatcher, get_rooms_usecase, get_online_users_usecase);
    if let Err(e) = server.run(args.host, args.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
