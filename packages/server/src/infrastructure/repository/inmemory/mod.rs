//! InMemory Repository 実装
//!
//! ドメイン層の registry をそのままストレージとして使用し、`tokio::sync::Mutex` で保護します。
//! プロセス終了とともに全データは失われます。

mod message;
mod presence;
mod room;

pub use message::InMemoryMessageRepository;
pub use presence::InMemoryPresenceRepository;
pub use room::InMemoryRoomRepository;
