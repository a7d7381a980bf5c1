//! InMemory Presence Repository 実装

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::{ConnectionId, PresenceRegistry, PresenceRepository, Username};

/// インメモリ Presence Repository 実装
pub struct InMemoryPresenceRepository {
    registry: Arc<Mutex<PresenceRegistry>>,
}

impl InMemoryPresenceRepository {
    pub fn new(registry: Arc<Mutex<PresenceRegistry>>) -> Self {
        Self { registry }
    }
}

impl Default for InMemoryPresenceRepository {
    fn default() -> Self {
        Self::new(Arc::new(Mutex::new(PresenceRegistry::new())))
    }
}

#[async_trait]
impl PresenceRepository for InMemoryPresenceRepository {
    async fn register(&self, connection: ConnectionId, username: Username) {
        let mut registry = self.registry.lock().await;
        if let Some(displaced) = registry.register(connection, username.clone()) {
            tracing::info!(
                "Username '{}' moved from connection {} to {}",
                username,
                displaced,
                connection
            );
        }
    }

    async fn unregister(&self, connection: &ConnectionId) -> Option<Username> {
        let mut registry = self.registry.lock().await;
        registry.unregister(connection)
    }

    async fn list_online(&self) -> Vec<Username> {
        let registry = self.registry.lock().await;
        registry.list_online()
    }

    async fn resolve(&self, username: &Username) -> Option<ConnectionId> {
        let registry = self.registry.lock().await;
        registry.resolve(username)
    }

    async fn username_of(&self, connection: &ConnectionId) -> Option<Username> {
        let registry = self.registry.lock().await;
        registry.username_of(connection).cloned()
    }
}
