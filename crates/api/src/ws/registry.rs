use std::collections::HashMap;

use sensorhub_core::types::Timestamp;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;

/// Tracks live broadcast sessions.
///
/// Sessions never talk to each other through the registry; it only exists
/// so the server can count them and stop them on shutdown. Thread-safe via
/// interior `RwLock`; designed to be wrapped in `Arc`.
pub struct SessionRegistry {
    /// Connection ID to connect time.
    sessions: RwLock<HashMap<String, Timestamp>>,
    shutdown: CancellationToken,
}

impl SessionRegistry {
    /// Create a new, empty registry.
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            shutdown: CancellationToken::new(),
        }
    }

    /// Register a session.
    ///
    /// Returns the token the session must watch for server shutdown. If the
    /// registry is already shut down the token is returned cancelled.
    pub async fn register(&self, conn_id: String) -> CancellationToken {
        self.sessions
            .write()
            .await
            .insert(conn_id, chrono::Utc::now());
        self.shutdown.child_token()
    }

    /// Remove a session by its connection ID.
    pub async fn remove(&self, conn_id: &str) {
        self.sessions.write().await.remove(conn_id);
    }

    /// Return the current number of live sessions.
    pub async fn connection_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// When the given session connected, if it is still live.
    pub async fn connected_at(&self, conn_id: &str) -> Option<Timestamp> {
        self.sessions.read().await.get(conn_id).copied()
    }

    /// Signal every session to stop, then clear the map.
    pub async fn shutdown_all(&self) {
        let mut sessions = self.sessions.write().await;
        let count = sessions.len();
        self.shutdown.cancel();
        sessions.clear();
        tracing::info!(count, "Stopped all broadcast sessions");
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
