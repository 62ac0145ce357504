// Port for the persisted auth session
use crate::domain::session::AuthSession;
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum SessionStoreError {
    #[error("session storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("session storage is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Process-wide session storage with an explicit load/set/clear lifecycle
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self) -> Result<Option<AuthSession>, SessionStoreError>;

    async fn set(&self, session: &AuthSession) -> Result<(), SessionStoreError>;

    async fn clear(&self) -> Result<(), SessionStoreError>;
}

/// Non-persistent store, used when no session file is configured
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    session: RwLock<Option<AuthSession>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<AuthSession>, SessionStoreError> {
        Ok(self.session.read().await.clone())
    }

    async fn set(&self, session: &AuthSession) -> Result<(), SessionStoreError> {
        *self.session.write().await = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        *self.session.write().await = None;
        Ok(())
    }
}
