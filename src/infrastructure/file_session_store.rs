// File-backed session store
use crate::application::session_store::{SessionStore, SessionStoreError};
use crate::domain::session::AuthSession;
use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::RwLock;

/// Persists the session as a JSON object with `token` and `user` keys.
/// Reads are served from memory; writes go through to disk.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    cached: RwLock<Option<AuthSession>>,
}

impl FileSessionStore {
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, SessionStoreError> {
        let path = path.into();
        let cached = match tokio::fs::read(&path).await {
            Ok(bytes) => Some(serde_json::from_slice::<AuthSession>(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => return Err(e.into()),
        };
        tracing::debug!(
            "Opened session store at {} (signed in: {})",
            path.display(),
            cached.is_some()
        );

        Ok(Self {
            path,
            cached: RwLock::new(cached),
        })
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<AuthSession>, SessionStoreError> {
        Ok(self.cached.read().await.clone())
    }

    async fn set(&self, session: &AuthSession) -> Result<(), SessionStoreError> {
        let mut cached = self.cached.write().await;
        let bytes = serde_json::to_vec_pretty(session)?;
        tokio::fs::write(&self.path, bytes).await?;
        *cached = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), SessionStoreError> {
        let mut cached = self.cached.write().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        *cached = None;
        Ok(())
    }
}
