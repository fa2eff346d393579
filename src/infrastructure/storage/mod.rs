use async_trait::async_trait;
use tracing::warn;

use crate::auth::session::Session;
use crate::core::errors::ApiError;

/// The single key under which the serialized session lives, in whichever
/// store the remember-me policy selects.
pub const SESSION_KEY: &str = "ledgerdesk.session";

/// A keyed blob store backing the session.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, ApiError>;
    async fn set(&self, key: &str, value: String) -> Result<(), ApiError>;
    async fn remove(&self, key: &str) -> Result<(), ApiError>;
}

/// Policy object choosing between the durable and ephemeral store.
///
/// Writes go to exactly one store (selected by `remember_me`) and evict any
/// copy in the other, so the blob never exists in both. Reads check durable
/// first. Toggling remember-me mid-session migrates the blob on the next
/// persist, not retroactively.
pub struct SessionVault<D, E> {
    durable: D,
    ephemeral: E,
    key: String,
}

impl<D: SessionStore, E: SessionStore> SessionVault<D, E> {
    pub fn new(durable: D, ephemeral: E) -> Self {
        Self {
            durable,
            ephemeral,
            key: SESSION_KEY.to_string(),
        }
    }

    pub async fn persist(&self, session: &Session) -> Result<(), ApiError> {
        let blob = serde_json::to_string(session)?;
        if session.remember_me {
            self.durable.set(&self.key, blob).await?;
            self.ephemeral.remove(&self.key).await?;
        } else {
            self.ephemeral.set(&self.key, blob).await?;
            self.durable.remove(&self.key).await?;
        }
        Ok(())
    }

    pub async fn load(&self) -> Result<Option<Session>, ApiError> {
        let blob = match self.durable.get(&self.key).await? {
            Some(blob) => Some(blob),
            None => self.ephemeral.get(&self.key).await?,
        };
        let Some(blob) = blob else { return Ok(None) };
        match serde_json::from_str(&blob) {
            Ok(session) => Ok(Some(session)),
            Err(err) => {
                // A corrupt blob is treated as no session at all.
                warn!("discarding unreadable session blob: {err}");
                self.clear().await?;
                Ok(None)
            }
        }
    }

    /// Remove the blob from both stores unconditionally.
    pub async fn clear(&self) -> Result<(), ApiError> {
        self.durable.remove(&self.key).await?;
        self.ephemeral.remove(&self.key).await?;
        Ok(())
    }
}

pub mod file;
pub mod in_memory;
