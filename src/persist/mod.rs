//! Mirrors the store to durable storage.
//!
//! The whole state is written as one versioned blob under the state key and
//! the bearer token separately under [`TOKEN_KEY`], which is what the HTTP
//! client reads before each request.

pub mod storage;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::PersistError;
use crate::store::AppState;

pub use storage::{FileStorage, MemoryStorage, Storage};

pub const TOKEN_KEY: &str = "token";

/// Bumped whenever `AppState` changes shape incompatibly
pub const STATE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct Envelope<S> {
    version: u32,
    saved_at: DateTime<Utc>,
    state: S,
}

/// Store the bearer token as a JSON string, or drop it
pub fn write_token(storage: &dyn Storage, token: Option<&str>) -> Result<(), PersistError> {
    match token {
        Some(token) => storage.set(TOKEN_KEY, &serde_json::to_string(token)?),
        None => storage.remove(TOKEN_KEY),
    }
}

pub fn read_token(storage: &dyn Storage) -> Result<Option<String>, PersistError> {
    let raw = storage.get(TOKEN_KEY)?;
    Ok(raw.map(|raw| serde_json::from_str::<String>(&raw)).transpose()?)
}

#[derive(Clone)]
pub struct Persistence {
    storage: Arc<dyn Storage>,
    key: String,
}

impl Persistence {
    pub fn new(storage: Arc<dyn Storage>, key: impl Into<String>) -> Self {
        Self {
            storage,
            key: key.into(),
        }
    }

    pub fn storage(&self) -> Arc<dyn Storage> {
        Arc::clone(&self.storage)
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Rehydrate the last saved state.
    ///
    /// Anything that is not a readable blob of the current version is
    /// discarded and replaced by the default state.
    pub fn load(&self) -> AppState {
        let raw = match self.storage.get(&self.key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return AppState::default(),
            Err(e) => {
                warn!(key = %self.key, error = %e, "could not read persisted state");
                return AppState::default();
            }
        };

        match serde_json::from_str::<Envelope<AppState>>(&raw) {
            Ok(envelope) if envelope.version == STATE_VERSION => {
                debug!(key = %self.key, saved_at = %envelope.saved_at, "rehydrated state");
                envelope.state
            }
            Ok(envelope) => {
                warn!(
                    key = %self.key,
                    found = envelope.version,
                    expected = STATE_VERSION,
                    "discarding persisted state from another version"
                );
                self.discard();
                AppState::default()
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "discarding unreadable persisted state");
                self.discard();
                AppState::default()
            }
        }
    }

    pub fn save(&self, state: &AppState) -> Result<(), PersistError> {
        let envelope = Envelope {
            version: STATE_VERSION,
            saved_at: Utc::now(),
            state,
        };
        let content = serde_json::to_string_pretty(&envelope)?;
        self.storage.set(&self.key, &content)
    }

    pub fn store_token(&self, token: Option<&str>) -> Result<(), PersistError> {
        write_token(self.storage.as_ref(), token)
    }

    pub fn token(&self) -> Result<Option<String>, PersistError> {
        read_token(self.storage.as_ref())
    }

    /// Drop the state blob and the token
    pub fn clear(&self) -> Result<(), PersistError> {
        self.storage.remove(&self.key)?;
        self.storage.remove(TOKEN_KEY)
    }

    fn discard(&self) {
        if let Err(e) = self.storage.remove(&self.key) {
            warn!(key = %self.key, error = %e, "could not discard persisted state");
        }
    }
}
