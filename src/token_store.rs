//! Credential pair persistence
//!
//! The token store is a pure storage abstraction: no network access, no side
//! effects beyond the storage medium. Both tokens are always written and
//! cleared together; a store never holds half a pair.
//!
//! Storage may be unavailable (read-only filesystem, ephemeral context). The
//! contract is to fail soft: reads report [`TokenLookup::Unavailable`] and
//! writes degrade to silent no-ops. Callers treat `Unavailable` identically
//! to `Absent`; the distinction is kept in the type so the collapse stays a
//! visible, deliberate choice.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::sync::Mutex;

/// Access/refresh token tuple issued by the backend authentication endpoint
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    /// Short-lived bearer token attached to authenticated requests
    pub access: String,
    /// Long-lived token exchanged for a fresh pair via `/auth/refresh/`
    pub refresh: String,
}

/// Outcome of reading the token store
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenLookup {
    /// A credential pair is stored
    Found(TokenPair),
    /// The store is reachable but holds no pair
    Absent,
    /// The storage medium could not be read; treated like `Absent` by callers
    Unavailable,
}

impl TokenLookup {
    /// Collapse to the stored pair, treating `Unavailable` as absent
    pub fn into_pair(self) -> Option<TokenPair> {
        match self {
            TokenLookup::Found(pair) => Some(pair),
            TokenLookup::Absent | TokenLookup::Unavailable => None,
        }
    }
}

/// Durable persistence of the credential pair
///
/// Implementations must replace both tokens atomically on `write` — a reader
/// never observes a new access token paired with an old refresh token.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Read the current pair; fails soft when storage is unavailable
    async fn read(&self) -> TokenLookup;

    /// Replace both tokens together; silent no-op when storage is unavailable
    async fn write(&self, pair: &TokenPair);

    /// Remove both tokens; silent no-op when storage is unavailable
    async fn clear(&self);
}

/// File-backed token store
///
/// Persists the pair as one JSON document so the two tokens are written and
/// removed as a unit. A lock serializes writers; readers go through the same
/// lock to avoid observing a partially flushed file.
pub struct FileTokenStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileTokenStore {
    /// Create a store backed by the given file path
    ///
    /// The file and its parent directory are created lazily on first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl TokenStore for FileTokenStore {
    async fn read(&self) -> TokenLookup {
        let _guard = self.lock.lock().await;
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice::<TokenPair>(&bytes) {
                Ok(pair) => TokenLookup::Found(pair),
                Err(e) => {
                    tracing::warn!(path = %self.path.display(), error = %e, "stored token pair is corrupt");
                    TokenLookup::Unavailable
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => TokenLookup::Absent,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "token storage unavailable");
                TokenLookup::Unavailable
            }
        }
    }

    async fn write(&self, pair: &TokenPair) {
        let _guard = self.lock.lock().await;
        let bytes = match serde_json::to_vec(pair) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize token pair");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!(path = %parent.display(), error = %e, "token storage unavailable");
                return;
            }
        }
        if let Err(e) = tokio::fs::write(&self.path, bytes).await {
            tracing::warn!(path = %self.path.display(), error = %e, "token storage unavailable");
        }
    }

    async fn clear(&self) {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "token storage unavailable");
            }
        }
    }
}

/// In-memory token store for tests and short-lived tools
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<TokenPair>>,
}

impl MemoryTokenStore {
    /// Create an empty in-memory store
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TokenStore for MemoryTokenStore {
    async fn read(&self) -> TokenLookup {
        match &*self.slot.lock().await {
            Some(pair) => TokenLookup::Found(pair.clone()),
            None => TokenLookup::Absent,
        }
    }

    async fn write(&self, pair: &TokenPair) {
        *self.slot.lock().await = Some(pair.clone());
    }

    async fn clear(&self) {
        *self.slot.lock().await = None;
    }
}

/// Token store for contexts without persistent storage
///
/// Models the executor running where no durable medium exists: reads report
/// `Unavailable`, writes and clears silently do nothing.
#[derive(Default)]
pub struct UnavailableTokenStore;

impl UnavailableTokenStore {
    /// Create the no-op store
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TokenStore for UnavailableTokenStore {
    async fn read(&self) -> TokenLookup {
        TokenLookup::Unavailable
    }

    async fn write(&self, _pair: &TokenPair) {}

    async fn clear(&self) {}
}
