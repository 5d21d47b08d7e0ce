//! Session state controller
//!
//! Holds the process-wide authenticated identity and orchestrates login,
//! logout, rehydration, and background identity refresh. This is an explicit
//! context object — construct one next to whatever owns the UI tree's
//! lifetime and drop it on teardown; there is no module-level singleton.
//!
//! This is also the only place that catches request failures: an expired or
//! invalid token discovered during a background identity fetch is an
//! expected condition and becomes a transition to the anonymous state, not
//! a propagated error. Everything else bubbles up to the caller.
//!
//! Concurrent `login`/`fetch_user` calls are not serialized; each runs to
//! completion and the last one to write the state wins. Callers must not
//! assume single-flight behavior.

use crate::client::ApiClient;
use crate::error::Result;
use crate::types::{LoginRequest, User};
use async_trait::async_trait;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Authentication state of the session
#[derive(Clone, Debug, PartialEq)]
pub enum SessionState {
    /// Process start; rehydration has not completed yet
    Unresolved,
    /// An identity fetch or rehydration succeeded
    Authenticated(User),
    /// No authenticated identity
    Anonymous,
}

/// Observable session state, cheap to clone out of the controller
#[derive(Clone, Debug, PartialEq)]
pub struct SessionSnapshot {
    /// Current authentication state
    pub state: SessionState,
    /// Whether an identity resolution is in flight
    pub loading: bool,
    /// Last authentication failure, surfaced to the UI; cleared on success
    pub error: Option<String>,
}

/// Durable persistence of the session's user identity
///
/// Same fail-soft contract as the token store: an unavailable medium reads
/// as absent and turns writes into silent no-ops.
#[async_trait]
pub trait SessionCache: Send + Sync {
    /// Restore the persisted user, if any
    async fn load(&self) -> Option<User>;

    /// Persist the user; silent no-op when storage is unavailable
    async fn store(&self, user: &User);

    /// Remove the persisted user; silent no-op when storage is unavailable
    async fn clear(&self);
}

/// File-backed session cache (one JSON document holding the user)
pub struct FileSessionCache {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileSessionCache {
    /// Create a cache backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }
}

#[async_trait]
impl SessionCache for FileSessionCache {
    async fn load(&self) -> Option<User> {
        let _guard = self.lock.lock().await;
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session storage unavailable");
                return None;
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "persisted session is corrupt");
                None
            }
        }
    }

    async fn store(&self, user: &User) {
        let _guard = self.lock.lock().await;
        let bytes = match serde_json::to_vec(user) {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(error = %e, "failed to serialize session user");
                return;
            }
        };
        if let Some(parent) = self.path.parent() {
            if let Err(e) = tokio::fs::create_dir_all(parent).await {
                tracing::warn!(path = %parent.display(), error = %e, "session storage unavailable");
                return;
            }
        }
        if let Err(e) = tokio::fs::write(&self.path, bytes).await {
            tracing::warn!(path = %self.path.display(), error = %e, "session storage unavailable");
        }
    }

    async fn clear(&self) {
        let _guard = self.lock.lock().await;
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "session storage unavailable");
            }
        }
    }
}

/// In-memory session cache for tests and ephemeral contexts
#[derive(Default)]
pub struct MemorySessionCache {
    slot: Mutex<Option<User>>,
}

impl MemorySessionCache {
    /// Create an empty in-memory cache
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionCache for MemorySessionCache {
    async fn load(&self) -> Option<User> {
        self.slot.lock().await.clone()
    }

    async fn store(&self, user: &User) {
        *self.slot.lock().await = Some(user.clone());
    }

    async fn clear(&self) {
        *self.slot.lock().await = None;
    }
}

/// Owns the current authenticated identity and its transitions
pub struct SessionController {
    client: Arc<ApiClient>,
    cache: Arc<dyn SessionCache>,
    snapshot: RwLock<SessionSnapshot>,
}

impl SessionController {
    /// Create a controller in the unresolved state
    ///
    /// `loading` starts `true`; call [`rehydrate`](Self::rehydrate) once at
    /// process start to resolve it.
    pub fn new(client: Arc<ApiClient>, cache: Arc<dyn SessionCache>) -> Self {
        Self {
            client,
            cache,
            snapshot: RwLock::new(SessionSnapshot {
                state: SessionState::Unresolved,
                loading: true,
                error: None,
            }),
        }
    }

    /// Current state, loading flag, and error, as one consistent snapshot
    pub async fn snapshot(&self) -> SessionSnapshot {
        self.snapshot.read().await.clone()
    }

    /// The authenticated user, if any
    pub async fn user(&self) -> Option<User> {
        match &self.snapshot.read().await.state {
            SessionState::Authenticated(user) => Some(user.clone()),
            _ => None,
        }
    }

    /// Whether the session is currently authenticated
    pub async fn is_authenticated(&self) -> bool {
        matches!(
            self.snapshot.read().await.state,
            SessionState::Authenticated(_)
        )
    }

    /// Restore the session from durable storage, without a network call
    ///
    /// A cached user resolves to authenticated, otherwise anonymous.
    /// `loading` always resets to `false` afterwards — it is never
    /// rehydrated.
    pub async fn rehydrate(&self) {
        let cached = self.cache.load().await;
        let mut snapshot = self.snapshot.write().await;
        snapshot.state = match cached {
            Some(user) => {
                tracing::debug!(username = %user.username, "session rehydrated");
                SessionState::Authenticated(user)
            }
            None => SessionState::Anonymous,
        };
        snapshot.loading = false;
    }

    /// Log in and resolve the authenticated identity
    ///
    /// Performs the network login (which persists the token pair), then
    /// fetches the identity. Both steps must succeed; on any failure the
    /// prior state is retained, the error message is attached to the
    /// session, and the failure propagates to the caller.
    pub async fn login(&self, username: &str, password: &str) -> Result<User> {
        {
            let mut snapshot = self.snapshot.write().await;
            snapshot.loading = true;
            snapshot.error = None;
        }

        let result = self.login_inner(username, password).await;

        let mut snapshot = self.snapshot.write().await;
        snapshot.loading = false;
        match result {
            Ok(user) => {
                snapshot.state = SessionState::Authenticated(user.clone());
                snapshot.error = None;
                Ok(user)
            }
            Err(e) => {
                snapshot.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    async fn login_inner(&self, username: &str, password: &str) -> Result<User> {
        let auth = self.client.auth();
        auth.login(&LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        })
        .await?;
        let user = auth.me().await?;
        self.cache.store(&user).await;
        Ok(user)
    }

    /// Drop the session: clear tokens and cache, become anonymous
    ///
    /// Succeeds without a network call and is idempotent.
    pub async fn logout(&self) {
        self.client.auth().logout().await;
        self.cache.clear().await;
        let mut snapshot = self.snapshot.write().await;
        snapshot.state = SessionState::Anonymous;
        snapshot.error = None;
    }

    /// Refresh the identity from the backend using the stored credential
    ///
    /// Failures are not propagated: a rejected token during a background
    /// check is expected, so the tokens and cached user are cleared and the
    /// session becomes anonymous.
    pub async fn fetch_user(&self) {
        {
            let mut snapshot = self.snapshot.write().await;
            snapshot.loading = true;
        }

        let result = self.client.auth().me().await;

        match result {
            Ok(user) => {
                self.cache.store(&user).await;
                let mut snapshot = self.snapshot.write().await;
                snapshot.state = SessionState::Authenticated(user);
                snapshot.loading = false;
            }
            Err(e) => {
                tracing::debug!(error = %e, "identity fetch failed, clearing session");
                self.client.tokens().clear().await;
                self.cache.clear().await;
                let mut snapshot = self.snapshot.write().await;
                snapshot.state = SessionState::Anonymous;
                snapshot.loading = false;
            }
        }
    }

    /// Replace the session user locally, e.g. after a profile update
    pub async fn set_user(&self, user: User) {
        self.cache.store(&user).await;
        let mut snapshot = self.snapshot.write().await;
        snapshot.state = SessionState::Authenticated(user);
    }

    /// Discard the attached error message
    pub async fn clear_error(&self) {
        self.snapshot.write().await.error = None;
    }
}
