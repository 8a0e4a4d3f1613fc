//! In-memory session store.
//!
//! Each browser session holds its own API keys and last generated
//! summary, in memory only; nothing is persisted to disk. Sessions are
//! independent, so no coordination beyond the store lock is needed.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use uuid::Uuid;

/// The two per-session API keys.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Issue-tracker API key.
    pub linear_api_key: String,
    /// Completion API key.
    pub anthropic_api_key: String,
}

/// One user session.
#[derive(Debug, Clone)]
pub struct Session {
    /// Session identifier, carried in the session cookie.
    pub id: Uuid,
    /// Validated API keys; `None` until the key form succeeds.
    pub credentials: Option<Credentials>,
    /// Last generated summary, kept for the download endpoint.
    pub last_summary: Option<String>,
}

impl Session {
    fn new(id: Uuid) -> Self {
        Self {
            id,
            credentials: None,
            last_summary: None,
        }
    }
}

/// Shared map of live sessions.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh keyless session and return its id.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.inner.write().await.insert(id, Session::new(id));
        id
    }

    /// The credentials of a session, if it exists and has submitted keys.
    pub async fn credentials(&self, id: Uuid) -> Option<Credentials> {
        self.inner
            .read()
            .await
            .get(&id)
            .and_then(|s| s.credentials.clone())
    }

    /// Store validated credentials on a session, creating it if needed.
    pub async fn store_credentials(&self, id: Uuid, credentials: Credentials) {
        let mut sessions = self.inner.write().await;
        let session = sessions.entry(id).or_insert_with(|| Session::new(id));
        session.credentials = Some(credentials);
    }

    /// Explicit teardown: drop a session's keys and summary.
    ///
    /// The session itself survives so the user lands back on the key
    /// form rather than losing the cookie.
    pub async fn clear_keys(&self, id: Uuid) {
        if let Some(session) = self.inner.write().await.get_mut(&id) {
            session.credentials = None;
            session.last_summary = None;
        }
    }

    /// Remember the last generated summary for download.
    pub async fn store_summary(&self, id: Uuid, summary: String) {
        if let Some(session) = self.inner.write().await.get_mut(&id) {
            session.last_summary = Some(summary);
        }
    }

    /// The last generated summary, if any.
    pub async fn summary(&self, id: Uuid) -> Option<String> {
        self.inner
            .read()
            .await
            .get(&id)
            .and_then(|s| s.last_summary.clone())
    }
}
