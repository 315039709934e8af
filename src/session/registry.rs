//! Session registry holding isolated per-session state slots.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};
use uuid::Uuid;

use super::state::SessionState;
use crate::error::SessionError;

/// One session's state behind its own lock.
///
/// Interactions on a session are serialized by this mutex; sessions never
/// share a lock with each other.
pub type SessionSlot = Arc<Mutex<SessionState>>;

/// How often the expiry task sweeps idle sessions.
pub const EXPIRY_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);

struct Entry {
    slot: SessionSlot,
    last_active: DateTime<Utc>,
}

impl Entry {
    fn new() -> Self {
        Self {
            slot: Arc::new(Mutex::new(SessionState::new())),
            last_active: Utc::now(),
        }
    }
}

/// In-memory map of session id → state.
///
/// Every lookup refreshes the session's activity stamp; sessions left idle
/// longer than the configured limit are dropped by [`spawn_expiry_task`].
pub struct SessionRegistry {
    sessions: RwLock<HashMap<Uuid, Entry>>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            sessions: RwLock::new(HashMap::new()),
        })
    }

    /// Start a fresh, unauthenticated session.
    pub async fn create(&self) -> Uuid {
        let id = Uuid::new_v4();
        self.sessions
            .write()
            .await
            .insert(id, Entry::new());
        info!(session_id = %id, "Session created");
        id
    }

    /// Look up a session's slot and mark the session active.
    pub async fn slot(&self, id: Uuid) -> Result<SessionSlot, SessionError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions.get_mut(&id).ok_or(SessionError::NotFound { id })?;
        entry.last_active = Utc::now();
        Ok(entry.slot.clone())
    }

    /// Snapshot of a session's current state.
    pub async fn snapshot(&self, id: Uuid) -> Result<SessionState, SessionError> {
        let slot = self.slot(id).await?;
        let state = slot.lock().await;
        Ok(state.clone())
    }

    /// Drop a session. Returns false if it did not exist.
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.sessions.write().await.remove(&id).is_some();
        if removed {
            info!(session_id = %id, "Session removed");
        }
        removed
    }

    /// Drop every session untouched for longer than `max_idle`.
    /// Returns the number of sessions expired.
    pub async fn expire_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();

        sessions.retain(|id, entry| {
            let keep = entry.last_active >= cutoff;
            if !keep {
                debug!(session_id = %id, last_active = %entry.last_active, "Session expired");
            }
            keep
        });

        let expired = before - sessions.len();
        if expired > 0 {
            info!(expired, remaining = sessions.len(), "Expired idle sessions");
        }
        expired
    }

    /// Number of live sessions.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

/// Spawn a background task that periodically drops idle sessions.
pub fn spawn_expiry_task(
    registry: Arc<SessionRegistry>,
    max_idle: Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(EXPIRY_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            registry.expire_idle(max_idle).await;
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_snapshot() {
        let registry = SessionRegistry::new();
        assert!(registry.is_empty().await);

        let id = registry.create().await;
        let state = registry.snapshot(id).await.unwrap();
        assert!(!state.progress().is_authenticated());
        assert!(state.messages().is_empty());
        assert_eq!(registry.len().await, 1);
    }

    #[tokio::test]
    async fn unknown_session_is_not_found() {
        let registry = SessionRegistry::new();
        let id = Uuid::new_v4();
        match registry.snapshot(id).await {
            Err(SessionError::NotFound { id: missing }) => assert_eq!(missing, id),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn sessions_are_isolated() {
        let registry = SessionRegistry::new();
        let a = registry.create().await;
        let b = registry.create().await;

        {
            let slot = registry.slot(a).await.unwrap();
            let mut state = slot.lock().await;
            *state = state.clone().authenticate().mark_resume_uploaded();
        }

        let a_state = registry.snapshot(a).await.unwrap();
        let b_state = registry.snapshot(b).await.unwrap();
        assert!(a_state.progress().can_access_intake());
        assert!(!b_state.progress().is_authenticated());
        assert_eq!(b_state.progress().completion_percent(), 0);
    }

    #[tokio::test]
    async fn remove_drops_session() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;
        assert!(registry.remove(id).await);
        assert!(!registry.remove(id).await);
        assert!(registry.snapshot(id).await.is_err());
    }

    #[tokio::test]
    async fn idle_sessions_expire_and_active_ones_survive() {
        let registry = SessionRegistry::new();
        let idle = registry.create().await;
        let active = registry.create().await;

        tokio::time::sleep(std::time::Duration::from_millis(200)).await;
        registry.slot(active).await.unwrap();

        let expired = registry.expire_idle(Duration::milliseconds(100)).await;
        assert_eq!(expired, 1);
        assert_eq!(registry.len().await, 1);
        assert!(matches!(
            registry.snapshot(idle).await,
            Err(SessionError::NotFound { .. })
        ));
        assert!(registry.snapshot(active).await.is_ok());
    }

    #[tokio::test]
    async fn anonymous_sessions_do_not_accumulate() {
        let registry = SessionRegistry::new();
        for _ in 0..1000 {
            registry.create().await;
        }
        assert_eq!(registry.len().await, 1000);

        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
        assert_eq!(registry.expire_idle(Duration::milliseconds(10)).await, 1000);
        assert!(registry.is_empty().await);
    }

    #[tokio::test]
    async fn fresh_sessions_are_not_expired() {
        let registry = SessionRegistry::new();
        let id = registry.create().await;
        assert_eq!(registry.expire_idle(Duration::minutes(30)).await, 0);
        assert!(registry.snapshot(id).await.is_ok());
    }
}
