//! Isolated per-user dashboard sessions.

use crate::cache::UploadCache;
use crate::datasets::{ListeningEvent, SalesRecord};
use crate::table::CleanedTable;
use moka::sync::Cache;
use parking_lot::Mutex;
use pulseboard_common::{DashError, Result, SessionId};
use pulseboard_config::CacheConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Category and region selection of the sales dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalesFilters {
    /// Product categories shown in the by-product chart
    pub categories: BTreeSet<String>,
    /// Regions shown in the by-region chart
    pub regions: BTreeSet<String>,
}

impl SalesFilters {
    /// Selects every category and region present in `table`.
    pub fn all_of(table: &CleanedTable<SalesRecord>) -> Self {
        Self {
            categories: table.iter().map(|r| r.product_category.clone()).collect(),
            regions: table.iter().map(|r| r.region.clone()).collect(),
        }
    }
}

/// State owned by one session.
#[derive(Debug)]
pub struct Session {
    id: SessionId,
    /// Cached sales upload
    pub sales: UploadCache<SalesRecord>,
    /// Cached listening upload
    pub listening: UploadCache<ListeningEvent>,
    /// Explicit sales selection; `None` means everything in the current upload
    pub sales_filters: Option<SalesFilters>,
}

impl Session {
    /// Creates an empty session.
    pub fn new(id: SessionId) -> Self {
        Self {
            id,
            sales: UploadCache::new(),
            listening: UploadCache::new(),
            sales_filters: None,
        }
    }

    /// Identity of the session.
    pub const fn id(&self) -> SessionId {
        self.id
    }
}

/// Handle to a session shared between the store and its caller.
pub type SessionHandle = Arc<Mutex<Session>>;

/// Bounded map of live sessions; idle sessions expire.
#[derive(Clone)]
pub struct SessionStore {
    sessions: Cache<SessionId, SessionHandle>,
}

impl std::fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionStore")
            .field("sessions", &self.sessions.entry_count())
            .finish()
    }
}

impl SessionStore {
    /// Creates a store sized and timed by `config`.
    pub fn new(config: &CacheConfig) -> Self {
        let sessions = Cache::builder()
            .max_capacity(config.max_sessions)
            .time_to_idle(Duration::from_secs(config.session_idle_secs))
            .build();

        info!(
            max_sessions = config.max_sessions,
            idle_secs = config.session_idle_secs,
            "Created session store"
        );
        Self { sessions }
    }

    /// Opens a fresh session and returns its id.
    pub fn open(&self) -> SessionId {
        let id = SessionId::new();
        self.sessions
            .insert(id, Arc::new(Mutex::new(Session::new(id))));
        debug!(session = %id, "Opened session");
        id
    }

    /// Looks up a live session.
    pub fn get(&self, id: SessionId) -> Result<SessionHandle> {
        self.sessions
            .get(&id)
            .ok_or_else(|| DashError::session_not_found(id))
    }

    /// Runs `f` with exclusive access to one session.
    pub fn with_session<T, F>(&self, id: SessionId, f: F) -> Result<T>
    where
        F: FnOnce(&mut Session) -> Result<T>,
    {
        let handle = self.get(id)?;
        let mut session = handle.lock();
        f(&mut session)
    }

    /// Ends a session and drops its cached tables.
    pub fn close(&self, id: SessionId) {
        self.sessions.invalidate(&id);
        debug!(session = %id, "Closed session");
    }

    /// Whether `id` is live.
    pub fn contains(&self, id: SessionId) -> bool {
        self.sessions.contains_key(&id)
    }
}
