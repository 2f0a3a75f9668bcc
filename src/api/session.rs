//! Short-lived analyze sessions
//!
//! One session holds the result of one analyze run between the upload and
//! the per-group downloads. Sessions live in memory behind a mutex, expire
//! after a TTL and are pruned on access; a download does not consume the
//! session, since a user typically fetches several groups.

use crate::export::{output_file_name, GroupExport};
use crate::pipeline::Analysis;
use crate::sheet::Sheet;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Mutex;
use uuid::Uuid;

/// Default session lifetime
pub const DEFAULT_TTL_MINUTES: i64 = 30;

struct Session {
    created_at: DateTime<Utc>,
    groups: Vec<SessionGroup>,
}

struct SessionGroup {
    export: GroupExport,
    confirmed_name: Option<String>,
}

/// Preview of one group, returned by analyze
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSummary {
    pub group_id: String,
    pub row_count: usize,
    pub default_name: String,
}

/// In-memory session store keyed by UUID
pub struct SessionStore {
    ttl: Duration,
    sessions: Mutex<HashMap<Uuid, Session>>,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(Duration::minutes(DEFAULT_TTL_MINUTES))
    }
}

impl SessionStore {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Store an analysis result, returning the new session id
    pub fn create(&self, analysis: Analysis) -> Uuid {
        let id = Uuid::new_v4();
        let session = Session {
            created_at: Utc::now(),
            groups: analysis
                .exports
                .into_iter()
                .map(|export| SessionGroup {
                    export,
                    confirmed_name: None,
                })
                .collect(),
        };

        let mut sessions = self.lock();
        self.prune(&mut sessions);
        sessions.insert(id, session);
        id
    }

    /// Group previews for a session, or `None` if unknown/expired
    pub fn summaries(&self, id: &Uuid) -> Option<Vec<GroupSummary>> {
        let mut sessions = self.lock();
        self.prune(&mut sessions);
        sessions.get(id).map(|session| {
            session
                .groups
                .iter()
                .map(|g| GroupSummary {
                    group_id: g.export.group_id.clone(),
                    row_count: g.export.sheet.row_count(),
                    default_name: g.export.default_name.clone(),
                })
                .collect()
        })
    }

    /// Apply per-group filename overrides. Unknown group ids in `names`
    /// are ignored. Returns (group id, final file name) pairs.
    pub fn confirm(
        &self,
        id: &Uuid,
        names: &HashMap<String, String>,
    ) -> Option<Vec<(String, String)>> {
        let mut sessions = self.lock();
        self.prune(&mut sessions);
        let session = sessions.get_mut(id)?;

        let mut confirmed = Vec::with_capacity(session.groups.len());
        for group in &mut session.groups {
            let override_name = names.get(&group.export.group_id).map(String::as_str);
            let file_name = output_file_name(&group.export, override_name);
            group.confirmed_name = Some(file_name.clone());
            confirmed.push((group.export.group_id.clone(), file_name));
        }
        Some(confirmed)
    }

    /// Sheet and delivered file name for one group
    pub fn artifact(&self, id: &Uuid, group_id: &str) -> Option<(String, Sheet)> {
        let mut sessions = self.lock();
        self.prune(&mut sessions);
        let session = sessions.get(id)?;
        let group = session
            .groups
            .iter()
            .find(|g| g.export.group_id == group_id)?;
        let file_name = group
            .confirmed_name
            .clone()
            .unwrap_or_else(|| group.export.default_name.clone());
        Some((file_name, group.export.sheet.clone()))
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<Uuid, Session>> {
        // No invariants span a panic here; a poisoned lock is recoverable.
        match self.sessions.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    fn prune(&self, sessions: &mut HashMap<Uuid, Session>) {
        let cutoff = Utc::now() - self.ttl;
        sessions.retain(|_, session| session.created_at > cutoff);
    }
}
