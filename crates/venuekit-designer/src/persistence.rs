//! Named snapshot storage.
//!
//! Snapshots are stored per session under a name. The [`SnapshotStore`]
//! trait hides the backend; [`MemorySnapshotStore`] keeps JSON in memory
//! and [`FileSnapshotStore`] writes one JSON file per snapshot.

use crate::designer_state::LayoutChange;
use crate::model::LayoutSnapshot;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use venuekit_core::{Scope, StoreError};

/// Current payload version written by the stores.
pub const SNAPSHOT_FORMAT_VERSION: &str = "1.0";

const MAX_NAME_LEN: usize = 128;

/// A layout snapshot saved under a name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedSnapshot {
    pub name: String,
    pub scope: Scope,
    pub saved_at: DateTime<Utc>,
    #[serde(default = "default_format_version")]
    pub format_version: String,
    pub snapshot: LayoutSnapshot,
}

fn default_format_version() -> String {
    SNAPSHOT_FORMAT_VERSION.to_string()
}

impl NamedSnapshot {
    pub fn new(name: impl Into<String>, scope: Scope, snapshot: LayoutSnapshot) -> Self {
        Self {
            name: name.into(),
            scope,
            saved_at: Utc::now(),
            format_version: default_format_version(),
            snapshot,
        }
    }

    pub fn info(&self) -> SnapshotInfo {
        SnapshotInfo {
            name: self.name.clone(),
            scope: self.scope,
            saved_at: self.saved_at,
        }
    }

    pub fn to_json(&self) -> Result<String, StoreError> {
        serde_json::to_string_pretty(self).map_err(|e| StoreError::Serialization {
            reason: e.to_string(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        serde_json::from_str(json).map_err(|e| StoreError::Serialization {
            reason: e.to_string(),
        })
    }
}

/// Listing entry for a stored snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    pub name: String,
    pub scope: Scope,
    pub saved_at: DateTime<Utc>,
}

/// Backend for named snapshots, keyed by session and name.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Snapshots of a session, ordered by name.
    async fn list(&self, session: &str) -> Result<Vec<SnapshotInfo>, StoreError>;

    /// Stores `snapshot` under its name, replacing any previous one.
    async fn save(&self, session: &str, snapshot: &NamedSnapshot) -> Result<(), StoreError>;

    async fn load(&self, session: &str, name: &str) -> Result<NamedSnapshot, StoreError>;

    async fn delete(&self, session: &str, name: &str) -> Result<(), StoreError>;
}

/// Rejects names that are empty, too long, or not usable as a file stem.
pub fn validate_name(name: &str) -> Result<(), StoreError> {
    let trimmed = name.trim();
    let invalid = trimmed.is_empty()
        || trimmed != name
        || name.len() > MAX_NAME_LEN
        || name.starts_with('.')
        || name
            .chars()
            .any(|c| matches!(c, '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|') || c.is_control());
    if invalid {
        return Err(StoreError::InvalidName {
            name: name.to_string(),
        });
    }
    Ok(())
}

/// In-process store. Payloads are kept serialized so a load always returns
/// an independent copy.
#[derive(Debug, Default)]
pub struct MemorySnapshotStore {
    entries: Mutex<HashMap<String, BTreeMap<String, String>>>,
}

impl MemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SnapshotStore for MemorySnapshotStore {
    async fn list(&self, session: &str) -> Result<Vec<SnapshotInfo>, StoreError> {
        let entries = self.entries.lock();
        let Some(named) = entries.get(session) else {
            return Ok(Vec::new());
        };
        named
            .values()
            .map(|json| NamedSnapshot::from_json(json).map(|s| s.info()))
            .collect()
    }

    async fn save(&self, session: &str, snapshot: &NamedSnapshot) -> Result<(), StoreError> {
        validate_name(&snapshot.name)?;
        let json = snapshot.to_json()?;
        self.entries
            .lock()
            .entry(session.to_string())
            .or_default()
            .insert(snapshot.name.clone(), json);
        Ok(())
    }

    async fn load(&self, session: &str, name: &str) -> Result<NamedSnapshot, StoreError> {
        let json = self
            .entries
            .lock()
            .get(session)
            .and_then(|named| named.get(name).cloned())
            .ok_or_else(|| not_found(session, name))?;
        NamedSnapshot::from_json(&json)
    }

    async fn delete(&self, session: &str, name: &str) -> Result<(), StoreError> {
        self.entries
            .lock()
            .get_mut(session)
            .and_then(|named| named.remove(name))
            .map(|_| ())
            .ok_or_else(|| not_found(session, name))
    }
}

/// Store writing `<root>/<session>/<name>.json`.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    root: PathBuf,
}

impl FileSnapshotStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn session_dir(&self, session: &str) -> Result<PathBuf, StoreError> {
        validate_name(session)?;
        Ok(self.root.join(session))
    }

    fn snapshot_path(&self, session: &str, name: &str) -> Result<PathBuf, StoreError> {
        validate_name(name)?;
        Ok(self.session_dir(session)?.join(format!("{}.json", name)))
    }
}

#[async_trait]
impl SnapshotStore for FileSnapshotStore {
    async fn list(&self, session: &str) -> Result<Vec<SnapshotInfo>, StoreError> {
        let dir = self.session_dir(session)?;
        let mut reader = match tokio::fs::read_dir(&dir).await {
            Ok(reader) => reader,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(backend(e)),
        };

        let mut infos = Vec::new();
        while let Some(entry) = reader.next_entry().await.map_err(backend)? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let json = tokio::fs::read_to_string(&path).await.map_err(backend)?;
            match NamedSnapshot::from_json(&json) {
                Ok(snapshot) => infos.push(snapshot.info()),
                Err(e) => tracing::warn!("Skipping unreadable snapshot {}: {}", path.display(), e),
            }
        }
        infos.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(infos)
    }

    async fn save(&self, session: &str, snapshot: &NamedSnapshot) -> Result<(), StoreError> {
        let path = self.snapshot_path(session, &snapshot.name)?;
        let json = snapshot.to_json()?;
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(backend)?;
        }
        tokio::fs::write(&path, json).await.map_err(backend)?;
        tracing::debug!("Saved snapshot {} to {}", snapshot.name, path.display());
        Ok(())
    }

    async fn load(&self, session: &str, name: &str) -> Result<NamedSnapshot, StoreError> {
        let path = self.snapshot_path(session, name)?;
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(not_found(session, name))
            }
            Err(e) => return Err(backend(e)),
        };
        NamedSnapshot::from_json(&json)
    }

    async fn delete(&self, session: &str, name: &str) -> Result<(), StoreError> {
        let path = self.snapshot_path(session, name)?;
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(not_found(session, name)),
            Err(e) => Err(backend(e)),
        }
    }
}

fn not_found(session: &str, name: &str) -> StoreError {
    StoreError::NotFound {
        session: session.to_string(),
        name: name.to_string(),
    }
}

fn backend(e: std::io::Error) -> StoreError {
    StoreError::Backend {
        reason: e.to_string(),
    }
}

/// Name under which autosaves of a scope are stored.
pub fn autosave_name(scope: Scope) -> String {
    format!("autosave-{}", scope)
}

/// Persists layout changes in the background.
///
/// Saves are fire-and-forget: the editor never waits for them and
/// failures are only logged.
#[derive(Clone)]
pub struct AutoSaver {
    store: Arc<dyn SnapshotStore>,
    session: String,
    handle: Handle,
}

impl AutoSaver {
    pub fn new(store: Arc<dyn SnapshotStore>, session: impl Into<String>, handle: Handle) -> Self {
        Self {
            store,
            session: session.into(),
            handle,
        }
    }

    /// Uses the runtime of the calling context, if there is one.
    pub fn from_current(store: Arc<dyn SnapshotStore>, session: impl Into<String>) -> Option<Self> {
        Handle::try_current()
            .ok()
            .map(|handle| Self::new(store, session, handle))
    }

    pub fn session(&self) -> &str {
        &self.session
    }

    /// Saves the latest snapshot of every scope touched by `changes`.
    pub fn persist(&self, changes: Vec<LayoutChange>) -> Option<JoinHandle<()>> {
        let mut latest: BTreeMap<Scope, LayoutSnapshot> = BTreeMap::new();
        for change in changes {
            latest.insert(change.scope, change.snapshot);
        }
        if latest.is_empty() {
            return None;
        }

        let store = Arc::clone(&self.store);
        let session = self.session.clone();
        Some(self.handle.spawn(async move {
            for (scope, snapshot) in latest {
                let named = NamedSnapshot::new(autosave_name(scope), scope, snapshot);
                if let Err(e) = store.save(&session, &named).await {
                    tracing::warn!("Autosave of {} failed: {}", scope, e);
                }
            }
        }))
    }
}
