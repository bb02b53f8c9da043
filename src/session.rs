//! A designer bound to its configuration and snapshot store.

use anyhow::Context;
use std::path::Path;
use std::sync::Arc;
use tokio::task::JoinHandle;
use venuekit_designer::{AutoSaver, DesignerState, FileSnapshotStore, SnapshotStore};
use venuekit_settings::{default_config_path, Config};

/// Loads the configuration at `path`, or at the platform default location.
///
/// A missing file yields the defaults; an unreadable or invalid one is an
/// error.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => default_config_path().context("locating configuration file")?,
    };
    if !path.exists() {
        tracing::info!("No configuration at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    Config::load_from_file(&path).with_context(|| format!("loading {}", path.display()))
}

/// Editing session: the designer state, where its snapshots live and the
/// background saver when autosave is on.
pub struct Session {
    pub state: DesignerState,
    store: Arc<dyn SnapshotStore>,
    autosaver: Option<AutoSaver>,
}

impl Session {
    /// Opens a session storing snapshots as files under the configured
    /// directory.
    ///
    /// Autosave needs a running Tokio runtime; outside one it stays off.
    pub fn open(config: &Config) -> anyhow::Result<Self> {
        let dir = config
            .storage
            .resolved_snapshot_dir()
            .context("resolving snapshot directory")?;
        let store: Arc<dyn SnapshotStore> = Arc::new(FileSnapshotStore::new(dir));
        Ok(Self::with_store(config, store))
    }

    pub fn with_store(config: &Config, store: Arc<dyn SnapshotStore>) -> Self {
        let state = DesignerState::from_config(config);
        let autosaver = if config.storage.autosave {
            let saver = AutoSaver::from_current(Arc::clone(&store), state.session_id());
            if saver.is_none() {
                tracing::warn!("Autosave disabled: no async runtime available");
            }
            saver
        } else {
            None
        };
        Self {
            state,
            store,
            autosaver,
        }
    }

    pub fn store(&self) -> &dyn SnapshotStore {
        self.store.as_ref()
    }

    pub fn autosave_enabled(&self) -> bool {
        self.autosaver.is_some()
    }

    /// Hands committed changes to the autosaver. Without autosave they are
    /// dropped. Returns the save task, if one was started.
    pub fn flush_changes(&mut self) -> Option<JoinHandle<()>> {
        let changes = self.state.drain_changes();
        match &self.autosaver {
            Some(saver) => saver.persist(changes),
            None => None,
        }
    }

    /// Saves the active scope under `name`.
    pub async fn save(&self, name: &str) -> venuekit_core::Result<()> {
        self.state.save_named(self.store.as_ref(), name).await
    }

    /// Loads `name` into the scope it was saved from.
    pub async fn load(&mut self, name: &str) -> venuekit_core::Result<venuekit_core::Scope> {
        self.state.load_named(self.store.as_ref(), name).await
    }
}
