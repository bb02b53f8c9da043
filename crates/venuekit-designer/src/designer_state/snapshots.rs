use super::DesignerState;
use crate::commands::LayoutCommand;
use crate::persistence::{NamedSnapshot, SnapshotInfo, SnapshotStore};
use venuekit_core::{Result, Scope};

impl DesignerState {
    /// Saves the committed layout of the active scope under `name`.
    pub async fn save_named(&self, store: &dyn SnapshotStore, name: &str) -> Result<()> {
        let scope = self.active;
        let named = NamedSnapshot::new(name, scope, self.committed_snapshot(scope).clone());
        store.save(&self.session_id, &named).await?;
        tracing::info!("Saved {} snapshot '{}'", scope, name);
        Ok(())
    }

    pub async fn list_named(&self, store: &dyn SnapshotStore) -> Result<Vec<SnapshotInfo>> {
        Ok(store.list(&self.session_id).await?)
    }

    /// Loads a named snapshot into the scope it was saved from, as one
    /// undoable step, and makes that scope active.
    pub async fn load_named(&mut self, store: &dyn SnapshotStore, name: &str) -> Result<Scope> {
        let named = store.load(&self.session_id, name).await?;
        let scope = named.scope;
        self.set_active_scope(scope);
        self.dispatch_in(
            scope,
            LayoutCommand::ReplaceLayout {
                snapshot: named.snapshot,
            },
        )?;
        tracing::info!("Loaded {} snapshot '{}'", scope, name);
        Ok(scope)
    }

    pub async fn delete_named(&self, store: &dyn SnapshotStore, name: &str) -> Result<()> {
        store.delete(&self.session_id, name).await?;
        Ok(())
    }
}
