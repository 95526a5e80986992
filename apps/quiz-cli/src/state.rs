//! Application state.

use crate::store::JsonFileStore;
use quiz_core::{Session, SnapshotStore};

/// Session loaded from the snapshot file, plus the file to save it back to.
pub struct AppState {
    pub store: JsonFileStore,
    pub session: Session,
}

impl AppState {
    /// Load the saved session, or start empty when nothing was saved yet.
    pub fn open(store: JsonFileStore) -> quiz_core::Result<Self> {
        let session = match store.load()? {
            Some(snapshot) => Session::from_snapshot(snapshot),
            None => {
                tracing::debug!(path = %store.path().display(), "no saved session, starting fresh");
                Session::new()
            }
        };
        Ok(Self { store, session })
    }

    /// Write the current session back to the store.
    pub fn persist(&self) -> quiz_core::Result<()> {
        self.store.save(&self.session.snapshot())
    }
}
