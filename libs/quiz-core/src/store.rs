//! Snapshot persistence contract.
//!
//! The engine never writes to disk itself. After each mutation the front end
//! hands a [`Snapshot`] to a [`SnapshotStore`]; a failed save is a warning,
//! the in-memory session stays authoritative.

use crate::error::{QuizError, Result};
use crate::session::SessionState;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;

/// Current snapshot format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// Serialized form of a whole session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
    pub state: SessionState,
}

impl Snapshot {
    pub fn new(state: SessionState) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            saved_at: None,
            state,
        }
    }

    /// Serialize, stamping the save time.
    pub fn to_json(&self) -> Result<String> {
        let stamped = Snapshot {
            saved_at: Some(Utc::now()),
            ..self.clone()
        };
        serde_json::to_string_pretty(&stamped).map_err(QuizError::persistence)
    }

    /// Deserialize, rejecting snapshots from a newer format.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json).map_err(QuizError::persistence)?;
        if snapshot.version > SNAPSHOT_VERSION {
            return Err(QuizError::persistence(format!(
                "snapshot version {} is newer than supported version {}",
                snapshot.version, SNAPSHOT_VERSION
            )));
        }
        Ok(snapshot)
    }
}

/// Storage medium for session snapshots.
pub trait SnapshotStore {
    /// `Ok(None)` when nothing has been saved yet.
    fn load(&self) -> Result<Option<Snapshot>>;
    fn save(&self, snapshot: &Snapshot) -> Result<()>;
}

/// Keeps the serialized snapshot in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    json: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw serialized snapshot, if one was saved.
    pub fn contents(&self) -> Option<String> {
        self.json.borrow().clone()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        self.json
            .borrow()
            .as_deref()
            .map(Snapshot::from_json)
            .transpose()
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        let json = snapshot.to_json()?;
        *self.json.borrow_mut() = Some(json);
        Ok(())
    }
}
