use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::persona::PersonaRecord;
use super::snapshot::ProfileSnapshot;

/// A completed analysis kept for later recall. Never edited after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub id: Uuid,
    pub handle: String,
    pub snapshot: ProfileSnapshot,
    pub persona: PersonaRecord,
    pub created_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(
        handle: impl Into<String>,
        snapshot: ProfileSnapshot,
        persona: PersonaRecord,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            handle: handle.into(),
            snapshot,
            persona,
            created_at,
        }
    }
}
