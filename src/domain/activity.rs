// ==========================================
// SubOuts Tracker - Activity timeline model
// ==========================================
// Append-only audit record. Entries are never mutated or deleted
// once written; the data layer owns the append.
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

// ==========================================
// ActivityEntry
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivityEntry {
    pub entry_id: String,
    pub subout_id: String,
    pub kind: ActivityKind,
    pub description: String,
    pub actor: String,
    pub at: NaiveDateTime,

    /// Structured change details (from/to values, affected ids).
    pub payload_json: Option<JsonValue>,
}

// ==========================================
// ActivityKind
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivityKind {
    Created,
    Updated,
    StatusChanged,
    LoadCreated,
    LoadStatusChanged,
    PalletCreated,
    PalletStatusChanged,
    ItemsAssigned,
    PalletAssigned,
    Deleted,
}

impl ActivityKind {
    /// Storage string.
    pub fn as_str(&self) -> &'static str {
        match self {
            ActivityKind::Created => "Created",
            ActivityKind::Updated => "Updated",
            ActivityKind::StatusChanged => "StatusChanged",
            ActivityKind::LoadCreated => "LoadCreated",
            ActivityKind::LoadStatusChanged => "LoadStatusChanged",
            ActivityKind::PalletCreated => "PalletCreated",
            ActivityKind::PalletStatusChanged => "PalletStatusChanged",
            ActivityKind::ItemsAssigned => "ItemsAssigned",
            ActivityKind::PalletAssigned => "PalletAssigned",
            ActivityKind::Deleted => "Deleted",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Created" => Some(ActivityKind::Created),
            "Updated" => Some(ActivityKind::Updated),
            "StatusChanged" => Some(ActivityKind::StatusChanged),
            "LoadCreated" => Some(ActivityKind::LoadCreated),
            "LoadStatusChanged" => Some(ActivityKind::LoadStatusChanged),
            "PalletCreated" => Some(ActivityKind::PalletCreated),
            "PalletStatusChanged" => Some(ActivityKind::PalletStatusChanged),
            "ItemsAssigned" => Some(ActivityKind::ItemsAssigned),
            "PalletAssigned" => Some(ActivityKind::PalletAssigned),
            "Deleted" => Some(ActivityKind::Deleted),
            _ => None,
        }
    }
}

impl ActivityEntry {
    pub fn new(
        entry_id: String,
        subout_id: String,
        kind: ActivityKind,
        description: String,
        actor: String,
        at: NaiveDateTime,
    ) -> Self {
        Self {
            entry_id,
            subout_id,
            kind,
            description,
            actor,
            at,
            payload_json: None,
        }
    }

    /// Attaches a serialized payload.
    pub fn with_payload<T: Serialize>(mut self, payload: &T) -> Self {
        self.payload_json = serde_json::to_value(payload).ok();
        self
    }
}
