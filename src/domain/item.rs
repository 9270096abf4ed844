// ==========================================
// SubOuts Tracker - Item domain model
// ==========================================
// A unit of material or fabricated part owned by one SubOut.
// A Raw item and its CutToLength counterpart share a barcode.
// ==========================================

use crate::domain::types::{AssignmentState, SendType, SourceType};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub item_id: String,
    pub subout_id: String,

    pub source_type: SourceType,
    pub send_type: SendType,
    pub barcode: Option<String>, // links a raw item to its cut counterpart

    pub description: Option<String>,
    pub quantity: u32,
    pub weight_lbs: f64,

    // ===== assignment links =====
    pub pallet_id: Option<String>,
    pub load_id: Option<String>,
}

impl Item {
    pub fn assignment_state(&self) -> AssignmentState {
        if self.load_id.is_some() {
            AssignmentState::OnLoad
        } else if self.pallet_id.is_some() {
            AssignmentState::OnPallet
        } else {
            AssignmentState::Unassigned
        }
    }

    pub fn is_on_load(&self) -> bool {
        self.load_id.is_some()
    }

    /// Barcode, ignoring blank values.
    pub fn barcode_key(&self) -> Option<&str> {
        self.barcode
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
    }

    /// True when `other` is the opposite side of this item's barcode link.
    pub fn is_counterpart_of(&self, other: &Item) -> bool {
        match (self.barcode_key(), other.barcode_key()) {
            (Some(a), Some(b)) if a == b => {
                self.send_type.barcode_counterpart() == Some(other.send_type)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, send_type: SendType, barcode: Option<&str>) -> Item {
        Item {
            item_id: id.to_string(),
            subout_id: "S1".to_string(),
            source_type: SourceType::PullList,
            send_type,
            barcode: barcode.map(str::to_string),
            description: None,
            quantity: 1,
            weight_lbs: 100.0,
            pallet_id: None,
            load_id: None,
        }
    }

    #[test]
    fn test_assignment_state_prefers_load() {
        let mut it = item("I1", SendType::PartsOnPallets, None);
        assert_eq!(it.assignment_state(), AssignmentState::Unassigned);
        it.pallet_id = Some("P1".to_string());
        assert_eq!(it.assignment_state(), AssignmentState::OnPallet);
        it.load_id = Some("L1".to_string());
        assert_eq!(it.assignment_state(), AssignmentState::OnLoad);
    }

    #[test]
    fn test_counterpart_requires_same_barcode_and_opposite_type() {
        let raw = item("I1", SendType::Raw, Some("BC-1"));
        let cut = item("I2", SendType::CutToLength, Some("BC-1"));
        let other_cut = item("I3", SendType::CutToLength, Some("BC-2"));
        let raw_twin = item("I4", SendType::Raw, Some("BC-1"));

        assert!(raw.is_counterpart_of(&cut));
        assert!(cut.is_counterpart_of(&raw));
        assert!(!raw.is_counterpart_of(&other_cut));
        assert!(!raw.is_counterpart_of(&raw_twin));
    }

    #[test]
    fn test_blank_barcode_is_ignored() {
        let raw = item("I1", SendType::Raw, Some("  "));
        let cut = item("I2", SendType::CutToLength, Some("  "));
        assert_eq!(raw.barcode_key(), None);
        assert!(!raw.is_counterpart_of(&cut));
    }
}
