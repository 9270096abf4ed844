// ==========================================
// SubOuts Tracker - LoadAssignmentRules
// ==========================================
// Barcode mutual exclusion, pallet packing, advisory capacity and
// percent-loaded computation.
// Stateless: every call works on the slice it is given and keeps no
// exclusions between assignment transactions.
// ==========================================

use crate::domain::item::Item;
use crate::domain::load::{Load, Pallet};
use crate::domain::snapshot::SubOutSnapshot;
use crate::domain::types::{CapacityBand, SendType};
use crate::engine::error::{RuleError, RuleResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

// ==========================================
// LoadProgress
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

impl LoadProgress {
    /// Percent loaded to one decimal digit, truncated so that 100.0 is
    /// only reported when every item counts as loaded. Empty -> 0.0.
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        ((self.loaded * 1000) / self.total) as f64 / 10.0
    }

    pub fn is_complete(&self) -> bool {
        self.total > 0 && self.loaded == self.total
    }
}

// ==========================================
// AssignmentPlan
// ==========================================
// What a load assignment transaction should write back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentPlan {
    pub load_id: String,
    pub item_ids: Vec<String>,
    pub pallet_ids: Vec<String>,
}

impl AssignmentPlan {
    pub fn is_empty(&self) -> bool {
        self.item_ids.is_empty() && self.pallet_ids.is_empty()
    }

    /// Applies the plan to caller-owned copies.
    pub fn apply(&self, items: &mut [Item], pallets: &mut [Pallet]) {
        for item in items.iter_mut() {
            if self.item_ids.contains(&item.item_id) {
                item.load_id = Some(self.load_id.clone());
            }
        }
        for pallet in pallets.iter_mut() {
            if self.pallet_ids.contains(&pallet.pallet_id) {
                pallet.load_id = Some(self.load_id.clone());
            }
        }
    }
}

/// Items to place on a pallet. Items inherit the pallet's load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PalletPackingPlan {
    pub pallet_id: String,
    pub item_ids: Vec<String>,
    pub load_id: Option<String>,
}

impl PalletPackingPlan {
    pub fn apply(&self, items: &mut [Item]) {
        for item in items.iter_mut() {
            if self.item_ids.contains(&item.item_id) {
                item.pallet_id = Some(self.pallet_id.clone());
                item.load_id = self.load_id.clone();
            }
        }
    }
}

/// Which sides of a barcode link are selected.
#[derive(Debug, Clone, Copy, Default)]
struct BarcodeSides {
    raw: bool,
    cut: bool,
}

// ==========================================
// LoadAssignmentRules
// ==========================================
pub struct LoadAssignmentRules;

impl LoadAssignmentRules {
    // ==========================================
    // Barcode mutual exclusion
    // ==========================================

    fn selected_sides<'a>(
        items: &'a [Item],
        selected_ids: &[String],
    ) -> BTreeMap<&'a str, BarcodeSides> {
        let selected: HashSet<&str> = selected_ids.iter().map(String::as_str).collect();
        let mut sides: BTreeMap<&str, BarcodeSides> = BTreeMap::new();

        for item in items.iter().filter(|i| selected.contains(i.item_id.as_str())) {
            let Some(barcode) = item.barcode_key() else {
                continue;
            };
            let entry = sides.entry(barcode).or_default();
            match item.send_type {
                SendType::Raw => entry.raw = true,
                SendType::CutToLength => entry.cut = true,
                SendType::PartsOnPallets => {}
            }
        }
        sides
    }

    /// Items still selectable given the current selection.
    ///
    /// # Rules
    /// - Selecting a Raw item hides every CutToLength item with the same barcode
    /// - Selecting a CutToLength item hides every Raw item with the same barcode
    /// - Items without a barcode, and PartsOnPallets items, are never hidden
    ///
    /// Recompute on every selection change. Input order is preserved.
    pub fn eligible_for_assignment(items: &[Item], selected_ids: &[String]) -> Vec<Item> {
        let sides = Self::selected_sides(items, selected_ids);

        items
            .iter()
            .filter(|item| {
                let Some(group) = item.barcode_key().and_then(|b| sides.get(b)) else {
                    return true;
                };
                match item.send_type {
                    SendType::Raw => !group.cut,
                    SendType::CutToLength => !group.raw,
                    SendType::PartsOnPallets => true,
                }
            })
            .cloned()
            .collect()
    }

    /// Rejects a selection that names unknown items or both sides of a barcode.
    pub fn validate_selection(items: &[Item], selected_ids: &[String]) -> RuleResult<()> {
        for id in selected_ids {
            if !items.iter().any(|i| &i.item_id == id) {
                return Err(RuleError::UnknownEntity {
                    entity: "item".to_string(),
                    id: id.clone(),
                });
            }
        }

        let sides = Self::selected_sides(items, selected_ids);
        if let Some((barcode, _)) = sides.iter().find(|(_, s)| s.raw && s.cut) {
            return Err(RuleError::CrossBarcodeConflict {
                barcode: (*barcode).to_string(),
            });
        }
        Ok(())
    }

    /// Loose items offered in the "assign to load" picker.
    ///
    /// Excludes items already on a load, PartsOnPallets items (they ride
    /// on pallets) and items whose barcode counterpart is already loaded.
    pub fn assignable_items(items: &[Item]) -> Vec<Item> {
        items
            .iter()
            .filter(|item| !item.is_on_load())
            .filter(|item| item.send_type != SendType::PartsOnPallets)
            .filter(|item| {
                !items
                    .iter()
                    .any(|other| other.is_on_load() && item.is_counterpart_of(other))
            })
            .cloned()
            .collect()
    }

    // ==========================================
    // Assignment transactions
    // ==========================================

    fn require_load<'a>(snapshot: &'a SubOutSnapshot, load_id: &str) -> RuleResult<&'a Load> {
        snapshot.find_load(load_id).ok_or_else(|| RuleError::UnknownEntity {
            entity: "load".to_string(),
            id: load_id.to_string(),
        })
    }

    /// Assign loose items to a load in one transaction.
    ///
    /// # Rules
    /// - both sides of one barcode in the selection -> CrossBarcodeConflict
    /// - counterpart already on a load -> CrossBarcodeConflict
    /// - PartsOnPallets or palletised item -> PalletItemRule
    pub fn plan_item_assignment(
        snapshot: &SubOutSnapshot,
        load_id: &str,
        selected_ids: &[String],
    ) -> RuleResult<AssignmentPlan> {
        let load = Self::require_load(snapshot, load_id)?;
        Self::validate_selection(&snapshot.items, selected_ids)?;

        for id in selected_ids {
            let Some(item) = snapshot.find_item(id) else {
                continue;
            };
            if item.send_type == SendType::PartsOnPallets || item.pallet_id.is_some() {
                return Err(RuleError::PalletItemRule {
                    item_id: item.item_id.clone(),
                    reason: "travels with its pallet; assign the pallet instead".to_string(),
                });
            }
            let counterpart_loaded = snapshot
                .items
                .iter()
                .any(|other| other.is_on_load() && item.is_counterpart_of(other));
            if counterpart_loaded {
                return Err(RuleError::CrossBarcodeConflict {
                    barcode: item.barcode_key().unwrap_or_default().to_string(),
                });
            }
        }

        let mut item_ids: Vec<String> = Vec::with_capacity(selected_ids.len());
        for id in selected_ids {
            if !item_ids.contains(id) {
                item_ids.push(id.clone());
            }
        }

        Ok(AssignmentPlan {
            load_id: load.load_id.clone(),
            item_ids,
            pallet_ids: Vec::new(),
        })
    }

    /// Assign a pallet to a load; its items follow it onto the load.
    pub fn plan_pallet_assignment(
        snapshot: &SubOutSnapshot,
        load_id: &str,
        pallet_id: &str,
    ) -> RuleResult<AssignmentPlan> {
        let load = Self::require_load(snapshot, load_id)?;
        let pallet = snapshot
            .find_pallet(pallet_id)
            .ok_or_else(|| RuleError::UnknownEntity {
                entity: "pallet".to_string(),
                id: pallet_id.to_string(),
            })?;

        let pallet_items: Vec<&Item> = snapshot.items_on_pallet(&pallet.pallet_id).collect();
        Self::validate_pallet_items(pallet_items.iter().copied())?;

        Ok(AssignmentPlan {
            load_id: load.load_id.clone(),
            item_ids: pallet_items.iter().map(|i| i.item_id.clone()).collect(),
            pallet_ids: vec![pallet.pallet_id.clone()],
        })
    }

    /// Every pallet item must be PartsOnPallets.
    pub fn validate_pallet_items<'a>(items: impl IntoIterator<Item = &'a Item>) -> RuleResult<()> {
        for item in items {
            if item.send_type != SendType::PartsOnPallets {
                return Err(RuleError::PalletSendTypeMismatch {
                    item_id: item.item_id.clone(),
                    send_type: item.send_type,
                });
            }
        }
        Ok(())
    }

    /// Place items on a pallet. A pallet already on a load carries the
    /// new items onto that load; a pallet with no load takes them off
    /// whatever load their previous pallet was on. Items loose on a load
    /// are rejected.
    pub fn plan_pallet_packing(
        snapshot: &SubOutSnapshot,
        pallet_id: &str,
        item_ids: &[String],
    ) -> RuleResult<PalletPackingPlan> {
        let pallet = snapshot
            .find_pallet(pallet_id)
            .ok_or_else(|| RuleError::UnknownEntity {
                entity: "pallet".to_string(),
                id: pallet_id.to_string(),
            })?;

        let mut items = Vec::with_capacity(item_ids.len());
        for id in item_ids {
            let item = snapshot.find_item(id).ok_or_else(|| RuleError::UnknownEntity {
                entity: "item".to_string(),
                id: id.clone(),
            })?;
            items.push(item);
        }
        Self::validate_pallet_items(items.iter().copied())?;
        if let Some(loose) = items.iter().find(|i| i.is_on_load() && i.pallet_id.is_none()) {
            return Err(RuleError::PalletItemRule {
                item_id: loose.item_id.clone(),
                reason: "is already loose on a load".to_string(),
            });
        }

        Ok(PalletPackingPlan {
            pallet_id: pallet.pallet_id.clone(),
            item_ids: items.iter().map(|i| i.item_id.clone()).collect(),
            load_id: pallet.load_id.clone(),
        })
    }

    // ==========================================
    // Capacity (advisory)
    // ==========================================

    /// Pallet weight as weighed, else the sum of its items.
    pub fn pallet_weight(pallet: &Pallet, items: &[Item]) -> f64 {
        pallet.weight_lbs.unwrap_or_else(|| {
            items
                .iter()
                .filter(|i| i.pallet_id.as_deref() == Some(pallet.pallet_id.as_str()))
                .map(|i| i.weight_lbs)
                .sum()
        })
    }

    /// Weight on a load: pallets on the load plus loose items on it.
    /// Items riding on a pallet on the same load are counted once, via the pallet.
    pub fn assigned_weight(load: &Load, items: &[Item], pallets: &[Pallet]) -> f64 {
        let on_load = |id: Option<&str>| id == Some(load.load_id.as_str());

        let pallets_on_load: Vec<&Pallet> = pallets
            .iter()
            .filter(|p| on_load(p.load_id.as_deref()))
            .collect();

        let pallet_weight: f64 = pallets_on_load
            .iter()
            .map(|p| Self::pallet_weight(p, items))
            .sum();

        let loose_weight: f64 = items
            .iter()
            .filter(|i| on_load(i.load_id.as_deref()))
            .filter(|i| {
                !i.pallet_id
                    .as_deref()
                    .is_some_and(|pid| pallets_on_load.iter().any(|p| p.pallet_id == pid))
            })
            .map(|i| i.weight_lbs)
            .sum();

        pallet_weight + loose_weight
    }

    /// capacity - assigned weight. Negative when over capacity.
    pub fn remaining_capacity(load: &Load, items: &[Item], pallets: &[Pallet]) -> f64 {
        load.capacity_lbs - Self::assigned_weight(load, items, pallets)
    }

    /// Advisory colour band.
    ///
    /// # Rules
    /// - used > capacity -> Red
    /// - used > capacity * warning_ratio -> Orange
    /// - otherwise -> Green
    pub fn capacity_band(load: &Load, assigned_weight: f64, warning_ratio: f64) -> CapacityBand {
        if assigned_weight > load.capacity_lbs {
            CapacityBand::Red
        } else if assigned_weight > load.capacity_lbs * warning_ratio {
            CapacityBand::Orange
        } else {
            CapacityBand::Green
        }
    }

    // ==========================================
    // Percent loaded
    // ==========================================

    /// An item counts as loaded when it, or its barcode counterpart, is on any load.
    pub fn load_progress(items: &[Item]) -> LoadProgress {
        let loaded = items
            .iter()
            .filter(|item| {
                item.is_on_load()
                    || items
                        .iter()
                        .any(|other| other.is_on_load() && item.is_counterpart_of(other))
            })
            .count();

        LoadProgress {
            loaded,
            total: items.len(),
        }
    }

    pub fn percent_loaded(items: &[Item]) -> f64 {
        Self::load_progress(items).percent()
    }
}
