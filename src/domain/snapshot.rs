// ==========================================
// SubOuts Tracker - SubOut snapshot
// ==========================================
// Immutable read view handed to the rule engines: one SubOut with
// the items, loads and pallets it owns.
// ==========================================

use crate::domain::item::Item;
use crate::domain::load::{Load, Pallet};
use crate::domain::subout::SubOut;
use crate::domain::types::LoadDirection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubOutSnapshot {
    pub subout: SubOut,
    #[serde(default)]
    pub items: Vec<Item>,
    #[serde(default)]
    pub loads: Vec<Load>,
    #[serde(default)]
    pub pallets: Vec<Pallet>,
}

impl SubOutSnapshot {
    pub fn new(subout: SubOut) -> Self {
        Self {
            subout,
            items: Vec::new(),
            loads: Vec::new(),
            pallets: Vec::new(),
        }
    }

    pub fn loads_in(&self, direction: LoadDirection) -> impl Iterator<Item = &Load> {
        self.loads.iter().filter(move |l| l.direction == direction)
    }

    pub fn find_item(&self, item_id: &str) -> Option<&Item> {
        self.items.iter().find(|i| i.item_id == item_id)
    }

    pub fn find_load(&self, load_id: &str) -> Option<&Load> {
        self.loads.iter().find(|l| l.load_id == load_id)
    }

    pub fn find_pallet(&self, pallet_id: &str) -> Option<&Pallet> {
        self.pallets.iter().find(|p| p.pallet_id == pallet_id)
    }

    pub fn items_on_pallet<'a>(&'a self, pallet_id: &'a str) -> impl Iterator<Item = &'a Item> {
        self.items
            .iter()
            .filter(move |i| i.pallet_id.as_deref() == Some(pallet_id))
    }
}
