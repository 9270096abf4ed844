// ==========================================
// SubOuts Tracker - store collaborator
// ==========================================
// Snapshot reads and write-backs owned by the external data layer.
// The rule engines decide what changes; the store makes it durable,
// arbitrates concurrent writes and applies cascades atomically.
// ==========================================

use crate::domain::activity::ActivityEntry;
use crate::domain::item::Item;
use crate::domain::load::{Load, Pallet};
use crate::domain::snapshot::SubOutSnapshot;
use crate::domain::subout::SubOut;
use crate::engine::load_assignment::{AssignmentPlan, PalletPackingPlan};
use crate::engine::subout_rules::DeletionPlan;
use async_trait::async_trait;
use std::collections::BTreeMap;
use tokio::sync::RwLock;

#[async_trait]
pub trait SubOutStore: Send + Sync {
    // ===== reads =====
    async fn list_subout_ids(&self) -> anyhow::Result<Vec<String>>;
    async fn load_snapshot(&self, subout_id: &str) -> anyhow::Result<Option<SubOutSnapshot>>;
    async fn lot_number_exists(&self, job: &str, lot_number: &str) -> anyhow::Result<bool>;
    async fn list_activity(&self, subout_id: &str) -> anyhow::Result<Vec<ActivityEntry>>;

    // ===== write-backs =====
    async fn insert_subout(&self, subout: SubOut) -> anyhow::Result<()>;
    async fn save_subout(&self, subout: SubOut) -> anyhow::Result<()>;
    async fn insert_item(&self, item: Item) -> anyhow::Result<()>;
    async fn upsert_load(&self, load: Load) -> anyhow::Result<()>;
    async fn upsert_pallet(&self, pallet: Pallet) -> anyhow::Result<()>;
    async fn apply_assignment(&self, plan: &AssignmentPlan) -> anyhow::Result<()>;
    async fn apply_packing(&self, plan: &PalletPackingPlan) -> anyhow::Result<()>;
    async fn delete_cascade(&self, plan: &DeletionPlan) -> anyhow::Result<()>;
    /// Append-only.
    async fn append_activity(&self, entry: ActivityEntry) -> anyhow::Result<()>;
}

// ==========================================
// InMemorySubOutStore
// ==========================================
#[derive(Debug, Default)]
struct StoreState {
    subouts: BTreeMap<String, SubOut>,
    items: Vec<Item>,
    loads: Vec<Load>,
    pallets: Vec<Pallet>,
    activity: Vec<ActivityEntry>,
}

/// Store double for tests and embedded use. Each write runs under a
/// single write lock.
#[derive(Debug, Default)]
pub struct InMemorySubOutStore {
    state: RwLock<StoreState>,
}

impl InMemorySubOutStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SubOutStore for InMemorySubOutStore {
    async fn list_subout_ids(&self) -> anyhow::Result<Vec<String>> {
        Ok(self.state.read().await.subouts.keys().cloned().collect())
    }

    async fn load_snapshot(&self, subout_id: &str) -> anyhow::Result<Option<SubOutSnapshot>> {
        let state = self.state.read().await;
        let Some(subout) = state.subouts.get(subout_id) else {
            return Ok(None);
        };
        Ok(Some(SubOutSnapshot {
            subout: subout.clone(),
            items: state
                .items
                .iter()
                .filter(|i| i.subout_id == subout_id)
                .cloned()
                .collect(),
            loads: state
                .loads
                .iter()
                .filter(|l| l.subout_id == subout_id)
                .cloned()
                .collect(),
            pallets: state
                .pallets
                .iter()
                .filter(|p| p.subout_id == subout_id)
                .cloned()
                .collect(),
        }))
    }

    async fn lot_number_exists(&self, job: &str, lot_number: &str) -> anyhow::Result<bool> {
        Ok(self
            .state
            .read()
            .await
            .subouts
            .values()
            .any(|s| s.job == job && s.lot_number == lot_number))
    }

    async fn list_activity(&self, subout_id: &str) -> anyhow::Result<Vec<ActivityEntry>> {
        Ok(self
            .state
            .read()
            .await
            .activity
            .iter()
            .filter(|e| e.subout_id == subout_id)
            .cloned()
            .collect())
    }

    async fn insert_subout(&self, subout: SubOut) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        if state.subouts.contains_key(&subout.subout_id) {
            anyhow::bail!("subout already exists: {}", subout.subout_id);
        }
        state.subouts.insert(subout.subout_id.clone(), subout);
        Ok(())
    }

    async fn save_subout(&self, subout: SubOut) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        match state.subouts.get_mut(&subout.subout_id) {
            Some(existing) => {
                *existing = subout;
                Ok(())
            }
            None => anyhow::bail!("subout not found: {}", subout.subout_id),
        }
    }

    async fn insert_item(&self, item: Item) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        if !state.subouts.contains_key(&item.subout_id) {
            anyhow::bail!("subout not found: {}", item.subout_id);
        }
        state.items.push(item);
        Ok(())
    }

    async fn upsert_load(&self, load: Load) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        match state.loads.iter_mut().find(|l| l.load_id == load.load_id) {
            Some(existing) => *existing = load,
            None => state.loads.push(load),
        }
        Ok(())
    }

    async fn upsert_pallet(&self, pallet: Pallet) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        match state.pallets.iter_mut().find(|p| p.pallet_id == pallet.pallet_id) {
            Some(existing) => *existing = pallet,
            None => state.pallets.push(pallet),
        }
        Ok(())
    }

    async fn apply_assignment(&self, plan: &AssignmentPlan) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        let StoreState { items, pallets, .. } = &mut *state;
        plan.apply(items, pallets);
        Ok(())
    }

    async fn apply_packing(&self, plan: &PalletPackingPlan) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        plan.apply(&mut state.items);
        Ok(())
    }

    async fn delete_cascade(&self, plan: &DeletionPlan) -> anyhow::Result<()> {
        let mut state = self.state.write().await;
        state.subouts.remove(&plan.subout_id);
        state.items.retain(|i| !plan.item_ids.contains(&i.item_id));
        state.pallets.retain(|p| !plan.pallet_ids.contains(&p.pallet_id));
        state.loads.retain(|l| !plan.load_ids.contains(&l.load_id));
        Ok(())
    }

    async fn append_activity(&self, entry: ActivityEntry) -> anyhow::Result<()> {
        self.state.write().await.activity.push(entry);
        Ok(())
    }
}
