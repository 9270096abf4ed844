// ==========================================
// SubOuts Tracker - board API
// ==========================================
// Presentation boundary: reads snapshots from the store, runs the
// three rule engines, writes back what they decide and appends an
// activity entry for every write.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::store::SubOutStore;
use crate::config::RuleConfigReader;
use crate::domain::activity::ActivityEntry;
use crate::domain::item::Item;
use crate::domain::load::{Load, Pallet};
use crate::domain::snapshot::SubOutSnapshot;
use crate::domain::subout::{NewSubOut, SubOut, SubOutPatch};
use crate::domain::types::{
    CapacityBand, LoadDirection, LoadStatus, PalletStatus, SubOutStatus, TopBarCategory,
};
use crate::engine::{
    next_load_number, next_pallet_number, ActivityBuilder, AssignmentPlan, Clock, DeletionPlan,
    HeatMapSettings, HeatTint, LoadAssignmentRules, LoadProgress, StatusChange, StatusLifecycle,
    SubOutRules, UrgencyScorer,
};
use chrono::NaiveDate;
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// Card view
// ==========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCapacityView {
    pub load_id: String,
    pub load_number: String,
    pub direction: LoadDirection,
    pub status: LoadStatus,
    pub capacity_lbs: f64,
    pub assigned_lbs: f64,
    pub remaining_lbs: f64,
    pub band: CapacityBand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubOutCard {
    pub subout_id: String,
    pub job: String,
    pub lot_number: String,
    pub vendor_name: String,
    pub status: SubOutStatus,
    pub top_bar: TopBarCategory,
    pub top_bar_reason: String,
    pub tint: HeatTint,
    pub progress: LoadProgress,
    pub percent_loaded: f64,
    pub days_until_leave: Option<i64>,
    pub loads: Vec<LoadCapacityView>,
}

/// Result of an assignment transaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignmentOutcome {
    pub plan: AssignmentPlan,
    pub progress: LoadProgress,
    pub status_change: Option<StatusChange>,
}

/// Queries all three engines for one snapshot.
pub fn compose_card(
    snapshot: &SubOutSnapshot,
    today: NaiveDate,
    heat: &HeatMapSettings,
    warning_ratio: f64,
) -> SubOutCard {
    let subout = &snapshot.subout;
    let progress = LoadAssignmentRules::load_progress(&snapshot.items);
    let percent_loaded = progress.percent();
    let (top_bar, top_bar_reason) = UrgencyScorer::evaluate_top_bar(subout, &snapshot.loads, today);
    let tint = UrgencyScorer::heat_map_intensity(subout, today, percent_loaded, heat);

    let loads = snapshot
        .loads
        .iter()
        .map(|load| {
            let assigned =
                LoadAssignmentRules::assigned_weight(load, &snapshot.items, &snapshot.pallets);
            LoadCapacityView {
                load_id: load.load_id.clone(),
                load_number: load.load_number.clone(),
                direction: load.direction,
                status: load.status,
                capacity_lbs: load.capacity_lbs,
                assigned_lbs: assigned,
                remaining_lbs: load.capacity_lbs - assigned,
                band: LoadAssignmentRules::capacity_band(load, assigned, warning_ratio),
            }
        })
        .collect();

    SubOutCard {
        subout_id: subout.subout_id.clone(),
        job: subout.job.clone(),
        lot_number: subout.lot_number.clone(),
        vendor_name: subout.vendor_name.clone(),
        status: subout.status,
        top_bar,
        top_bar_reason,
        tint,
        progress,
        percent_loaded,
        days_until_leave: UrgencyScorer::days_until_leave(subout, today),
        loads,
    }
}

// ==========================================
// BoardApi
// ==========================================
pub struct BoardApi<S, C>
where
    S: SubOutStore,
    C: RuleConfigReader,
{
    store: Arc<S>,
    config: Arc<C>,
    clock: Arc<dyn Clock>,
}

impl<S, C> BoardApi<S, C>
where
    S: SubOutStore,
    C: RuleConfigReader,
{
    pub fn new(store: Arc<S>, config: Arc<C>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            config,
            clock,
        }
    }

    fn activity(&self, actor: &str) -> ActivityBuilder {
        ActivityBuilder::new(actor, self.clock.now())
    }

    async fn snapshot(&self, subout_id: &str) -> ApiResult<SubOutSnapshot> {
        self.store
            .load_snapshot(subout_id)
            .await?
            .ok_or_else(|| ApiError::not_found("subout", subout_id))
    }

    async fn record(&self, entry: ActivityEntry) -> ApiResult<()> {
        debug!(subout_id = %entry.subout_id, kind = entry.kind.as_str(), "append activity");
        self.store.append_activity(entry).await?;
        Ok(())
    }

    // ==========================================
    // Cards
    // ==========================================

    #[instrument(skip(self))]
    pub async fn card(&self, subout_id: &str) -> ApiResult<SubOutCard> {
        let snapshot = self.snapshot(subout_id).await?;
        let heat = self.config.heat_map_settings()?;
        let ratio = self.config.capacity_warning_ratio()?;
        Ok(compose_card(&snapshot, self.clock.today(), &heat, ratio))
    }

    /// Every card, evaluated concurrently. Order follows the store's id order.
    #[instrument(skip(self))]
    pub async fn cards(&self) -> ApiResult<Vec<SubOutCard>> {
        let ids = self.store.list_subout_ids().await?;
        let cards = try_join_all(ids.iter().map(|id| self.card(id))).await?;
        info!(count = cards.len(), "board cards evaluated");
        Ok(cards)
    }

    // ==========================================
    // SubOut lifecycle
    // ==========================================

    #[instrument(skip(self, new))]
    pub async fn create_subout(&self, new: NewSubOut, actor: &str) -> ApiResult<SubOut> {
        SubOutRules::validate_new(&new)?;
        let job = new.job.as_deref().unwrap_or_default().trim().to_string();
        let lot = new.lot_number.as_deref().unwrap_or_default().trim().to_string();
        if self.store.lot_number_exists(&job, &lot).await? {
            return Err(ApiError::DuplicateLotNumber {
                job,
                lot_number: lot,
            });
        }

        let subout = SubOutRules::create(Uuid::new_v4().to_string(), new, self.clock.now())?;
        self.store.insert_subout(subout.clone()).await?;
        self.record(self.activity(actor).created(&subout)).await?;

        info!(subout_id = %subout.subout_id, job = %subout.job, lot = %subout.lot_number, "subout created");
        Ok(subout)
    }

    #[instrument(skip(self, patch))]
    pub async fn update_subout(
        &self,
        subout_id: &str,
        patch: SubOutPatch,
        actor: &str,
    ) -> ApiResult<SubOut> {
        let snapshot = self.snapshot(subout_id).await?;
        let edit = SubOutRules::apply_patch(&snapshot.subout, &patch, self.clock.now())?;
        if edit.is_noop() {
            debug!(subout_id, "patch changed nothing");
            return Ok(edit.updated);
        }

        self.store.save_subout(edit.updated.clone()).await?;
        let builder = self.activity(actor);
        if let Some(entry) = builder.updated(&edit) {
            self.record(entry).await?;
        }
        if let Some(change) = &edit.status_change {
            if change.is_regression() {
                warn!(subout_id, from = %change.from, to = %change.to, "status moved backwards");
            }
            self.record(builder.status_changed(subout_id, change)).await?;
        }

        info!(subout_id, changed = edit.changes.len(), "subout updated");
        Ok(edit.updated)
    }

    /// Stepper click / status dropdown.
    pub async fn set_status(
        &self,
        subout_id: &str,
        requested: &str,
        actor: &str,
    ) -> ApiResult<SubOut> {
        let patch = SubOutPatch {
            status: Some(requested.to_string()),
            ..Default::default()
        };
        self.update_subout(subout_id, patch, actor).await
    }

    /// Irreversible: removes the SubOut with its items, pallets and loads.
    #[instrument(skip(self))]
    pub async fn delete_subout(&self, subout_id: &str, actor: &str) -> ApiResult<DeletionPlan> {
        let snapshot = self.snapshot(subout_id).await?;
        let plan = SubOutRules::deletion_plan(&snapshot);
        self.store.delete_cascade(&plan).await?;
        self.record(self.activity(actor).deleted(&plan)).await?;

        info!(
            subout_id,
            items = plan.item_ids.len(),
            pallets = plan.pallet_ids.len(),
            loads = plan.load_ids.len(),
            "subout deleted"
        );
        Ok(plan)
    }

    pub async fn activity_log(&self, subout_id: &str) -> ApiResult<Vec<ActivityEntry>> {
        Ok(self.store.list_activity(subout_id).await?)
    }

    // ==========================================
    // Loads / pallets
    // ==========================================

    #[instrument(skip(self))]
    pub async fn create_load(
        &self,
        subout_id: &str,
        direction: LoadDirection,
        actor: &str,
    ) -> ApiResult<Load> {
        let snapshot = self.snapshot(subout_id).await?;
        let load = Load {
            load_id: Uuid::new_v4().to_string(),
            subout_id: subout_id.to_string(),
            load_number: next_load_number(&snapshot.loads, direction),
            direction,
            status: LoadStatus::Planned,
            capacity_lbs: self.config.default_load_capacity_lbs()?,
            scheduled_date: None,
            actual_date: None,
            carrier: None,
        };
        self.store.upsert_load(load.clone()).await?;
        self.record(self.activity(actor).load_created(&load)).await?;

        info!(subout_id, load_number = %load.load_number, "load created");
        Ok(load)
    }

    #[instrument(skip(self))]
    pub async fn set_load_status(
        &self,
        subout_id: &str,
        load_id: &str,
        requested: &str,
        actor: &str,
    ) -> ApiResult<Load> {
        let snapshot = self.snapshot(subout_id).await?;
        let mut load = snapshot
            .find_load(load_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("load", load_id))?;

        let change = StatusLifecycle::set_load_status(load.status, requested)?;
        if change.is_regression {
            warn!(load_number = %load.load_number, from = %change.from, to = %change.to, "load status moved backwards");
        }
        load.status = change.to;
        self.store.upsert_load(load.clone()).await?;
        self.record(self.activity(actor).load_status_changed(&load, &change))
            .await?;
        Ok(load)
    }

    #[instrument(skip(self))]
    pub async fn create_pallet(&self, subout_id: &str, actor: &str) -> ApiResult<Pallet> {
        let snapshot = self.snapshot(subout_id).await?;
        let pallet = Pallet {
            pallet_id: Uuid::new_v4().to_string(),
            subout_id: subout_id.to_string(),
            pallet_number: next_pallet_number(&snapshot.pallets),
            status: PalletStatus::Open,
            length_in: None,
            width_in: None,
            height_in: None,
            weight_lbs: None,
            load_id: None,
        };
        self.store.upsert_pallet(pallet.clone()).await?;
        self.record(self.activity(actor).pallet_created(&pallet)).await?;
        Ok(pallet)
    }

    #[instrument(skip(self))]
    pub async fn set_pallet_status(
        &self,
        subout_id: &str,
        pallet_id: &str,
        requested: &str,
        actor: &str,
    ) -> ApiResult<Pallet> {
        let snapshot = self.snapshot(subout_id).await?;
        let mut pallet = snapshot
            .find_pallet(pallet_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("pallet", pallet_id))?;

        let change = StatusLifecycle::set_pallet_status(pallet.status, requested)?;
        pallet.status = change.to;
        self.store.upsert_pallet(pallet.clone()).await?;
        self.record(self.activity(actor).pallet_status_changed(&pallet, &change))
            .await?;
        Ok(pallet)
    }

    // ==========================================
    // Assignment transactions
    // ==========================================

    /// Picker contents for the current selection.
    pub async fn eligible_items(
        &self,
        subout_id: &str,
        selected_ids: &[String],
    ) -> ApiResult<Vec<Item>> {
        let snapshot = self.snapshot(subout_id).await?;
        let candidates = LoadAssignmentRules::assignable_items(&snapshot.items);
        Ok(LoadAssignmentRules::eligible_for_assignment(
            &candidates,
            selected_ids,
        ))
    }

    #[instrument(skip(self, selected_ids), fields(count = selected_ids.len()))]
    pub async fn assign_items(
        &self,
        subout_id: &str,
        load_id: &str,
        selected_ids: &[String],
        actor: &str,
    ) -> ApiResult<AssignmentOutcome> {
        let snapshot = self.snapshot(subout_id).await?;
        let plan = LoadAssignmentRules::plan_item_assignment(&snapshot, load_id, selected_ids)?;
        self.commit_assignment(&snapshot, plan, actor).await
    }

    #[instrument(skip(self))]
    pub async fn assign_pallet(
        &self,
        subout_id: &str,
        load_id: &str,
        pallet_id: &str,
        actor: &str,
    ) -> ApiResult<AssignmentOutcome> {
        let snapshot = self.snapshot(subout_id).await?;
        let plan = LoadAssignmentRules::plan_pallet_assignment(&snapshot, load_id, pallet_id)?;
        self.commit_assignment(&snapshot, plan, actor).await
    }

    async fn commit_assignment(
        &self,
        snapshot: &SubOutSnapshot,
        plan: AssignmentPlan,
        actor: &str,
    ) -> ApiResult<AssignmentOutcome> {
        let subout_id = snapshot.subout.subout_id.as_str();
        let load = snapshot
            .find_load(&plan.load_id)
            .ok_or_else(|| ApiError::not_found("load", &plan.load_id))?;

        self.store.apply_assignment(&plan).await?;
        self.record(self.activity(actor).assigned(subout_id, load, &plan))
            .await?;

        let mut items = snapshot.items.clone();
        let mut pallets = snapshot.pallets.clone();
        plan.apply(&mut items, &mut pallets);

        let remaining = LoadAssignmentRules::remaining_capacity(load, &items, &pallets);
        if remaining < 0.0 {
            warn!(load_number = %load.load_number, over_lbs = -remaining, "load over capacity");
        }

        let status_change = self.reconcile_status(subout_id, actor).await?;
        let progress = LoadAssignmentRules::load_progress(&items);
        info!(
            subout_id,
            load_number = %load.load_number,
            items = plan.item_ids.len(),
            pallets = plan.pallet_ids.len(),
            percent_loaded = progress.percent(),
            "assignment committed"
        );

        Ok(AssignmentOutcome {
            plan,
            progress,
            status_change,
        })
    }

    /// Places items on a pallet; the items follow the pallet's load, or
    /// leave their old one when the pallet has none.
    #[instrument(skip(self, item_ids), fields(count = item_ids.len()))]
    pub async fn pack_pallet(
        &self,
        subout_id: &str,
        pallet_id: &str,
        item_ids: &[String],
        actor: &str,
    ) -> ApiResult<Option<StatusChange>> {
        let snapshot = self.snapshot(subout_id).await?;
        let plan = LoadAssignmentRules::plan_pallet_packing(&snapshot, pallet_id, item_ids)?;
        let pallet = snapshot
            .find_pallet(pallet_id)
            .ok_or_else(|| ApiError::not_found("pallet", pallet_id))?;
        self.store.apply_packing(&plan).await?;
        self.record(self.activity(actor).packed(pallet, &plan)).await?;
        info!(subout_id, pallet_number = %pallet.pallet_number, items = plan.item_ids.len(), "pallet packed");

        // Repacking can move items on or off a load.
        self.reconcile_status(subout_id, actor).await
    }

    /// Re-runs the automatic InProcess/Ready toggle against fresh progress.
    #[instrument(skip(self))]
    pub async fn reconcile_status(
        &self,
        subout_id: &str,
        actor: &str,
    ) -> ApiResult<Option<StatusChange>> {
        let snapshot = self.snapshot(subout_id).await?;
        let percent = LoadAssignmentRules::percent_loaded(&snapshot.items);
        let Some(change) = StatusLifecycle::reconcile(snapshot.subout.status, percent) else {
            return Ok(None);
        };

        let mut subout = snapshot.subout;
        subout.status = change.to;
        subout.updated_at = self.clock.now();
        self.store.save_subout(subout).await?;
        self.record(self.activity(actor).status_changed(subout_id, &change))
            .await?;

        info!(subout_id, from = %change.from, to = %change.to, percent_loaded = percent, "automatic status change");
        Ok(Some(change))
    }
}
