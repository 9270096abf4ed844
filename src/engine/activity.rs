// ==========================================
// SubOuts Tracker - activity entry builder
// ==========================================
// Turns computed changes into ActivityEntry records for the caller
// to append. Descriptions are defaults; payloads carry the facts.
// ==========================================

use crate::domain::activity::{ActivityEntry, ActivityKind};
use crate::domain::load::{Load, Pallet};
use crate::domain::subout::SubOut;
use crate::domain::types::{LoadStatus, PalletStatus};
use crate::engine::load_assignment::{AssignmentPlan, PalletPackingPlan};
use crate::engine::status_lifecycle::{AdvisoryStatusChange, StatusChange};
use crate::engine::subout_rules::{DeletionPlan, SubOutEdit};
use chrono::NaiveDateTime;
use serde_json::json;
use uuid::Uuid;

pub struct ActivityBuilder {
    actor: String,
    at: NaiveDateTime,
}

impl ActivityBuilder {
    pub fn new(actor: impl Into<String>, at: NaiveDateTime) -> Self {
        Self {
            actor: actor.into(),
            at,
        }
    }

    fn entry(&self, subout_id: &str, kind: ActivityKind, description: String) -> ActivityEntry {
        ActivityEntry::new(
            Uuid::new_v4().to_string(),
            subout_id.to_string(),
            kind,
            description,
            self.actor.clone(),
            self.at,
        )
    }

    pub fn created(&self, subout: &SubOut) -> ActivityEntry {
        self.entry(
            &subout.subout_id,
            ActivityKind::Created,
            format!("SubOut {} created for job {}", subout.lot_number, subout.job),
        )
        .with_payload(&json!({
            "job": subout.job,
            "lot_number": subout.lot_number,
            "vendor_name": subout.vendor_name,
        }))
    }

    /// Field edits other than status. None when nothing else changed.
    pub fn updated(&self, edit: &SubOutEdit) -> Option<ActivityEntry> {
        let fields: Vec<_> = edit
            .changes
            .iter()
            .filter(|c| c.field != "status")
            .collect();
        if fields.is_empty() {
            return None;
        }
        let names: Vec<&str> = fields.iter().map(|c| c.field.as_str()).collect();
        Some(
            self.entry(
                &edit.updated.subout_id,
                ActivityKind::Updated,
                format!("Updated {}", names.join(", ")),
            )
            .with_payload(&fields),
        )
    }

    pub fn status_changed(&self, subout_id: &str, change: &StatusChange) -> ActivityEntry {
        self.entry(
            subout_id,
            ActivityKind::StatusChanged,
            format!("Status changed from {} to {}", change.from, change.to),
        )
        .with_payload(change)
    }

    pub fn load_created(&self, load: &Load) -> ActivityEntry {
        self.entry(
            &load.subout_id,
            ActivityKind::LoadCreated,
            format!("{} load {} created", load.direction, load.load_number),
        )
        .with_payload(&json!({
            "load_id": load.load_id,
            "load_number": load.load_number,
            "capacity_lbs": load.capacity_lbs,
        }))
    }

    pub fn load_status_changed(
        &self,
        load: &Load,
        change: &AdvisoryStatusChange<LoadStatus>,
    ) -> ActivityEntry {
        self.entry(
            &load.subout_id,
            ActivityKind::LoadStatusChanged,
            format!(
                "Load {} status changed from {} to {}",
                load.load_number, change.from, change.to
            ),
        )
        .with_payload(change)
    }

    pub fn pallet_created(&self, pallet: &Pallet) -> ActivityEntry {
        self.entry(
            &pallet.subout_id,
            ActivityKind::PalletCreated,
            format!("Pallet {} created", pallet.pallet_number),
        )
        .with_payload(&json!({
            "pallet_id": pallet.pallet_id,
            "pallet_number": pallet.pallet_number,
        }))
    }

    pub fn pallet_status_changed(
        &self,
        pallet: &Pallet,
        change: &AdvisoryStatusChange<PalletStatus>,
    ) -> ActivityEntry {
        self.entry(
            &pallet.subout_id,
            ActivityKind::PalletStatusChanged,
            format!(
                "Pallet {} status changed from {} to {}",
                pallet.pallet_number, change.from, change.to
            ),
        )
        .with_payload(change)
    }

    /// Item or pallet assignment, depending on what the plan moves.
    pub fn assigned(&self, subout_id: &str, load: &Load, plan: &AssignmentPlan) -> ActivityEntry {
        let (kind, description) = if plan.pallet_ids.is_empty() {
            (
                ActivityKind::ItemsAssigned,
                format!("{} item(s) assigned to {}", plan.item_ids.len(), load.load_number),
            )
        } else {
            (
                ActivityKind::PalletAssigned,
                format!(
                    "{} pallet(s) with {} item(s) assigned to {}",
                    plan.pallet_ids.len(),
                    plan.item_ids.len(),
                    load.load_number
                ),
            )
        };
        self.entry(subout_id, kind, description).with_payload(plan)
    }

    /// Items placed on a pallet.
    pub fn packed(&self, pallet: &Pallet, plan: &PalletPackingPlan) -> ActivityEntry {
        self.entry(
            &pallet.subout_id,
            ActivityKind::ItemsAssigned,
            format!(
                "{} item(s) packed on {}",
                plan.item_ids.len(),
                pallet.pallet_number
            ),
        )
        .with_payload(plan)
    }

    pub fn deleted(&self, plan: &DeletionPlan) -> ActivityEntry {
        self.entry(
            &plan.subout_id,
            ActivityKind::Deleted,
            format!(
                "SubOut deleted with {} item(s), {} pallet(s), {} load(s)",
                plan.item_ids.len(),
                plan.pallet_ids.len(),
                plan.load_ids.len()
            ),
        )
        .with_payload(plan)
    }
}
