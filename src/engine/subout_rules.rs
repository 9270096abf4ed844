// ==========================================
// SubOuts Tracker - SubOut create / edit / delete rules
// ==========================================
// Required fields on create, immutable identity on edit, cascade
// scope on delete. The data layer applies the results atomically.
// ==========================================

use crate::domain::snapshot::SubOutSnapshot;
use crate::domain::subout::{NewSubOut, SubOut, SubOutPatch};
use crate::domain::types::SubOutStatus;
use crate::engine::error::{RuleError, RuleResult};
use crate::engine::status_lifecycle::{StatusChange, StatusLifecycle};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};

// ==========================================
// Outputs
// ==========================================

/// One edited field with before/after values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    pub from: JsonValue,
    pub to: JsonValue,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubOutEdit {
    pub updated: SubOut,
    pub changes: Vec<FieldChange>,
    /// Set when the patch changed the status.
    pub status_change: Option<StatusChange>,
}

impl SubOutEdit {
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Everything removed by deleting a SubOut. Irreversible.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletionPlan {
    pub subout_id: String,
    pub item_ids: Vec<String>,
    pub pallet_ids: Vec<String>,
    pub load_ids: Vec<String>,
}

// ==========================================
// SubOutRules
// ==========================================
pub struct SubOutRules;

fn required<'a>(value: &'a Option<String>, field: &str) -> RuleResult<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(RuleError::MissingRequiredField {
            field: field.to_string(),
        }),
    }
}

impl SubOutRules {
    /// Job, lot number and vendor name must be present and non-blank.
    pub fn validate_new(new: &NewSubOut) -> RuleResult<()> {
        required(&new.job, "job")?;
        required(&new.lot_number, "lot_number")?;
        required(&new.vendor_name, "vendor_name")?;
        Ok(())
    }

    /// Builds a new SubOut in Submitted status.
    pub fn create(
        subout_id: String,
        new: NewSubOut,
        created_at: NaiveDateTime,
    ) -> RuleResult<SubOut> {
        Self::validate_new(&new)?;
        let job = required(&new.job, "job")?.to_string();
        let lot_number = required(&new.lot_number, "lot_number")?.to_string();
        let vendor_name = required(&new.vendor_name, "vendor_name")?.to_string();

        Ok(SubOut {
            subout_id,
            job,
            lot_number,
            vendor_name,
            status: SubOutStatus::Submitted,
            leave_mfc_date: new.leave_mfc_date,
            due_to_site_date: new.due_to_site_date,
            planned_outbound_loads: new.planned_outbound_loads,
            planned_inbound_loads: new.planned_inbound_loads,
            weight_lbs: new.weight_lbs,
            missing_steel: new.missing_steel,
            vendor_cost: new.vendor_cost,
            freight_cost: new.freight_cost,
            notes: new.notes,
            created_at,
            updated_at: created_at,
        })
    }

    /// Applies an edit.
    ///
    /// # Rules
    /// - job / lot_number: a different value -> ImmutableFieldViolation
    ///   (resubmitting the same value is accepted)
    /// - vendor_name: blank -> MissingRequiredField
    /// - status: unknown text -> InvalidStatusTransition; any known status allowed
    pub fn apply_patch(
        current: &SubOut,
        patch: &SubOutPatch,
        updated_at: NaiveDateTime,
    ) -> RuleResult<SubOutEdit> {
        if let Some(job) = &patch.job {
            if job.trim() != current.job {
                return Err(RuleError::ImmutableFieldViolation {
                    field: "job".to_string(),
                });
            }
        }
        if let Some(lot) = &patch.lot_number {
            if lot.trim() != current.lot_number {
                return Err(RuleError::ImmutableFieldViolation {
                    field: "lot_number".to_string(),
                });
            }
        }

        let mut updated = current.clone();
        let mut changes = Vec::new();
        let mut status_change = None;

        macro_rules! track {
            ($field:ident, $value:expr) => {{
                let value = $value;
                if updated.$field != value {
                    changes.push(FieldChange {
                        field: stringify!($field).to_string(),
                        from: json!(updated.$field),
                        to: json!(value),
                    });
                    updated.$field = value;
                }
            }};
        }

        if patch.vendor_name.is_some() {
            let vendor = required(&patch.vendor_name, "vendor_name")?.to_string();
            track!(vendor_name, vendor);
        }
        if let Some(requested) = &patch.status {
            let change = StatusLifecycle::set_status(current.status, requested)?;
            if !change.is_noop() {
                status_change = Some(change);
            }
            track!(status, change.to);
        }
        if let Some(date) = patch.leave_mfc_date {
            track!(leave_mfc_date, Some(date));
        }
        if let Some(date) = patch.due_to_site_date {
            track!(due_to_site_date, Some(date));
        }
        if let Some(n) = patch.planned_outbound_loads {
            track!(planned_outbound_loads, n);
        }
        if let Some(n) = patch.planned_inbound_loads {
            track!(planned_inbound_loads, n);
        }
        if let Some(w) = patch.weight_lbs {
            track!(weight_lbs, Some(w));
        }
        if let Some(flag) = patch.missing_steel {
            track!(missing_steel, flag);
        }
        if let Some(cost) = patch.vendor_cost {
            track!(vendor_cost, Some(cost));
        }
        if let Some(cost) = patch.freight_cost {
            track!(freight_cost, Some(cost));
        }
        if let Some(notes) = &patch.notes {
            track!(notes, Some(notes.clone()));
        }

        if !changes.is_empty() {
            updated.updated_at = updated_at;
        }

        Ok(SubOutEdit {
            updated,
            changes,
            status_change,
        })
    }

    /// Cascade scope: every item, pallet and load owned by the SubOut.
    pub fn deletion_plan(snapshot: &SubOutSnapshot) -> DeletionPlan {
        let subout_id = snapshot.subout.subout_id.as_str();
        DeletionPlan {
            subout_id: subout_id.to_string(),
            item_ids: snapshot
                .items
                .iter()
                .filter(|i| i.subout_id == subout_id)
                .map(|i| i.item_id.clone())
                .collect(),
            pallet_ids: snapshot
                .pallets
                .iter()
                .filter(|p| p.subout_id == subout_id)
                .map(|p| p.pallet_id.clone())
                .collect(),
            load_ids: snapshot
                .loads
                .iter()
                .filter(|l| l.subout_id == subout_id)
                .map(|l| l.load_id.clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn ts(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 2, 2)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn new_subout() -> NewSubOut {
        NewSubOut {
            job: Some("J-3100".to_string()),
            lot_number: Some("L-12".to_string()),
            vendor_name: Some("Valley Galvanizing".to_string()),
            planned_outbound_loads: 2,
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_new_requires_fields() {
        for field in ["job", "lot_number", "vendor_name"] {
            let mut new = new_subout();
            match field {
                "job" => new.job = None,
                "lot_number" => new.lot_number = Some("   ".to_string()),
                _ => new.vendor_name = Some(String::new()),
            }
            assert_eq!(
                SubOutRules::validate_new(&new).unwrap_err(),
                RuleError::MissingRequiredField {
                    field: field.to_string()
                }
            );
        }
    }

    #[test]
    fn test_create_starts_submitted() {
        let s = SubOutRules::create("S1".to_string(), new_subout(), ts(8)).unwrap();
        assert_eq!(s.status, SubOutStatus::Submitted);
        assert_eq!(s.job, "J-3100");
        assert_eq!(s.planned_outbound_loads, 2);
        assert_eq!(s.created_at, s.updated_at);
    }

    #[test]
    fn test_patch_rejects_job_and_lot_change() {
        let s = SubOutRules::create("S1".to_string(), new_subout(), ts(8)).unwrap();
        let patch = SubOutPatch {
            lot_number: Some("L-13".to_string()),
            ..Default::default()
        };
        assert_eq!(
            SubOutRules::apply_patch(&s, &patch, ts(9)).unwrap_err(),
            RuleError::ImmutableFieldViolation {
                field: "lot_number".to_string()
            }
        );

        let patch = SubOutPatch {
            job: Some("J-9999".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            SubOutRules::apply_patch(&s, &patch, ts(9)),
            Err(RuleError::ImmutableFieldViolation { .. })
        ));
    }

    #[test]
    fn test_patch_accepts_same_identity_values() {
        let s = SubOutRules::create("S1".to_string(), new_subout(), ts(8)).unwrap();
        let patch = SubOutPatch {
            job: Some("J-3100".to_string()),
            lot_number: Some("L-12".to_string()),
            ..Default::default()
        };
        let edit = SubOutRules::apply_patch(&s, &patch, ts(9)).unwrap();
        assert!(edit.is_noop());
        assert_eq!(edit.updated.updated_at, ts(8));
    }

    #[test]
    fn test_patch_tracks_changes_and_status() {
        let s = SubOutRules::create("S1".to_string(), new_subout(), ts(8)).unwrap();
        let patch = SubOutPatch {
            status: Some("Sent".to_string()),
            missing_steel: Some(true),
            ..Default::default()
        };
        let edit = SubOutRules::apply_patch(&s, &patch, ts(9)).unwrap();
        let fields: Vec<&str> = edit.changes.iter().map(|c| c.field.as_str()).collect();
        assert_eq!(fields, vec!["status", "missing_steel"]);
        assert_eq!(edit.updated.status, SubOutStatus::Sent);
        assert_eq!(edit.status_change.unwrap().from, SubOutStatus::Submitted);
        assert_eq!(edit.updated.updated_at, ts(9));
    }

    #[test]
    fn test_patch_rejects_unknown_status() {
        let s = SubOutRules::create("S1".to_string(), new_subout(), ts(8)).unwrap();
        let patch = SubOutPatch {
            status: Some("Blasted".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            SubOutRules::apply_patch(&s, &patch, ts(9)),
            Err(RuleError::InvalidStatusTransition { .. })
        ));
    }

    #[test]
    fn test_deletion_plan_collects_owned_records() {
        let s = SubOutRules::create("S1".to_string(), new_subout(), ts(8)).unwrap();
        let snapshot = SubOutSnapshot::new(s);
        let plan = SubOutRules::deletion_plan(&snapshot);
        assert_eq!(plan.subout_id, "S1");
        assert!(plan.item_ids.is_empty() && plan.load_ids.is_empty());
    }
}
