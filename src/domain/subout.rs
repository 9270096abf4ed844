// ==========================================
// SubOuts Tracker - SubOut domain model
// ==========================================
// One fabrication package sent to an outside vendor.
// Invariant: job and lot_number never change after creation.
// ==========================================

use crate::domain::types::SubOutStatus;
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// SubOut
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubOut {
    // ===== identity (immutable) =====
    pub subout_id: String,
    pub job: String,        // owning job reference
    pub lot_number: String, // unique per job

    // ===== vendor =====
    pub vendor_name: String,

    // ===== lifecycle =====
    pub status: SubOutStatus,

    // ===== dates =====
    pub leave_mfc_date: Option<NaiveDate>,  // planned departure from the shop
    pub due_to_site_date: Option<NaiveDate>, // planned arrival at site

    // ===== planning =====
    pub planned_outbound_loads: u32,
    pub planned_inbound_loads: u32,
    pub weight_lbs: Option<f64>,
    pub missing_steel: bool,

    // ===== cost =====
    pub vendor_cost: Option<f64>,
    pub freight_cost: Option<f64>,

    pub notes: Option<String>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl SubOut {
    /// Total known cost (vendor + freight); None when neither is set.
    pub fn total_cost(&self) -> Option<f64> {
        match (self.vendor_cost, self.freight_cost) {
            (None, None) => None,
            (v, f) => Some(v.unwrap_or(0.0) + f.unwrap_or(0.0)),
        }
    }
}

// ==========================================
// NewSubOut - create request
// ==========================================
// Required on create: job, lot_number, vendor_name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NewSubOut {
    pub job: Option<String>,
    pub lot_number: Option<String>,
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub leave_mfc_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_to_site_date: Option<NaiveDate>,
    #[serde(default)]
    pub planned_outbound_loads: u32,
    #[serde(default)]
    pub planned_inbound_loads: u32,
    #[serde(default)]
    pub weight_lbs: Option<f64>,
    #[serde(default)]
    pub missing_steel: bool,
    #[serde(default)]
    pub vendor_cost: Option<f64>,
    #[serde(default)]
    pub freight_cost: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}

// ==========================================
// SubOutPatch - edit request
// ==========================================
// Every field is optional; None means "leave as is".
// `status` is raw text so unknown values surface as a typed error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubOutPatch {
    #[serde(default)]
    pub job: Option<String>,
    #[serde(default)]
    pub lot_number: Option<String>,
    #[serde(default)]
    pub vendor_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub leave_mfc_date: Option<NaiveDate>,
    #[serde(default)]
    pub due_to_site_date: Option<NaiveDate>,
    #[serde(default)]
    pub planned_outbound_loads: Option<u32>,
    #[serde(default)]
    pub planned_inbound_loads: Option<u32>,
    #[serde(default)]
    pub weight_lbs: Option<f64>,
    #[serde(default)]
    pub missing_steel: Option<bool>,
    #[serde(default)]
    pub vendor_cost: Option<f64>,
    #[serde(default)]
    pub freight_cost: Option<f64>,
    #[serde(default)]
    pub notes: Option<String>,
}
