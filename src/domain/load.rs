// ==========================================
// SubOuts Tracker - Load / Pallet domain model
// ==========================================
// Load: one truck shipment (OUT-### / IN-###) owned by a SubOut.
// Pallet: a group of PartsOnPallets items (P-###), on at most one Load.
// Capacity is advisory: overflow colours the card, never blocks.
// ==========================================

use crate::domain::types::{LoadDirection, LoadStatus, PalletStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Default truck capacity in pounds.
pub const DEFAULT_LOAD_CAPACITY_LBS: f64 = 48_000.0;

// ==========================================
// Load
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    pub load_id: String,
    pub subout_id: String,
    pub load_number: String, // OUT-001, IN-002 ...
    pub direction: LoadDirection,
    pub status: LoadStatus,
    pub capacity_lbs: f64,

    pub scheduled_date: Option<NaiveDate>,
    pub actual_date: Option<NaiveDate>,
    pub carrier: Option<String>,
}

impl Load {
    pub fn is_delivered(&self) -> bool {
        self.status == LoadStatus::Delivered
    }
}

// ==========================================
// Pallet
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pallet {
    pub pallet_id: String,
    pub subout_id: String,
    pub pallet_number: String, // P-001 ...
    pub status: PalletStatus,

    pub length_in: Option<f64>,
    pub width_in: Option<f64>,
    pub height_in: Option<f64>,
    /// Gross weight as weighed; None falls back to the sum of its items.
    pub weight_lbs: Option<f64>,

    pub load_id: Option<String>,
}
