// ==========================================
// Test data builders - integration tests
// ==========================================

use chrono::{NaiveDate, NaiveDateTime};
use subouts_tracker::domain::item::Item;
use subouts_tracker::domain::load::{Load, Pallet};
use subouts_tracker::domain::snapshot::SubOutSnapshot;
use subouts_tracker::domain::subout::SubOut;
use subouts_tracker::domain::types::{
    LoadDirection, LoadStatus, PalletStatus, SendType, SourceType, SubOutStatus,
};

pub const SUBOUT_ID: &str = "S-1";

pub fn ts(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(8, 0, 0).unwrap()
}

// ==========================================
// SubOut builder
// ==========================================

pub struct SubOutBuilder {
    subout: SubOut,
}

impl SubOutBuilder {
    pub fn new(subout_id: &str) -> Self {
        let created = ts(NaiveDate::from_ymd_opt(2026, 1, 5).unwrap());
        Self {
            subout: SubOut {
                subout_id: subout_id.to_string(),
                job: "J-1001".to_string(),
                lot_number: "L-01".to_string(),
                vendor_name: "Acme Galvanizing".to_string(),
                status: SubOutStatus::Submitted,
                leave_mfc_date: None,
                due_to_site_date: None,
                planned_outbound_loads: 0,
                planned_inbound_loads: 0,
                weight_lbs: None,
                missing_steel: false,
                vendor_cost: None,
                freight_cost: None,
                notes: None,
                created_at: created,
                updated_at: created,
            },
        }
    }

    pub fn job(mut self, job: &str) -> Self {
        self.subout.job = job.to_string();
        self
    }

    pub fn lot(mut self, lot: &str) -> Self {
        self.subout.lot_number = lot.to_string();
        self
    }

    pub fn status(mut self, status: SubOutStatus) -> Self {
        self.subout.status = status;
        self
    }

    pub fn leave(mut self, date: NaiveDate) -> Self {
        self.subout.leave_mfc_date = Some(date);
        self
    }

    pub fn due_to_site(mut self, date: NaiveDate) -> Self {
        self.subout.due_to_site_date = Some(date);
        self
    }

    pub fn planned_loads(mut self, outbound: u32, inbound: u32) -> Self {
        self.subout.planned_outbound_loads = outbound;
        self.subout.planned_inbound_loads = inbound;
        self
    }

    pub fn missing_steel(mut self) -> Self {
        self.subout.missing_steel = true;
        self
    }

    pub fn build(self) -> SubOut {
        self.subout
    }
}

// ==========================================
// Item builder
// ==========================================

pub struct ItemBuilder {
    item: Item,
}

impl ItemBuilder {
    pub fn new(item_id: &str) -> Self {
        Self {
            item: Item {
                item_id: item_id.to_string(),
                subout_id: SUBOUT_ID.to_string(),
                source_type: SourceType::LongShapes,
                send_type: SendType::PartsOnPallets,
                barcode: None,
                description: None,
                quantity: 1,
                weight_lbs: 1_000.0,
                pallet_id: None,
                load_id: None,
            },
        }
    }

    pub fn subout(mut self, subout_id: &str) -> Self {
        self.item.subout_id = subout_id.to_string();
        self
    }

    pub fn send_type(mut self, send_type: SendType) -> Self {
        self.item.send_type = send_type;
        self
    }

    pub fn source(mut self, source_type: SourceType) -> Self {
        self.item.source_type = source_type;
        self
    }

    pub fn barcode(mut self, barcode: &str) -> Self {
        self.item.barcode = Some(barcode.to_string());
        self
    }

    pub fn weight(mut self, weight_lbs: f64) -> Self {
        self.item.weight_lbs = weight_lbs;
        self
    }

    pub fn on_pallet(mut self, pallet_id: &str) -> Self {
        self.item.pallet_id = Some(pallet_id.to_string());
        self
    }

    pub fn on_load(mut self, load_id: &str) -> Self {
        self.item.load_id = Some(load_id.to_string());
        self
    }

    pub fn build(self) -> Item {
        self.item
    }
}

// ==========================================
// Load / Pallet builders
// ==========================================

pub struct LoadBuilder {
    load: Load,
}

impl LoadBuilder {
    pub fn new(load_id: &str, direction: LoadDirection) -> Self {
        Self {
            load: Load {
                load_id: load_id.to_string(),
                subout_id: SUBOUT_ID.to_string(),
                load_number: format!("{}-001", direction.prefix()),
                direction,
                status: LoadStatus::Planned,
                capacity_lbs: 48_000.0,
                scheduled_date: None,
                actual_date: None,
                carrier: None,
            },
        }
    }

    pub fn number(mut self, load_number: &str) -> Self {
        self.load.load_number = load_number.to_string();
        self
    }

    pub fn status(mut self, status: LoadStatus) -> Self {
        self.load.status = status;
        self
    }

    pub fn capacity(mut self, capacity_lbs: f64) -> Self {
        self.load.capacity_lbs = capacity_lbs;
        self
    }

    pub fn build(self) -> Load {
        self.load
    }
}

pub struct PalletBuilder {
    pallet: Pallet,
}

impl PalletBuilder {
    pub fn new(pallet_id: &str) -> Self {
        Self {
            pallet: Pallet {
                pallet_id: pallet_id.to_string(),
                subout_id: SUBOUT_ID.to_string(),
                pallet_number: "P-001".to_string(),
                status: PalletStatus::Open,
                length_in: None,
                width_in: None,
                height_in: None,
                weight_lbs: None,
                load_id: None,
            },
        }
    }

    pub fn weighed(mut self, weight_lbs: f64) -> Self {
        self.pallet.weight_lbs = Some(weight_lbs);
        self
    }

    pub fn on_load(mut self, load_id: &str) -> Self {
        self.pallet.load_id = Some(load_id.to_string());
        self
    }

    pub fn build(self) -> Pallet {
        self.pallet
    }
}

pub fn snapshot(subout: SubOut, items: Vec<Item>, loads: Vec<Load>, pallets: Vec<Pallet>) -> SubOutSnapshot {
    SubOutSnapshot {
        subout,
        items,
        loads,
        pallets,
    }
}
