// ==========================================
// SubOuts Tracker - domain layer
// ==========================================
// Entities, value types and snapshots.
// No rule logic, no data access.
// ==========================================

pub mod activity;
pub mod item;
pub mod load;
pub mod snapshot;
pub mod subout;
pub mod types;

pub use activity::{ActivityEntry, ActivityKind};
pub use item::Item;
pub use load::{Load, Pallet, DEFAULT_LOAD_CAPACITY_LBS};
pub use snapshot::SubOutSnapshot;
pub use subout::{NewSubOut, SubOut, SubOutPatch};
pub use types::{
    AssignmentState, CapacityBand, LoadDirection, LoadStatus, PalletStatus, SendType,
    SourceType, SubOutStatus, TopBarCategory,
};
