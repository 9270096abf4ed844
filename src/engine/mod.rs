// ==========================================
// SubOuts Tracker - rule engine layer
// ==========================================
// Pure functions over immutable snapshots.
// Red line: no I/O, no logging, no retained references.
// ==========================================

pub mod activity;
pub mod clock;
pub mod error;
pub mod load_assignment;
pub mod numbering;
pub mod status_lifecycle;
pub mod subout_rules;
pub mod urgency;

pub use activity::ActivityBuilder;
pub use clock::{Clock, FixedClock, SystemClock};
pub use error::{RuleError, RuleResult};
pub use load_assignment::{AssignmentPlan, LoadAssignmentRules, LoadProgress, PalletPackingPlan};
pub use numbering::{next_load_number, next_pallet_number};
pub use status_lifecycle::{AdvisoryStatusChange, StatusChange, StatusLifecycle, StatusTrigger};
pub use subout_rules::{DeletionPlan, FieldChange, SubOutEdit, SubOutRules};
pub use urgency::{HeatMapSettings, HeatTint, TintColor, UrgencyScorer};
