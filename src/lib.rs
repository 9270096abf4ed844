// ==========================================
// SubOuts Tracker - core library
// ==========================================
// Rule core for fabrication sub-outs: status lifecycle, load and
// pallet assignment, top-bar urgency and heat-map tinting.
// Persistence and UI sit outside this crate.
// ==========================================

// ==========================================
// Modules
// ==========================================

// Domain layer - entities and value types
pub mod domain;

// Engine layer - pure rule engines
pub mod engine;

// Configuration layer
pub mod config;

// Logging
pub mod logging;

// API layer - engine composition over a store
pub mod api;

// ==========================================
// Re-exports
// ==========================================

pub use domain::types::{
    AssignmentState, CapacityBand, LoadDirection, LoadStatus, PalletStatus, SendType,
    SourceType, SubOutStatus, TopBarCategory,
};

pub use domain::{
    ActivityEntry, ActivityKind, Item, Load, NewSubOut, Pallet, SubOut, SubOutPatch,
    SubOutSnapshot,
};

pub use engine::{
    Clock, FixedClock, HeatMapSettings, HeatTint, LoadAssignmentRules, LoadProgress, RuleError,
    StatusLifecycle, SubOutRules, SystemClock, UrgencyScorer,
};

pub use config::{ConfigManager, RuleConfigReader};

pub use api::{ApiError, BoardApi, InMemorySubOutStore, SubOutCard, SubOutStore};

// ==========================================
// Constants
// ==========================================

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = "SubOuts Tracker";
