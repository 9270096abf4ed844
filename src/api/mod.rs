// ==========================================
// SubOuts Tracker - API layer
// ==========================================
// Composes the rule engines with a store collaborator and the rule
// configuration. The only layer that logs.
// ==========================================

pub mod board_api;
pub mod error;
pub mod store;

pub use board_api::{compose_card, AssignmentOutcome, BoardApi, LoadCapacityView, SubOutCard};
pub use error::{ApiError, ApiResult};
pub use store::{InMemorySubOutStore, SubOutStore};
