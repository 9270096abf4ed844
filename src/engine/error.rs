// ==========================================
// SubOuts Tracker - rule engine error types
// ==========================================
// Reported synchronously to the caller, never retried.
// The engines perform no I/O and never log.
// ==========================================

use crate::domain::types::SendType;
use thiserror::Error;

/// Rule engine error
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RuleError {
    /// Status text outside the defined enum.
    #[error("invalid status transition: unknown status '{value}'")]
    InvalidStatusTransition { value: String },

    /// Job or lot number changed after creation.
    #[error("immutable field violation: {field} cannot change after creation")]
    ImmutableFieldViolation { field: String },

    /// Raw and CutToLength sides of one barcode in a single assignment.
    #[error("cross-barcode conflict: barcode={barcode} has both Raw and Cut to Length selected")]
    CrossBarcodeConflict { barcode: String },

    #[error("missing required field: {field}")]
    MissingRequiredField { field: String },

    #[error("pallet send type mismatch: item_id={item_id} is {send_type}, pallets hold Parts on Pallets only")]
    PalletSendTypeMismatch { item_id: String, send_type: SendType },

    /// Item that must travel with a pallet, or a loose loaded item sent to a pallet.
    #[error("pallet item rule: item_id={item_id} {reason}")]
    PalletItemRule { item_id: String, reason: String },

    #[error("unknown {entity}: id={id}")]
    UnknownEntity { entity: String, id: String },
}

/// Result alias
pub type RuleResult<T> = Result<T, RuleError>;
