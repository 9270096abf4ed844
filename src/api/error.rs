// ==========================================
// SubOuts Tracker - API layer error types
// ==========================================
// Wraps rule violations, configuration problems and collaborator
// (store) failures. Every message names the offending entity.
// ==========================================

use crate::config::ConfigError;
use crate::engine::RuleError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // Rule violations
    // ==========================================
    #[error(transparent)]
    Rule(#[from] RuleError),

    #[error("duplicate lot number: job={job}, lot_number={lot_number}")]
    DuplicateLotNumber { job: String, lot_number: String },

    // ==========================================
    // Lookup
    // ==========================================
    #[error("{entity} not found: id={id}")]
    NotFound { entity: String, id: String },

    // ==========================================
    // Configuration
    // ==========================================
    #[error(transparent)]
    Config(#[from] ConfigError),

    // ==========================================
    // Store collaborator
    // ==========================================
    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

impl ApiError {
    pub fn not_found(entity: &str, id: &str) -> Self {
        ApiError::NotFound {
            entity: entity.to_string(),
            id: id.to_string(),
        }
    }

    /// The underlying rule violation, if this is one.
    pub fn rule(&self) -> Option<&RuleError> {
        match self {
            ApiError::Rule(e) => Some(e),
            _ => None,
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
