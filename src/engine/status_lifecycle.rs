// ==========================================
// SubOuts Tracker - StatusLifecycle
// ==========================================
// Validates and advances SubOut status.
// Manual changes may jump to any status. The only automatic rule is
// the InProcess <-> Ready toggle driven by percent loaded.
// Stateless, side-effect free, no I/O.
// ==========================================

use crate::domain::types::{LoadStatus, PalletStatus, SubOutStatus};
use crate::engine::error::{RuleError, RuleResult};
use serde::{Deserialize, Serialize};

// ==========================================
// StatusChange
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StatusTrigger {
    Manual,    // stepper click or edit form
    Automatic, // percent-loaded recompute
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: SubOutStatus,
    pub to: SubOutStatus,
    pub trigger: StatusTrigger,
}

impl StatusChange {
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }

    /// Moves backwards on the stepper (OnSite never counts as a regression).
    pub fn is_regression(&self) -> bool {
        match (self.from.step_index(), self.to.step_index()) {
            (Some(a), Some(b)) => b < a,
            _ => false,
        }
    }
}

/// Advisory change for a Load or Pallet status. Never rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisoryStatusChange<S> {
    pub from: S,
    pub to: S,
    pub is_regression: bool,
}

// ==========================================
// StatusLifecycle
// ==========================================
pub struct StatusLifecycle;

impl StatusLifecycle {
    /// Automatic Ready/InProcess toggle.
    ///
    /// # Rules
    /// 1. InProcess and percent >= 100 -> Ready
    /// 2. Ready and percent < 100 -> InProcess
    /// 3. Any other status, or a non-finite percent, is returned unchanged
    pub fn apply_auto_status(current: SubOutStatus, percent_loaded: f64) -> SubOutStatus {
        if !percent_loaded.is_finite() {
            return current;
        }
        let fully_loaded = percent_loaded >= 100.0;
        match current {
            SubOutStatus::InProcess if fully_loaded => SubOutStatus::Ready,
            SubOutStatus::Ready if !fully_loaded => SubOutStatus::InProcess,
            other => other,
        }
    }

    /// Automatic change after a percent-loaded recompute; None when the
    /// status stays as it is.
    pub fn reconcile(current: SubOutStatus, percent_loaded: f64) -> Option<StatusChange> {
        let next = Self::apply_auto_status(current, percent_loaded);
        (next != current).then_some(StatusChange {
            from: current,
            to: next,
            trigger: StatusTrigger::Automatic,
        })
    }

    pub fn parse_status(value: &str) -> RuleResult<SubOutStatus> {
        SubOutStatus::from_label(value).ok_or_else(|| RuleError::InvalidStatusTransition {
            value: value.to_string(),
        })
    }

    /// Manual status change. Any defined status is reachable directly.
    pub fn set_status(current: SubOutStatus, requested: &str) -> RuleResult<StatusChange> {
        let to = Self::parse_status(requested)?;
        Ok(StatusChange {
            from: current,
            to,
            trigger: StatusTrigger::Manual,
        })
    }

    /// Next stepper status; None at Complete and OnSite.
    pub fn next_step(current: SubOutStatus) -> Option<SubOutStatus> {
        let idx = current.step_index()?;
        SubOutStatus::STEPPER.get(idx + 1).copied()
    }

    pub fn set_load_status(
        current: LoadStatus,
        requested: &str,
    ) -> RuleResult<AdvisoryStatusChange<LoadStatus>> {
        let to = LoadStatus::from_label(requested).ok_or_else(|| {
            RuleError::InvalidStatusTransition {
                value: requested.to_string(),
            }
        })?;
        Ok(AdvisoryStatusChange {
            from: current,
            to,
            is_regression: to < current,
        })
    }

    pub fn set_pallet_status(
        current: PalletStatus,
        requested: &str,
    ) -> RuleResult<AdvisoryStatusChange<PalletStatus>> {
        let to = PalletStatus::from_label(requested).ok_or_else(|| {
            RuleError::InvalidStatusTransition {
                value: requested.to_string(),
            }
        })?;
        Ok(AdvisoryStatusChange {
            from: current,
            to,
            is_regression: to < current,
        })
    }
}
