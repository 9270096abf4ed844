// ==========================================
// SubOuts Tracker - rule configuration reader
// ==========================================
// Read-only view of the settings the service layer feeds into the
// rule engines. Implemented by ConfigManager.
// ==========================================

use crate::config::config_manager::ConfigResult;
use crate::engine::urgency::HeatMapSettings;

pub trait RuleConfigReader: Send + Sync {
    /// Capacity for newly created loads.
    ///
    /// # Default
    /// - 48000 lb
    fn default_load_capacity_lbs(&self) -> ConfigResult<f64>;

    /// used / capacity ratio above which a load turns orange.
    ///
    /// # Default
    /// - 0.85
    fn capacity_warning_ratio(&self) -> ConfigResult<f64>;

    /// Heat-map window and tint alphas.
    ///
    /// # Default
    /// - window 14 days, green alpha 0.18, max alpha 0.60
    fn heat_map_settings(&self) -> ConfigResult<HeatMapSettings>;
}
