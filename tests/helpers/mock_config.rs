// ==========================================
// Mock rule configuration - integration tests
// ==========================================

use subouts_tracker::config::{ConfigResult, RuleConfigReader};
use subouts_tracker::engine::HeatMapSettings;

#[derive(Debug, Clone)]
pub struct MockConfig {
    pub default_load_capacity_lbs: f64,
    pub capacity_warning_ratio: f64,
    pub heat: HeatMapSettings,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            default_load_capacity_lbs: 48_000.0,
            capacity_warning_ratio: 0.85,
            heat: HeatMapSettings::default(),
        }
    }
}

impl MockConfig {
    pub fn with_capacity(capacity_lbs: f64) -> Self {
        Self {
            default_load_capacity_lbs: capacity_lbs,
            ..Self::default()
        }
    }
}

impl RuleConfigReader for MockConfig {
    fn default_load_capacity_lbs(&self) -> ConfigResult<f64> {
        Ok(self.default_load_capacity_lbs)
    }

    fn capacity_warning_ratio(&self) -> ConfigResult<f64> {
        Ok(self.capacity_warning_ratio)
    }

    fn heat_map_settings(&self) -> ConfigResult<HeatMapSettings> {
        Ok(self.heat)
    }
}
