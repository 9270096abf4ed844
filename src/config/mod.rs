// ==========================================
// SubOuts Tracker - configuration layer
// ==========================================

pub mod config_manager;
pub mod rule_config_trait;

pub use config_manager::{config_keys, ConfigError, ConfigManager, ConfigResult, ENV_PREFIX};
pub use rule_config_trait::RuleConfigReader;
