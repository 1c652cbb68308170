// ==========================================
// 晨检值班排班系统 - 配置层
// ==========================================

pub mod config_manager;

pub use config_manager::{
    config_keys, ConfigManager, DEFAULT_LOG_RETENTION, DEFAULT_LOOKBACK_MONTHS,
};
