// ==========================================
// 晨检值班排班系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::db::open_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// 回溯上限默认值（月）
pub const DEFAULT_LOOKBACK_MONTHS: u32 = 24;

/// 变更日志保留条数默认值
pub const DEFAULT_LOG_RETENTION: usize = 100;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_config_value(key)?
            .unwrap_or_else(|| default.to_string()))
    }

    /// 写入 global scope 配置值
    pub fn set_config(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES ('global', ?1, ?2)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        Ok(())
    }

    /// 起始下标回填的回溯上限（月）
    pub fn get_lookback_months(&self) -> RepositoryResult<u32> {
        let value = self.get_config_or_default(
            config_keys::LOOKBACK_MONTHS,
            &DEFAULT_LOOKBACK_MONTHS.to_string(),
        )?;
        Ok(value.parse::<u32>().unwrap_or(DEFAULT_LOOKBACK_MONTHS))
    }

    /// 变更日志保留条数
    pub fn get_log_retention(&self) -> RepositoryResult<usize> {
        let value = self.get_config_or_default(
            config_keys::LOG_RETENTION,
            &DEFAULT_LOG_RETENTION.to_string(),
        )?;
        Ok(value.parse::<usize>().unwrap_or(DEFAULT_LOG_RETENTION))
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    /// 回填回溯上限（月）
    pub const LOOKBACK_MONTHS: &str = "lookback_months";

    /// 变更日志保留条数
    pub const LOG_RETENTION: &str = "log_retention";
}
