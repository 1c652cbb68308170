// ==========================================
// 晨检值班排班系统 - 轮换起始下标仓储
// ==========================================
// 职责: 管理 rotation_offset 表，按 (year, month) 记录每月起始下标
// 并发契约: record_if_absent 使用 INSERT OR IGNORE，
//           两个客户端同时回填同一月份时先写者生效（幂等）
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::MonthKey;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// RotationOffsetRepository - 起始下标仓储
// ==========================================
pub struct RotationOffsetRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RotationOffsetRepository {
    /// 创建新的起始下标仓储实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 查询某月记录的起始下标
    pub fn find(&self, key: MonthKey) -> RepositoryResult<Option<usize>> {
        let conn = self.get_conn()?;

        let value: Option<i64> = conn
            .query_row(
                "SELECT start_index FROM rotation_offset WHERE year = ?1 AND month = ?2",
                params![key.year, key.month],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value.map(|v| v as usize))
    }

    /// 仅在缺失时记录某月起始下标（check-before-write 等价物）
    ///
    /// # 返回
    /// - Ok(true): 本次写入生效
    /// - Ok(false): 已存在记录，未覆盖
    pub fn record_if_absent(&self, key: MonthKey, start_index: usize) -> RepositoryResult<bool> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"
            INSERT OR IGNORE INTO rotation_offset (year, month, start_index)
            VALUES (?1, ?2, ?3)
            "#,
            params![key.year, key.month, start_index as i64],
        )?;

        Ok(affected > 0)
    }

    /// 清空全部起始下标（名册或休日变更后强制重算）
    pub fn clear_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM rotation_offset", [])?;
        Ok(affected)
    }

    /// 记录总数（测试与诊断用）
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 =
            conn.query_row("SELECT COUNT(*) FROM rotation_offset", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
