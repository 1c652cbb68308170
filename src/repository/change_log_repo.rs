// ==========================================
// 晨检值班排班系统 - 变更日志仓储
// ==========================================
// 职责: 管理 change_log 表，有界保留（超出按最旧删除）
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::ChangeLogEntry;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::Utc;
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// ChangeLogRepository - 变更日志仓储
// ==========================================
pub struct ChangeLogRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ChangeLogRepository {
    /// 创建新的变更日志仓储实例
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

    /// 追加一条日志，并按保留上限裁剪最旧的条目
    pub fn append(&self, description: &str, retention: usize) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        let timestamp = Utc::now().to_rfc3339();

        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| -> RepositoryResult<()> {
            conn.execute(
                "INSERT INTO change_log (timestamp, description) VALUES (?1, ?2)",
                params![timestamp, description],
            )?;
            conn.execute(
                r#"
                DELETE FROM change_log
                WHERE id NOT IN (
                    SELECT id FROM change_log ORDER BY id DESC LIMIT ?1
                )
                "#,
                params![retention as i64],
            )?;
            Ok(())
        })();

        match result {
            Ok(()) => {
                conn.execute("COMMIT", [])?;
                Ok(())
            }
            Err(e) => {
                let _ = conn.execute("ROLLBACK", []);
                Err(e)
            }
        }
    }

    /// 读取最近的日志（最新在前）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<ChangeLogEntry>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT timestamp, description FROM change_log ORDER BY id DESC LIMIT ?1",
        )?;

        let entries = stmt
            .query_map(params![limit as i64], |row| {
                Ok(ChangeLogEntry {
                    timestamp: row.get(0)?,
                    description: row.get(1)?,
                })
            })?
            .collect::<SqliteResult<Vec<ChangeLogEntry>>>()?;

        Ok(entries)
    }

    /// 日志条数（测试用）
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM change_log", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
