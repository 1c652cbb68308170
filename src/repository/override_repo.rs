// ==========================================
// 晨检值班排班系统 - 换班覆盖仓储
// ==========================================
// 职责: 管理 schedule_override 表，按 (year, month, day) 记录人工换班
// 约束: 换班成对写入必须同一事务，避免半次交换
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::MonthKey;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// ==========================================
// ScheduleOverrideRepository - 换班覆盖仓储
// ==========================================
pub struct ScheduleOverrideRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ScheduleOverrideRepository {
    /// 创建新的换班覆盖仓储实例
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

    /// 读取某月全部覆盖: 日号 → 替换后的成员名
    pub fn find_month(&self, key: MonthKey) -> RepositoryResult<BTreeMap<u32, String>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT day, member_name FROM schedule_override
            WHERE year = ?1 AND month = ?2
            ORDER BY day
            "#,
        )?;

        let rows = stmt
            .query_map(params![key.year, key.month], |row| {
                Ok((row.get::<_, i64>(0)? as u32, row.get::<_, String>(1)?))
            })?
            .collect::<SqliteResult<Vec<(u32, String)>>>()?;

        Ok(rows.into_iter().collect())
    }

    /// 同一事务内写入多条覆盖（换班成对写入两天）
    pub fn upsert_many(&self, key: MonthKey, entries: &[(u32, String)]) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| -> RepositoryResult<()> {
            for (day, member_name) in entries {
                conn.execute(
                    r#"
                    INSERT INTO schedule_override (year, month, day, member_name)
                    VALUES (?1, ?2, ?3, ?4)
                    ON CONFLICT(year, month, day) DO UPDATE SET
                        member_name = ?4,
                        updated_at = datetime('now')
                    "#,
                    params![key.year, key.month, *day as i64, member_name],
                )?;
            }
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

    /// 清空某月覆盖
    pub fn clear_month(&self, key: MonthKey) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute(
            "DELETE FROM schedule_override WHERE year = ?1 AND month = ?2",
            params![key.year, key.month],
        )?;
        Ok(affected)
    }

    /// 清空全部覆盖（名册变更后）
    pub fn clear_all(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let affected = conn.execute("DELETE FROM schedule_override", [])?;
        Ok(affected)
    }
}
