// ==========================================
// 晨检值班排班系统 - 晨检结果仓储
// ==========================================
// 职责: 管理 check_result 表，按 ISO 日期一日一条
// 存储: 检查清单序列化为 JSON 存 checklist_json 列
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::CheckStatus;
use crate::domain::CheckResult;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// CheckResultRepository - 晨检结果仓储
// ==========================================
pub struct CheckResultRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CheckResultRepository {
    /// 创建新的晨检结果仓储实例
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

    /// 写入或覆盖某日晨检结果
    pub fn upsert(&self, date: NaiveDate, result: &CheckResult) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let checklist_json = serde_json::to_string(&result.checklist)
            .map_err(|e| RepositoryError::ValidationError(format!("检查清单序列化失败: {}", e)))?;

        conn.execute(
            r#"
            INSERT INTO check_result (check_date, status, checklist_json, recorded_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(check_date) DO UPDATE SET
                status = ?2,
                checklist_json = ?3,
                recorded_at = ?4
            "#,
            params![
                date.format("%Y-%m-%d").to_string(),
                result.status.to_db_str(),
                checklist_json,
                result.timestamp,
            ],
        )?;

        Ok(())
    }

    /// 查询某日晨检结果
    pub fn find_by_date(&self, date: NaiveDate) -> RepositoryResult<Option<CheckResult>> {
        let conn = self.get_conn()?;

        let row: Option<(String, String, String)> = conn
            .query_row(
                "SELECT status, checklist_json, recorded_at FROM check_result WHERE check_date = ?1",
                params![date.format("%Y-%m-%d").to_string()],
                |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?)),
            )
            .optional()?;

        let Some((status, checklist_json, recorded_at)) = row else {
            return Ok(None);
        };

        let checklist = serde_json::from_str(&checklist_json).map_err(|e| {
            RepositoryError::FieldValueError {
                field: "checklist_json".to_string(),
                message: format!("检查清单反序列化失败: {}", e),
            }
        })?;

        Ok(Some(CheckResult {
            status: CheckStatus::from_str(&status),
            checklist,
            timestamp: recorded_at,
        }))
    }
}
