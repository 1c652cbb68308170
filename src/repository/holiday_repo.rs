// ==========================================
// 晨检值班排班系统 - 自定义休日仓储
// ==========================================
// 职责: 管理 custom_holiday 表的读写
// 策略: 库内日期字符串非法时显式报错（快速失败），不静默跳过
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::Holiday;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// CustomHolidayRepository - 自定义休日仓储
// ==========================================
pub struct CustomHolidayRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CustomHolidayRepository {
    /// 创建新的自定义休日仓储实例
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

    /// 读取全部自定义休日（按日期排序）
    pub fn find_all(&self) -> RepositoryResult<Vec<Holiday>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT holiday_date, name FROM custom_holiday ORDER BY holiday_date",
        )?;

        let rows = stmt
            .query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
            })?
            .collect::<SqliteResult<Vec<(String, String)>>>()?;

        let mut holidays = Vec::with_capacity(rows.len());
        for (raw_date, name) in rows {
            let holiday = Holiday::from_iso(&raw_date, &name).ok_or_else(|| {
                RepositoryError::FieldValueError {
                    field: "holiday_date".to_string(),
                    message: format!("非法日期字符串: {}", raw_date),
                }
            })?;
            holidays.push(holiday);
        }

        Ok(holidays)
    }

    /// 整体替换自定义休日列表
    pub fn replace_all(&self, holidays: &[Holiday]) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| -> RepositoryResult<()> {
            conn.execute("DELETE FROM custom_holiday", [])?;
            for holiday in holidays {
                conn.execute(
                    "INSERT OR REPLACE INTO custom_holiday (holiday_date, name) VALUES (?1, ?2)",
                    params![holiday.date.format("%Y-%m-%d").to_string(), holiday.name],
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
}
