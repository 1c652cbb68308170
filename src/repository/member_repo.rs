// ==========================================
// 晨检值班排班系统 - 名册仓储
// ==========================================
// 职责: 管理 member 表的读写
// 约束: 名册只整体替换（position 决定轮换顺序），不做局部更新
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::MemberGroup;
use crate::domain::Member;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, Result as SqliteResult};
use std::sync::{Arc, Mutex};

// ==========================================
// MemberRepository - 名册仓储
// ==========================================
pub struct MemberRepository {
    conn: Arc<Mutex<Connection>>,
}

impl MemberRepository {
    /// 创建新的名册仓储实例
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

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按名册顺序读取全部成员
    pub fn find_all(&self) -> RepositoryResult<Vec<Member>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT id, name, group_tag, email, phone
            FROM member
            ORDER BY position
            "#,
        )?;

        let members = stmt
            .query_map([], |row| {
                Ok(Member {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    group: MemberGroup::from_str(&row.get::<_, String>(2)?),
                    email: row.get(3)?,
                    phone: row.get(4)?,
                })
            })?
            .collect::<SqliteResult<Vec<Member>>>()?;

        Ok(members)
    }

    /// 整体替换名册（事务内先清空再按顺序写入）
    pub fn replace_all(&self, members: &[Member]) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute("BEGIN TRANSACTION", [])?;

        let result = (|| -> RepositoryResult<()> {
            conn.execute("DELETE FROM member", [])?;
            for (position, member) in members.iter().enumerate() {
                conn.execute(
                    r#"
                    INSERT INTO member (id, name, group_tag, email, phone, position)
                    VALUES (?1, ?2, ?3, ?4, ?5, ?6)
                    "#,
                    params![
                        member.id,
                        member.name,
                        member.group.to_db_str(),
                        member.email,
                        member.phone,
                        position as i64,
                    ],
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

    /// 名册成员数量
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM member", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
