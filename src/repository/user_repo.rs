// ==========================================
// 晨检值班排班系统 - 用户档案仓储
// ==========================================
// 职责: 管理 user_profile 表
// 说明: 登录身份由外部认证服务校验，这里只保存 uid → 角色映射
// ==========================================

use crate::db::open_sqlite_connection;
use crate::domain::types::UserRole;
use crate::domain::UserProfile;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// UserProfileRepository - 用户档案仓储
// ==========================================
pub struct UserProfileRepository {
    conn: Arc<Mutex<Connection>>,
}

impl UserProfileRepository {
    /// 创建新的用户档案仓储实例
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

    /// 写入或更新用户档案
    pub fn upsert(&self, profile: &UserProfile) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"
            INSERT INTO user_profile (uid, email, name, role)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(uid) DO UPDATE SET
                email = ?2,
                name = ?3,
                role = ?4
            "#,
            params![
                profile.uid,
                profile.email,
                profile.name,
                profile.role.to_db_str(),
            ],
        )?;

        Ok(())
    }

    /// 按 uid 查询用户档案
    pub fn find_by_uid(&self, uid: &str) -> RepositoryResult<Option<UserProfile>> {
        let conn = self.get_conn()?;

        let profile = conn
            .query_row(
                "SELECT uid, email, name, role FROM user_profile WHERE uid = ?1",
                params![uid],
                |row| {
                    Ok(UserProfile {
                        uid: row.get(0)?,
                        email: row.get(1)?,
                        name: row.get(2)?,
                        role: UserRole::from_str(&row.get::<_, String>(3)?),
                    })
                },
            )
            .optional()?;

        Ok(profile)
    }

    /// 按邮箱查询用户档案（外部登录首次进入时与名册比对）
    pub fn find_by_email(&self, email: &str) -> RepositoryResult<Option<UserProfile>> {
        let conn = self.get_conn()?;

        let profile = conn
            .query_row(
                "SELECT uid, email, name, role FROM user_profile WHERE email = ?1",
                params![email],
                |row| {
                    Ok(UserProfile {
                        uid: row.get(0)?,
                        email: row.get(1)?,
                        name: row.get(2)?,
                        role: UserRole::from_str(&row.get::<_, String>(3)?),
                    })
                },
            )
            .optional()?;

        Ok(profile)
    }
}
