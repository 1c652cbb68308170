// ==========================================
// 晨检值班排班系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为，避免"部分模块外键开启/部分不开启"
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 提供建表入口，库和测试共用同一份 schema
// ==========================================

use rusqlite::Connection;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要"每个连接"单独开启
/// - busy_timeout 需要"每个连接"单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等，全部 CREATE TABLE IF NOT EXISTS）
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        -- 团队成员（position 决定轮换顺序）
        CREATE TABLE IF NOT EXISTS member (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            group_tag TEXT NOT NULL,
            email TEXT NOT NULL,
            phone TEXT NOT NULL,
            position INTEGER NOT NULL
        );

        -- 用户自定义休日（与内置节日表合并生效）
        CREATE TABLE IF NOT EXISTS custom_holiday (
            holiday_date TEXT PRIMARY KEY,
            name TEXT NOT NULL
        );

        -- 每月轮换起始下标
        CREATE TABLE IF NOT EXISTS rotation_offset (
            year INTEGER NOT NULL,
            month INTEGER NOT NULL,
            start_index INTEGER NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (year, month)
        );

        -- 人工换班覆盖（按 年/月/日 记录替换后的成员名）
        CREATE TABLE IF NOT EXISTS schedule_override (
            year INTEGER NOT NULL,
            month INTEGER NOT NULL,
            day INTEGER NOT NULL,
            member_name TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (year, month, day)
        );

        -- 变更日志（有界保留，最新在前）
        CREATE TABLE IF NOT EXISTS change_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            description TEXT NOT NULL
        );

        -- 晨检结果（按日期一条）
        CREATE TABLE IF NOT EXISTS check_result (
            check_date TEXT PRIMARY KEY,
            status TEXT NOT NULL,
            checklist_json TEXT NOT NULL,
            recorded_at TEXT NOT NULL
        );

        -- 用户档案（登录身份由外部认证提供，这里只存角色映射）
        CREATE TABLE IF NOT EXISTS user_profile (
            uid TEXT PRIMARY KEY,
            email TEXT NOT NULL,
            name TEXT NOT NULL,
            role TEXT NOT NULL
        );

        -- 配置 key-value
        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );
        "#,
    )?;
    Ok(())
}
