// ==========================================
// 晨检值班排班系统 - 主入口
// ==========================================
// 技术栈: Rust + SQLite
// 用途: 打开（或初始化）本地库，输出本月排班与今日/次工作日值班
// ==========================================

use chrono::{Datelike, Local};
use duty_roster::config::ConfigManager;
use duty_roster::engine::DutyOrchestrator;
use duty_roster::{db, logging, ScheduleApi};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

/// 默认数据库路径（用户数据目录下）
fn default_db_path() -> String {
    let mut path = dirs::data_dir().unwrap_or_else(|| std::path::PathBuf::from("."));
    path.push("duty-roster");
    if let Err(e) = std::fs::create_dir_all(&path) {
        tracing::warn!(error = %e, "创建数据目录失败，回退到当前目录");
        return "duty-roster.db".to_string();
    }
    path.push("duty-roster.db");
    path.to_string_lossy().to_string()
}

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", duty_roster::APP_NAME);
    tracing::info!("系统版本: {}", duty_roster::VERSION);
    tracing::info!("==================================================");

    // 打开数据库并建表
    let db_path = default_db_path();
    tracing::info!("使用数据库: {}", db_path);
    let conn = db::open_sqlite_connection(&db_path)?;
    db::init_schema(&conn)?;
    let conn = Arc::new(Mutex::new(conn));

    // 组装编排器与接口
    let config = ConfigManager::from_connection(Arc::clone(&conn));
    let lookback = config.get_lookback_months()?;
    let orchestrator = Arc::new(DutyOrchestrator::new(Arc::clone(&conn), lookback));
    let schedule_api = ScheduleApi::new(Arc::clone(&conn), Arc::clone(&orchestrator));

    // 本月排班
    let today = Local::now().date_naive();
    let schedule = schedule_api.month_view(today.year(), today.month())?;
    tracing::info!("{}년 {}월 스케줄:", today.year(), today.month());
    for (day, assignment) in &schedule {
        match (&assignment.member, assignment.is_holiday) {
            (Some(member), _) => {
                let marker = if assignment.is_overridden { " (변경됨)" } else { "" };
                tracing::info!("  {:2}일: {}{}", day, member, marker);
            }
            (None, true) => {
                let name = assignment.holiday_name.as_deref().unwrap_or("주말");
                tracing::info!("  {:2}일: 휴일 ({})", day, name);
            }
            (None, false) => tracing::info!("  {:2}일: 담당자 없음", day),
        }
    }

    // 今日/次工作日值班
    match schedule_api.duty_on(today)? {
        Some(assignment) => {
            tracing::info!("오늘 담당자: {}", assignment.member.as_deref().unwrap_or("없음"))
        }
        None => tracing::info!("오늘은 근무일이 아닙니다."),
    }
    let (next_date, next_assignment) = schedule_api.next_duty_after(today)?;
    tracing::info!(
        "다음 근무일 {} 담당자: {}",
        next_date,
        next_assignment.member.as_deref().unwrap_or("없음")
    );

    Ok(())
}
