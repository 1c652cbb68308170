// ==========================================
// 晨检值班排班系统 - 排班查询与换班接口
// ==========================================
// 职责: 月排班视图、担当交换、覆盖重置、今日/次工作日值班
// 约束: 换班只允许工作日↔工作日，成对写入同一事务
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::roster_api::require_admin;
use crate::config::config_manager::DEFAULT_LOG_RETENTION;
use crate::config::ConfigManager;
use crate::domain::{ChangeLogEntry, DutyAssignment, MonthKey, MonthSchedule, UserProfile};
use crate::engine::DutyOrchestrator;
use crate::repository::{ChangeLogRepository, ScheduleOverrideRepository};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::info;

// ==========================================
// ScheduleApi - 排班接口
// ==========================================
pub struct ScheduleApi {
    orchestrator: Arc<DutyOrchestrator>,
    override_repo: ScheduleOverrideRepository,
    change_log: ChangeLogRepository,
    log_retention: usize,
}

impl ScheduleApi {
    /// 从共享连接创建接口实例
    pub fn new(conn: Arc<Mutex<Connection>>, orchestrator: Arc<DutyOrchestrator>) -> Self {
        let log_retention = ConfigManager::from_connection(Arc::clone(&conn))
            .get_log_retention()
            .unwrap_or(DEFAULT_LOG_RETENTION);
        Self {
            orchestrator,
            override_repo: ScheduleOverrideRepository::from_connection(Arc::clone(&conn)),
            change_log: ChangeLogRepository::from_connection(conn),
            log_retention,
        }
    }

    /// 某月排班表（已叠加换班覆盖）
    pub fn month_view(&self, year: i32, month: u32) -> ApiResult<MonthSchedule> {
        Ok(self.orchestrator.month_schedule(MonthKey::new(year, month))?)
    }

    /// 交换某月内两天的担当（仅管理员）
    ///
    /// 两天都必须已有担当成员（非工作日不可交换）
    pub fn swap_days(
        &self,
        actor: &UserProfile,
        year: i32,
        month: u32,
        first_day: u32,
        second_day: u32,
    ) -> ApiResult<()> {
        require_admin(actor, "담당자 교체")?;

        if first_day == second_day {
            return Err(ApiError::InvalidInput("不能与同一天交换".to_string()));
        }

        let key = MonthKey::new(year, month);
        let schedule = self.orchestrator.month_schedule(key)?;

        let first_member = member_of(&schedule, first_day)?;
        let second_member = member_of(&schedule, second_day)?;

        self.override_repo.upsert_many(
            key,
            &[
                (first_day, second_member.clone()),
                (second_day, first_member.clone()),
            ],
        )?;
        info!(%key, first_day, second_day, "担当已交换");

        self.change_log.append(
            &format!(
                "{}년 {}월: '{}'({}일)와(과) '{}'({}일)의 담당이 교체되었습니다.",
                year, month, first_member, first_day, second_member, second_day
            ),
            self.log_retention,
        )?;

        Ok(())
    }

    /// 某月是否存在换班覆盖
    pub fn has_overrides(&self, year: i32, month: u32) -> ApiResult<bool> {
        let overrides = self.override_repo.find_month(MonthKey::new(year, month))?;
        Ok(!overrides.is_empty())
    }

    /// 清空某月换班覆盖（仅管理员）
    pub fn reset_month_overrides(
        &self,
        actor: &UserProfile,
        year: i32,
        month: u32,
    ) -> ApiResult<usize> {
        require_admin(actor, "변경사항 초기화")?;

        let cleared = self.override_repo.clear_month(MonthKey::new(year, month))?;
        if cleared > 0 {
            self.change_log.append(
                &format!("{}년 {}월의 수동 변경사항이 초기화되었습니다.", year, month),
                self.log_retention,
            )?;
        }
        Ok(cleared)
    }

    /// 某日值班分配（非工作日返回 None）
    pub fn duty_on(&self, date: NaiveDate) -> ApiResult<Option<DutyAssignment>> {
        Ok(self.orchestrator.duty_on(date)?)
    }

    /// 自某日起的下一个工作日值班
    pub fn next_duty_after(&self, date: NaiveDate) -> ApiResult<(NaiveDate, DutyAssignment)> {
        Ok(self.orchestrator.next_duty_after(date)?)
    }

    /// 最近变更日志（最新在前）
    pub fn recent_change_log(&self, limit: usize) -> ApiResult<Vec<ChangeLogEntry>> {
        Ok(self.change_log.list_recent(limit)?)
    }
}

/// 取某日担当成员名，非工作日或无担当时报错
fn member_of(schedule: &MonthSchedule, day: u32) -> ApiResult<String> {
    let entry = schedule
        .get(&day)
        .ok_or_else(|| ApiError::InvalidInput(format!("日号越界: {}", day)))?;
    entry
        .member
        .clone()
        .ok_or_else(|| ApiError::BusinessRuleViolation(format!("{}일은 담당자가 없는 날입니다.", day)))
}
