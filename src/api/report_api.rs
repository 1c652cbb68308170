// ==========================================
// 晨检值班排班系统 - 晨检报告接口
// ==========================================
// 职责: 晨检结果的记录与查询
// 权限: 管理员，或当日担当成员本人（按邮箱比对）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::DEFAULT_LOG_RETENTION;
use crate::config::ConfigManager;
use crate::domain::types::CheckStatus;
use crate::domain::{CheckResult, UserProfile};
use crate::engine::DutyOrchestrator;
use crate::repository::{ChangeLogRepository, CheckResultRepository};
use chrono::NaiveDate;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// ==========================================
// ReportApi - 晨检报告接口
// ==========================================
pub struct ReportApi {
    report_repo: CheckResultRepository,
    change_log: ChangeLogRepository,
    orchestrator: Arc<DutyOrchestrator>,
    log_retention: usize,
}

impl ReportApi {
    /// 从共享连接创建接口实例
    pub fn new(conn: Arc<Mutex<Connection>>, orchestrator: Arc<DutyOrchestrator>) -> Self {
        let log_retention = ConfigManager::from_connection(Arc::clone(&conn))
            .get_log_retention()
            .unwrap_or(DEFAULT_LOG_RETENTION);
        Self {
            report_repo: CheckResultRepository::from_connection(Arc::clone(&conn)),
            change_log: ChangeLogRepository::from_connection(conn),
            orchestrator,
            log_retention,
        }
    }

    /// 查询某日晨检结果
    pub fn get_report(&self, date: NaiveDate) -> ApiResult<Option<CheckResult>> {
        Ok(self.report_repo.find_by_date(date)?)
    }

    /// 记录某日晨检结果
    ///
    /// 权限: 管理员直接放行；普通成员要求其邮箱与当日担当成员
    /// 的名册邮箱一致
    pub fn save_report(
        &self,
        actor: &UserProfile,
        date: NaiveDate,
        result: &CheckResult,
    ) -> ApiResult<()> {
        let duty_member_name = self.duty_member_name(date)?;

        if !actor.is_admin() {
            let roster = self.orchestrator.load_roster()?;
            let duty_member = roster
                .iter()
                .find(|m| m.name == duty_member_name)
                .ok_or_else(|| {
                    ApiError::NotFound(format!("担当成员不在名册中: {}", duty_member_name))
                })?;
            if duty_member.email != actor.email {
                return Err(ApiError::PermissionDenied(format!(
                    "점검 권한이 없습니다. (actor={}, duty={})",
                    actor.email, duty_member_name
                )));
            }
        }

        self.report_repo.upsert(date, result)?;

        let status_text = match result.status {
            CheckStatus::CompletedNormal => "정상",
            CheckStatus::CompletedWithIssues => "이슈 있음",
        };
        self.change_log.append(
            &format!(
                "{} 점검이 '{}'에 의해 완료되었습니다. (결과: {})",
                date.format("%Y-%m-%d"),
                actor.name,
                status_text
            ),
            self.log_retention,
        )?;

        Ok(())
    }

    /// 当日担当成员名，非工作日或无担当时报错
    fn duty_member_name(&self, date: NaiveDate) -> ApiResult<String> {
        let assignment = self
            .orchestrator
            .duty_on(date)?
            .ok_or_else(|| ApiError::BusinessRuleViolation(format!("{} 은(는) 근무일이 아닙니다.", date)))?;
        assignment.member.ok_or_else(|| {
            ApiError::BusinessRuleViolation(format!("{} 은(는) 담당자가 없는 날입니다.", date))
        })
    }
}
