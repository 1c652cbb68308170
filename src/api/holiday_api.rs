// ==========================================
// 晨检值班排班系统 - 休日管理接口
// ==========================================
// 职责: 自定义休日查询与整体替换（仅管理员）
// 策略: 日期字符串非法立即报错（快速失败），不静默落库
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::roster_api::require_admin;
use crate::config::config_manager::DEFAULT_LOG_RETENTION;
use crate::config::ConfigManager;
use crate::domain::{Holiday, UserProfile};
use crate::repository::{
    ChangeLogRepository, CustomHolidayRepository, RotationOffsetRepository,
};
use rusqlite::Connection;
use std::sync::{Arc, Mutex};
use tracing::info;

// ==========================================
// HolidayApi - 休日管理接口
// ==========================================
pub struct HolidayApi {
    holiday_repo: CustomHolidayRepository,
    offset_repo: RotationOffsetRepository,
    change_log: ChangeLogRepository,
    log_retention: usize,
}

impl HolidayApi {
    /// 从共享连接创建接口实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        let log_retention = ConfigManager::from_connection(Arc::clone(&conn))
            .get_log_retention()
            .unwrap_or(DEFAULT_LOG_RETENTION);
        Self {
            holiday_repo: CustomHolidayRepository::from_connection(Arc::clone(&conn)),
            offset_repo: RotationOffsetRepository::from_connection(Arc::clone(&conn)),
            change_log: ChangeLogRepository::from_connection(conn),
            log_retention,
        }
    }

    /// 查询自定义休日列表
    pub fn list_custom_holidays(&self) -> ApiResult<Vec<Holiday>> {
        Ok(self.holiday_repo.find_all()?)
    }

    /// 整体替换自定义休日列表（仅管理员）
    ///
    /// 入参为 (YYYY-MM-DD, 名称) 原始字符串对；休日变更改变工作日
    /// 集合，历史起始下标全部失效，清空后按需重算
    pub fn replace_custom_holidays(
        &self,
        actor: &UserProfile,
        raw_holidays: &[(String, String)],
    ) -> ApiResult<()> {
        require_admin(actor, "휴일 관리")?;

        let mut holidays = Vec::with_capacity(raw_holidays.len());
        for (raw_date, name) in raw_holidays {
            let holiday = Holiday::from_iso(raw_date, name).ok_or_else(|| {
                ApiError::InvalidInput(format!("非法休日日期字符串: {}", raw_date))
            })?;
            holidays.push(holiday);
        }

        self.holiday_repo.replace_all(&holidays)?;
        let cleared = self.offset_repo.clear_all()?;
        info!(holidays = holidays.len(), cleared, "自定义休日已整体替换");

        self.change_log.append(
            "사용자 지정 휴일 목록이 변경되었습니다. 스케줄이 재계산됩니다.",
            self.log_retention,
        )?;

        Ok(())
    }
}
