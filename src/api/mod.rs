// ==========================================
// 晨检值班排班系统 - API 层
// ==========================================
// 职责: 业务接口与权限校验
// 红线: 管理员操作必须显式校验角色，错误必须可读
// ==========================================

pub mod error;
pub mod holiday_api;
pub mod mail;
pub mod report_api;
pub mod roster_api;
pub mod schedule_api;

// 重导出核心接口
pub use error::{ApiError, ApiResult};
pub use holiday_api::HolidayApi;
pub use mail::{bulk_notice_mailto, duty_notice_mailto};
pub use report_api::ReportApi;
pub use roster_api::RosterApi;
pub use schedule_api::ScheduleApi;
