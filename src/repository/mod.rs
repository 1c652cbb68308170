// ==========================================
// 晨检值班排班系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod change_log_repo;
pub mod error;
pub mod holiday_repo;
pub mod member_repo;
pub mod offset_repo;
pub mod override_repo;
pub mod report_repo;
pub mod user_repo;

// 重导出核心仓储
pub use change_log_repo::ChangeLogRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use holiday_repo::CustomHolidayRepository;
pub use member_repo::MemberRepository;
pub use offset_repo::RotationOffsetRepository;
pub use override_repo::ScheduleOverrideRepository;
pub use report_repo::CheckResultRepository;
pub use user_repo::UserProfileRepository;
