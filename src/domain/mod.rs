// ==========================================
// 晨检值班排班系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、内置节日表
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod holiday;
pub mod member;
pub mod report;
pub mod schedule;
pub mod types;

// 重导出核心类型
pub use holiday::{fixed_holidays_for_year, Holiday};
pub use member::{default_members, Member, UserProfile};
pub use report::{checklist_template, ChecklistEntry, ChecklistItem, CheckResult};
pub use schedule::{ChangeLogEntry, DutyAssignment, MonthKey, MonthSchedule};
pub use types::{CheckStatus, ChecklistItemState, MemberGroup, UserRole};
