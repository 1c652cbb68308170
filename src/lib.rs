// ==========================================
// 晨检值班排班系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 团队晨检值班轮换 (管理员最终控制权)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 轮换排班规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{CheckStatus, ChecklistItemState, MemberGroup, UserRole};

// 领域实体
pub use domain::{
    ChangeLogEntry, CheckResult, DutyAssignment, Holiday, Member, MonthKey, MonthSchedule,
    UserProfile,
};

// 引擎
pub use engine::{compute_month, DutyOrchestrator, EngineError, MonthComputation};

// API
pub use api::{HolidayApi, ReportApi, RosterApi, ScheduleApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "晨检值班排班系统";

// 数据库版本
pub const DB_VERSION: &str = "v0.1";
