// ==========================================
// 晨检值班排班系统 - 引擎层
// ==========================================
// 职责: 轮换排班规则与跨月接续，不拼 SQL
// 红线: compute_month 是纯函数，不得携带隐藏状态
// ==========================================

pub mod error;
pub mod orchestrator;
pub mod rotation;

// 重导出核心引擎
pub use error::{EngineError, EngineResult};
pub use orchestrator::DutyOrchestrator;
pub use rotation::{compute_month, is_business_day, is_weekend, MonthComputation};
