// ==========================================
// 晨检值班排班系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 策略: 非法日历输入快速失败; 空名册不是错误（文档化边界情况）
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 输入校验错误 =====
    #[error("非法日历值: year={year}, month={month}")]
    InvalidCalendar { year: i32, month: u32 },

    // ===== 接续计算错误 =====
    #[error("值班查找超出扫描上限: 自{from}起{scanned}天内无工作日")]
    DutyScanExhausted { from: String, scanned: u32 },

    // ===== 下层错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
