// ==========================================
// 晨检值班排班系统 - 排班实体与月份键
// ==========================================
// MonthKey: 结构化复合键 (year, month)，替代字符串拼接键
// 月份全系统统一使用 1 基（chrono 约定）
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// ==========================================
// MonthKey - 月份复合键
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    /// 1 基月份 (1..=12)
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// 从日期取所在月份键
    pub fn from_date(date: NaiveDate) -> Self {
        use chrono::Datelike;
        Self::new(date.year(), date.month())
    }

    /// 上一个月（跨年回绕）
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self::new(self.year - 1, 12)
        } else {
            Self::new(self.year, self.month - 1)
        }
    }

    /// 下一个月（跨年回绕）
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self::new(self.year + 1, 1)
        } else {
            Self::new(self.year, self.month + 1)
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ==========================================
// DutyAssignment - 单日值班分配
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DutyAssignment {
    /// 值班成员名，非工作日为 None
    pub member: Option<String>,
    /// 非工作日标记（周末或休日，二者重叠也只记一次）
    pub is_holiday: bool,
    /// 休日名（周末无匹配休日时为 None）
    pub holiday_name: Option<String>,
    /// 人工换班覆盖标记（由 Orchestrator 叠加，调度器不设置）
    pub is_overridden: bool,
}

impl DutyAssignment {
    /// 工作日分配
    pub fn business(member: &str) -> Self {
        Self {
            member: Some(member.to_string()),
            is_holiday: false,
            holiday_name: None,
            is_overridden: false,
        }
    }

    /// 非工作日分配
    pub fn holiday(name: Option<&str>) -> Self {
        Self {
            member: None,
            is_holiday: true,
            holiday_name: name.map(|n| n.to_string()),
            is_overridden: false,
        }
    }
}

/// 月排班表: 日号(1..=月天数) → 分配，键全覆盖
pub type MonthSchedule = BTreeMap<u32, DutyAssignment>;

// ==========================================
// ChangeLogEntry - 变更日志条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeLogEntry {
    /// ISO 8601 时间戳
    pub timestamp: String,
    pub description: String,
}
