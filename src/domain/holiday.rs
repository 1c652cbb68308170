// ==========================================
// 晨检值班排班系统 - 休日实体与内置节日表
// ==========================================
// 生效休日集 = 内置节日表(按年) + 用户自定义休日
// 匹配规则: 仅按日历日期精确相等，不按名称、不做周期规则
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// Holiday - 休日
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holiday {
    /// 日历日期
    pub date: NaiveDate,
    /// 显示名
    pub name: String,
}

impl Holiday {
    pub fn new(date: NaiveDate, name: &str) -> Self {
        Self {
            date,
            name: name.to_string(),
        }
    }

    /// 从 ISO 日期字符串（YYYY-MM-DD）构造，格式非法时返回 None
    ///
    /// 存储边界负责把 None 升级为显式错误（快速失败）
    pub fn from_iso(raw: &str, name: &str) -> Option<Self> {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .map(|date| Self::new(date, name))
    }
}

// ==========================================
// 内置节日表（韩国法定公休日）
// ==========================================

/// 指定年份的内置节日表，未收录年份返回空表
pub fn fixed_holidays_for_year(year: i32) -> Vec<Holiday> {
    let table: &[(&str, &str)] = match year {
        2024 => &[
            ("2024-01-01", "신정"),
            ("2024-02-09", "설날 연휴"),
            ("2024-02-10", "설날"),
            ("2024-02-11", "설날 연휴"),
            ("2024-02-12", "설날 연휴"),
            ("2024-03-01", "삼일절"),
            ("2024-04-10", "국회의원 선거"),
            ("2024-05-01", "근로자의 날"),
            ("2024-05-05", "어린이날"),
            ("2024-05-06", "어린이날 대체공휴일"),
            ("2024-05-15", "부처님 오신 날"),
            ("2024-06-06", "현충일"),
            ("2024-08-15", "광복절"),
            ("2024-09-16", "추석 연휴"),
            ("2024-09-17", "추석"),
            ("2024-09-18", "추석 연휴"),
            ("2024-10-03", "개천절"),
            ("2024-10-09", "한글날"),
            ("2024-12-25", "크리스마스"),
        ],
        2025 => &[
            ("2025-01-01", "신정"),
            ("2025-01-28", "설날 연휴"),
            ("2025-01-29", "설날"),
            ("2025-01-30", "설날 연휴"),
            ("2025-03-01", "삼일절"),
            ("2025-05-01", "근로자의 날"),
            ("2025-05-05", "어린이날"),
            ("2025-05-06", "부처님 오신 날"),
            ("2025-06-06", "현충일"),
            ("2025-08-15", "광복절"),
            ("2025-10-03", "개천절"),
            ("2025-10-05", "추석 연휴"),
            ("2025-10-06", "추석"),
            ("2025-10-07", "추석 연휴"),
            ("2025-10-09", "한글날"),
            ("2025-12-25", "크리스마스"),
        ],
        _ => &[],
    };

    table
        .iter()
        .map(|(raw, name)| {
            // 表内日期为编译期常量，解析必然成功
            Holiday::from_iso(raw, name).expect("builtin holiday table contains valid dates")
        })
        .collect()
}
