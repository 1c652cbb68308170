// ==========================================
// 晨检值班排班系统 - 轮换排班核心
// ==========================================
// 契约: (year, month, 有序名册, 休日集, 起始下标)
//       → (月排班表, 下月起始下标)
// 红线: 纯函数。相同输入必须产生相同输出，
//       Orchestrator 依赖该性质跨月重放回填下标
// ==========================================

use crate::domain::{DutyAssignment, Holiday, MonthSchedule};
use crate::engine::error::{EngineError, EngineResult};
use chrono::{Datelike, Duration, NaiveDate, Weekday};
use std::collections::HashMap;

// ==========================================
// MonthComputation - 单月计算结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthComputation {
    /// 日号(1..=月天数) → 分配，键全覆盖
    pub schedule: MonthSchedule,
    /// 下月起始下标，已对名册长度取模（空名册固定为 0）
    pub next_offset: usize,
}

/// 是否周末（周六/周日）
pub fn is_weekend(date: NaiveDate) -> bool {
    matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// 是否工作日（非周末且不在休日集内）
pub fn is_business_day(date: NaiveDate, holidays: &[Holiday]) -> bool {
    !is_weekend(date) && !holidays.iter().any(|h| h.date == date)
}

/// 目标月份的天数（日历正确，含闰年）
fn days_in_month(year: i32, month: u32) -> EngineResult<u32> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(EngineError::InvalidCalendar { year, month })?;
    let next_first = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or(EngineError::InvalidCalendar { year, month })?;

    Ok(next_first.signed_duration_since(first).num_days() as u32)
}

/// 计算单月值班排班
///
/// # 参数
/// - year/month: 目标月份（1 基月份）
/// - members: 有序名册（轮换顺序即名册顺序）
/// - holidays: 生效休日集（内置节日表 + 自定义休日合并后）
/// - start_offset: 起始轮换下标，无需预先取模
///
/// # 规则
/// - 周末或休日: member=None, is_holiday=true，命中休日则带名称；
///   同日既是周末又是休日只记一次
/// - 工作日: 依名册顺序消费轮换，按名册长度回绕
/// - 空名册: 每天的 is_holiday 仍正确计算，但不分配任何成员，
///   next_offset 固定为 0（不是错误）
///
/// # 返回
/// - Ok(MonthComputation): 全覆盖的日→分配映射与下月起始下标
/// - Err(EngineError::InvalidCalendar): 月份越界或日历不可表示
pub fn compute_month(
    year: i32,
    month: u32,
    members: &[String],
    holidays: &[Holiday],
    start_offset: usize,
) -> EngineResult<MonthComputation> {
    let total_days = days_in_month(year, month)?;
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or(EngineError::InvalidCalendar { year, month })?;

    // 休日按日期精确匹配；同日多条时保留先出现的（内置表优先于自定义）
    let mut holiday_names: HashMap<NaiveDate, &str> = HashMap::new();
    for h in holidays {
        holiday_names.entry(h.date).or_insert(h.name.as_str());
    }

    let mut schedule = MonthSchedule::new();
    let mut member_index = start_offset;

    for day in 1..=total_days {
        let date = first + Duration::days(i64::from(day) - 1);
        let holiday_name = holiday_names.get(&date).copied();

        if is_weekend(date) || holiday_name.is_some() {
            schedule.insert(day, DutyAssignment::holiday(holiday_name));
        } else if members.is_empty() {
            // 空名册: 工作日不分配成员，休日标记仍正确
            schedule.insert(
                day,
                DutyAssignment {
                    member: None,
                    is_holiday: false,
                    holiday_name: None,
                    is_overridden: false,
                },
            );
        } else {
            let member = &members[member_index % members.len()];
            schedule.insert(day, DutyAssignment::business(member));
            member_index += 1;
        }
    }

    let next_offset = if members.is_empty() {
        0
    } else {
        member_index % members.len()
    };

    Ok(MonthComputation {
        schedule,
        next_offset,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_january_2024_with_new_year_holiday() {
        // 2024-01-01 是周一且为신정
        let holidays = vec![Holiday::from_iso("2024-01-01", "신정").unwrap()];
        let members = names(&["A", "B", "C"]);

        let result = compute_month(2024, 1, &members, &holidays, 0).unwrap();
        let schedule = &result.schedule;

        let jan1 = &schedule[&1];
        assert_eq!(jan1.member, None);
        assert!(jan1.is_holiday);
        assert_eq!(jan1.holiday_name.as_deref(), Some("신정"));

        // 1/2 周二是首个工作日，从名册头开始
        let jan2 = &schedule[&2];
        assert_eq!(jan2.member.as_deref(), Some("A"));
        assert!(!jan2.is_holiday);

        // 1/6、1/7 周末，无休日名
        for day in [6u32, 7] {
            let entry = &schedule[&day];
            assert!(entry.is_holiday);
            assert_eq!(entry.member, None);
            assert_eq!(entry.holiday_name, None);
        }

        // 1/2..=1/5 消费 A,B,C,A；1/8 周一接续 B
        assert_eq!(schedule[&5].member.as_deref(), Some("A"));
        assert_eq!(schedule[&8].member.as_deref(), Some("B"));
    }

    #[test]
    fn test_start_offset_wraps() {
        // 2024-07-01 周一。起始下标 2 → 首个工作日取第三人，随后回绕
        let members = names(&["A", "B", "C"]);
        let result = compute_month(2024, 7, &members, &[], 2).unwrap();
        assert_eq!(result.schedule[&1].member.as_deref(), Some("C"));
        assert_eq!(result.schedule[&2].member.as_deref(), Some("A"));
    }

    #[test]
    fn test_start_offset_not_preclamped() {
        // start_offset 超出名册长度也只在取下标时归一
        let members = names(&["A", "B", "C"]);
        let plain = compute_month(2024, 7, &members, &[], 1).unwrap();
        let oversized = compute_month(2024, 7, &members, &[], 7).unwrap();
        assert_eq!(plain.schedule, oversized.schedule);
        assert_eq!(plain.next_offset, oversized.next_offset);
        assert!(oversized.next_offset < members.len());
    }

    #[test]
    fn test_full_coverage_and_leap_year() {
        let members = names(&["A"]);
        let feb = compute_month(2024, 2, &members, &[], 0).unwrap();
        let keys: Vec<u32> = feb.schedule.keys().copied().collect();
        assert_eq!(keys, (1..=29).collect::<Vec<u32>>());

        let feb_plain = compute_month(2025, 2, &members, &[], 0).unwrap();
        assert_eq!(feb_plain.schedule.len(), 28);
    }

    #[test]
    fn test_next_offset_is_business_day_count_mod_len() {
        let members = names(&["A", "B", "C", "D", "E"]);
        let holidays = vec![Holiday::from_iso("2024-03-01", "삼일절").unwrap()];
        let result = compute_month(2024, 3, &members, &holidays, 3).unwrap();

        let business_days = result
            .schedule
            .values()
            .filter(|a| !a.is_holiday)
            .count();
        assert_eq!(result.next_offset, (3 + business_days) % members.len());
    }

    #[test]
    fn test_weekend_holiday_overlap_single_entry() {
        // 2025-10-05 추석 연휴落在周日: 单一非工作日，带休日名
        let holidays = vec![Holiday::from_iso("2025-10-05", "추석 연휴").unwrap()];
        let members = names(&["A", "B"]);
        let result = compute_month(2025, 10, &members, &holidays, 0).unwrap();
        let day5 = &result.schedule[&5];
        assert!(day5.is_holiday);
        assert_eq!(day5.member, None);
        assert_eq!(day5.holiday_name.as_deref(), Some("추석 연휴"));
    }

    #[test]
    fn test_empty_roster() {
        let holidays = vec![Holiday::from_iso("2024-01-01", "신정").unwrap()];
        let result = compute_month(2024, 1, &[], &holidays, 5).unwrap();

        assert_eq!(result.next_offset, 0);
        assert_eq!(result.schedule.len(), 31);
        assert!(result.schedule.values().all(|a| a.member.is_none()));
        // 休日标记仍正确
        assert!(result.schedule[&1].is_holiday);
        assert!(!result.schedule[&2].is_holiday);
    }

    #[test]
    fn test_determinism() {
        let members = names(&["가", "나", "다", "라"]);
        let holidays = crate::domain::fixed_holidays_for_year(2024);
        let a = compute_month(2024, 9, &members, &holidays, 2).unwrap();
        let b = compute_month(2024, 9, &members, &holidays, 2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_month_fails_fast() {
        let members = names(&["A"]);
        let err = compute_month(2024, 13, &members, &[], 0).unwrap_err();
        match err {
            EngineError::InvalidCalendar { year, month } => {
                assert_eq!(year, 2024);
                assert_eq!(month, 13);
            }
            other => panic!("expected InvalidCalendar, got {other:?}"),
        }
        assert!(compute_month(2024, 0, &members, &[], 0).is_err());
    }

    #[test]
    fn test_rotation_continuity_across_months() {
        // 将 next_offset 逐月喂给下月，跨月严格轮转不重不漏
        let members = names(&["A", "B", "C"]);
        let mut offset = 0;
        let mut consumed: Vec<String> = Vec::new();

        for month in 1..=6u32 {
            let result = compute_month(2025, month, &members, &[], offset).unwrap();
            for assignment in result.schedule.values() {
                if let Some(m) = &assignment.member {
                    consumed.push(m.clone());
                }
            }
            offset = result.next_offset;
        }

        for (i, name) in consumed.iter().enumerate() {
            assert_eq!(name, &members[i % members.len()]);
        }
    }
}
