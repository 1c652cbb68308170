// ==========================================
// 轮换排班核心 - 集成测试
// ==========================================
// 覆盖: 全覆盖性、确定性、跨月连续性、周末/休日互斥、空名册
// ==========================================

use chrono::{Datelike, NaiveDate};
use duty_roster::domain::{fixed_holidays_for_year, Holiday};
use duty_roster::engine::{compute_month, is_business_day};

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn coverage_equals_days_in_month_for_two_years() {
    let members = names(&["가", "나", "다"]);
    for year in [2024, 2025] {
        let holidays = fixed_holidays_for_year(year);
        for month in 1..=12u32 {
            let result = compute_month(year, month, &members, &holidays, 0).unwrap();

            let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
            let expected_days = if month == 12 {
                NaiveDate::from_ymd_opt(year + 1, 1, 1).unwrap()
            } else {
                NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
            }
            .signed_duration_since(first)
            .num_days() as u32;

            let keys: Vec<u32> = result.schedule.keys().copied().collect();
            assert_eq!(keys, (1..=expected_days).collect::<Vec<u32>>());
        }
    }
}

#[test]
fn holiday_days_never_carry_a_member() {
    let members = names(&["A", "B", "C", "D"]);
    let holidays = fixed_holidays_for_year(2024);
    for month in 1..=12u32 {
        let result = compute_month(2024, month, &members, &holidays, 1).unwrap();
        for (day, assignment) in &result.schedule {
            if assignment.is_holiday {
                assert!(
                    assignment.member.is_none(),
                    "2024-{:02}-{:02} 休日却有担当",
                    month,
                    day
                );
            } else {
                assert!(assignment.member.is_some());
            }
        }
    }
}

#[test]
fn schedule_matches_business_day_predicate() {
    let members = names(&["A"]);
    let holidays = fixed_holidays_for_year(2025);
    let result = compute_month(2025, 10, &members, &holidays, 0).unwrap();

    for (day, assignment) in &result.schedule {
        let date = NaiveDate::from_ymd_opt(2025, 10, *day).unwrap();
        assert_eq!(assignment.is_holiday, !is_business_day(date, &holidays));
    }
}

#[test]
fn chaining_next_offset_keeps_strict_round_robin() {
    // 两年跨度逐月接续，所有工作日严格按名册轮转
    let members = names(&["A", "B", "C", "D", "E"]);
    let mut offset = 0;
    let mut position = 0usize;

    for year in [2024, 2025] {
        let holidays = fixed_holidays_for_year(year);
        for month in 1..=12u32 {
            let result = compute_month(year, month, &members, &holidays, offset).unwrap();
            for assignment in result.schedule.values() {
                if let Some(member) = &assignment.member {
                    assert_eq!(member, &members[position % members.len()]);
                    position += 1;
                }
            }
            offset = result.next_offset;
            assert_eq!(offset, position % members.len());
        }
    }
}

#[test]
fn identical_inputs_yield_identical_outputs() {
    let members = names(&["팀원 1", "팀원 2"]);
    let holidays = vec![
        Holiday::from_iso("2025-05-01", "근로자의 날").unwrap(),
        Holiday::from_iso("2025-05-05", "어린이날").unwrap(),
    ];
    let a = compute_month(2025, 5, &members, &holidays, 1).unwrap();
    let b = compute_month(2025, 5, &members, &holidays, 1).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_roster_marks_days_but_assigns_nobody() {
    let holidays = fixed_holidays_for_year(2025);
    for month in 1..=12u32 {
        let result = compute_month(2025, month, &[], &holidays, 7).unwrap();
        assert_eq!(result.next_offset, 0);
        for (day, assignment) in &result.schedule {
            assert!(assignment.member.is_none());
            let date = NaiveDate::from_ymd_opt(2025, month, *day).unwrap();
            assert_eq!(assignment.is_holiday, !is_business_day(date, &holidays));
        }
    }
}

#[test]
fn weekday_of_first_assignment_is_first_business_day() {
    // 2024-09: 1日是周日，2日周一是首个工作日
    let members = names(&["A", "B"]);
    let result = compute_month(2024, 9, &members, &[], 0).unwrap();
    assert!(result.schedule[&1].is_holiday);
    assert_eq!(result.schedule[&2].member.as_deref(), Some("A"));
    assert_eq!(
        NaiveDate::from_ymd_opt(2024, 9, 2).unwrap().weekday(),
        chrono::Weekday::Mon
    );
}
