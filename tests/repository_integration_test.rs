// ==========================================
// 仓储层 - 集成测试
// ==========================================
// 覆盖: 名册、自定义休日、起始下标、换班覆盖、变更日志、晨检结果、用户档案、配置
// ==========================================


use chrono::NaiveDate;
use duty_roster::config::{config_keys, ConfigManager, DEFAULT_LOOKBACK_MONTHS};
use duty_roster::domain::types::{CheckStatus, ChecklistItemState, UserRole};
use duty_roster::domain::{checklist_template, CheckResult, ChecklistEntry, Holiday, MonthKey};
use duty_roster::repository::{
    ChangeLogRepository, CheckResultRepository, CustomHolidayRepository, MemberRepository,
    RepositoryError, RotationOffsetRepository, ScheduleOverrideRepository, UserProfileRepository,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use test_helpers::{admin_profile, create_test_db, open_test_connection, sample_roster};

#[test]
fn member_replace_all_preserves_roster_order() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let repo = MemberRepository::from_connection(conn);

    assert_eq!(repo.count().unwrap(), 0);

    let roster = sample_roster();
    repo.replace_all(&roster).unwrap();

    let loaded = repo.find_all().unwrap();
    let names: Vec<&str> = loaded.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["A", "B", "C"]);
    assert_eq!(loaded[0].email, "a@example.com");

    // 再次整体替换: 旧名册被清空
    repo.replace_all(&roster[..2].to_vec()).unwrap();
    assert_eq!(repo.count().unwrap(), 2);
}

#[test]
fn custom_holiday_roundtrip_and_malformed_date_fails_fast() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let repo = CustomHolidayRepository::from_connection(Arc::clone(&conn));

    let holidays = vec![
        Holiday::from_iso("2025-03-03", "대체휴일").unwrap(),
        Holiday::from_iso("2025-01-02", "워크숍").unwrap(),
    ];
    repo.replace_all(&holidays).unwrap();

    // 按日期排序返回
    let loaded = repo.find_all().unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[0].name, "워크숍");
    assert_eq!(
        loaded[1].date,
        NaiveDate::from_ymd_opt(2025, 3, 3).unwrap()
    );

    // 库内出现非法日期时读出即报错，不静默跳过
    {
        let guard = conn.lock().unwrap();
        guard
            .execute(
                "INSERT INTO custom_holiday (holiday_date, name) VALUES ('not-a-date', 'X')",
                [],
            )
            .unwrap();
    }
    match repo.find_all() {
        Err(RepositoryError::FieldValueError { field, .. }) => {
            assert_eq!(field, "holiday_date")
        }
        other => panic!("期望 FieldValueError，实际: {:?}", other.map(|v| v.len())),
    }
}

#[test]
fn rotation_offset_record_if_absent_never_overwrites() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let repo = RotationOffsetRepository::from_connection(conn);

    let key = MonthKey::new(2025, 1);
    assert_eq!(repo.find(key).unwrap(), None);

    assert!(repo.record_if_absent(key, 3).unwrap());
    assert!(!repo.record_if_absent(key, 9).unwrap());
    assert_eq!(repo.find(key).unwrap(), Some(3));

    repo.record_if_absent(MonthKey::new(2025, 2), 0).unwrap();
    assert_eq!(repo.count().unwrap(), 2);

    assert_eq!(repo.clear_all().unwrap(), 2);
    assert_eq!(repo.find(key).unwrap(), None);
}

#[test]
fn schedule_override_upsert_and_clear() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let repo = ScheduleOverrideRepository::from_connection(conn);

    let june = MonthKey::new(2025, 6);
    repo.upsert_many(june, &[(2, "B".to_string()), (3, "A".to_string())])
        .unwrap();
    // 同日再写为更新
    repo.upsert_many(june, &[(2, "C".to_string())]).unwrap();

    let overrides = repo.find_month(june).unwrap();
    let expected: BTreeMap<u32, String> =
        [(2, "C".to_string()), (3, "A".to_string())].into_iter().collect();
    assert_eq!(overrides, expected);

    // 其他月份互不影响
    assert!(repo.find_month(MonthKey::new(2025, 7)).unwrap().is_empty());

    assert_eq!(repo.clear_month(june).unwrap(), 2);
    assert!(repo.find_month(june).unwrap().is_empty());
}

#[test]
fn change_log_keeps_newest_entries_within_retention() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let repo = ChangeLogRepository::from_connection(conn);

    for i in 1..=7 {
        repo.append(&format!("변경 {}", i), 5).unwrap();
    }

    // 保留上限 5 条，最旧的 2 条被裁剪
    assert_eq!(repo.count().unwrap(), 5);
    let recent = repo.list_recent(10).unwrap();
    assert_eq!(recent.len(), 5);
    assert_eq!(recent[0].description, "변경 7");
    assert_eq!(recent[4].description, "변경 3");
}

#[test]
fn check_result_roundtrip_through_json_column() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let repo = CheckResultRepository::from_connection(conn);

    let date = NaiveDate::from_ymd_opt(2025, 6, 9).unwrap();
    assert!(repo.find_by_date(date).unwrap().is_none());

    let mut checklist: BTreeMap<u32, ChecklistEntry> = (0..checklist_template().len() as u32)
        .map(|i| {
            (
                i,
                ChecklistEntry {
                    state: ChecklistItemState::Default,
                    note: String::new(),
                },
            )
        })
        .collect();
    checklist.insert(
        2,
        ChecklistEntry {
            state: ChecklistItemState::Issue,
            note: "배치 지연 발생".to_string(),
        },
    );

    let result = CheckResult {
        status: CheckStatus::CompletedWithIssues,
        checklist,
        timestamp: "2025-06-09T09:12:00+09:00".to_string(),
    };
    repo.upsert(date, &result).unwrap();

    let loaded = repo.find_by_date(date).unwrap().unwrap();
    assert_eq!(loaded, result);
    assert!(loaded.has_issues());

    // 覆盖写入后以最新为准
    let normal = CheckResult {
        status: CheckStatus::CompletedNormal,
        checklist: loaded.checklist.clone(),
        timestamp: "2025-06-09T10:00:00+09:00".to_string(),
    };
    repo.upsert(date, &normal).unwrap();
    assert_eq!(
        repo.find_by_date(date).unwrap().unwrap().status,
        CheckStatus::CompletedNormal
    );
}

#[test]
fn user_profile_upsert_and_lookup() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let repo = UserProfileRepository::from_connection(conn);

    let mut profile = admin_profile();
    repo.upsert(&profile).unwrap();

    let by_uid = repo.find_by_uid(&profile.uid).unwrap().unwrap();
    assert_eq!(by_uid.role, UserRole::Admin);

    // 同 uid 再写为更新
    profile.role = UserRole::Member;
    repo.upsert(&profile).unwrap();
    let by_email = repo.find_by_email(&profile.email).unwrap().unwrap();
    assert_eq!(by_email.role, UserRole::Member);

    assert!(repo.find_by_uid("nobody").unwrap().is_none());
}

#[test]
fn config_manager_defaults_and_overrides() {
    let (_tmp, db_path) = create_test_db().unwrap();
    let conn = open_test_connection(&db_path).unwrap();
    let config = ConfigManager::from_connection(conn);

    assert_eq!(config.get_lookback_months().unwrap(), DEFAULT_LOOKBACK_MONTHS);
    assert_eq!(config.get_log_retention().unwrap(), 100);

    config.set_config(config_keys::LOOKBACK_MONTHS, "12").unwrap();
    config.set_config(config_keys::LOG_RETENTION, "50").unwrap();
    assert_eq!(config.get_lookback_months().unwrap(), 12);
    assert_eq!(config.get_log_retention().unwrap(), 50);

    // 非法值回退默认
    config.set_config(config_keys::LOOKBACK_MONTHS, "abc").unwrap();
    assert_eq!(config.get_lookback_months().unwrap(), DEFAULT_LOOKBACK_MONTHS);
}
