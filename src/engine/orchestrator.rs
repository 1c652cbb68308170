// ==========================================
// 晨检值班排班系统 - 排班编排器
// ==========================================
// 职责:
// - 回填每月起始下标（有界回溯 + 逐月正向重放）
// - 叠加人工换班覆盖
// - 今日/次工作日值班查询
// 红线: 回填是显式有界循环，不用递归；
//       同月并发回填由 in-flight 标记抑制，任何退出路径都移除标记
// ==========================================

use crate::domain::{
    default_members, fixed_holidays_for_year, DutyAssignment, Holiday, Member, MonthKey,
    MonthSchedule,
};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::rotation::{compute_month, is_business_day};
use crate::repository::{
    CustomHolidayRepository, MemberRepository, RotationOffsetRepository,
    ScheduleOverrideRepository,
};
use chrono::{Datelike, Duration, NaiveDate};
use rusqlite::Connection;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::{debug, warn};

/// 次工作日查找的扫描上限（天）
const DUTY_SCAN_LIMIT_DAYS: u32 = 366;

// ==========================================
// PendingGuard - in-flight 标记守卫
// ==========================================
// 作用域结束（含错误路径）自动移除标记
struct PendingGuard<'a> {
    pending: &'a Mutex<HashSet<MonthKey>>,
    key: MonthKey,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        if let Ok(mut set) = self.pending.lock() {
            set.remove(&self.key);
        }
    }
}

// ==========================================
// DutyOrchestrator - 排班编排器
// ==========================================
pub struct DutyOrchestrator {
    member_repo: MemberRepository,
    holiday_repo: CustomHolidayRepository,
    offset_repo: RotationOffsetRepository,
    override_repo: ScheduleOverrideRepository,
    /// 正在回填的月份集合，抑制同月重复回填
    pending: Mutex<HashSet<MonthKey>>,
    /// 回溯上限（月）；超出后假定起始下标为 0
    lookback_months: u32,
}

impl DutyOrchestrator {
    /// 从共享连接创建编排器
    pub fn new(conn: Arc<Mutex<Connection>>, lookback_months: u32) -> Self {
        Self {
            member_repo: MemberRepository::from_connection(Arc::clone(&conn)),
            holiday_repo: CustomHolidayRepository::from_connection(Arc::clone(&conn)),
            offset_repo: RotationOffsetRepository::from_connection(Arc::clone(&conn)),
            override_repo: ScheduleOverrideRepository::from_connection(conn),
            pending: Mutex::new(HashSet::new()),
            lookback_months,
        }
    }

    /// 读取名册；持久化名册缺失时回退到内置默认名册（只读降级，不回写）
    pub fn load_roster(&self) -> EngineResult<Vec<Member>> {
        let members = self.member_repo.find_all()?;
        if members.is_empty() {
            warn!("持久化名册为空，使用内置默认名册");
            return Ok(default_members());
        }
        Ok(members)
    }

    /// 某年的生效休日集 = 内置节日表 + 自定义休日
    ///
    /// 自定义休日读取失败时降级为仅内置表（排班界面保持可用）
    pub fn effective_holidays(&self, year: i32) -> EngineResult<Vec<Holiday>> {
        let mut holidays = fixed_holidays_for_year(year);
        match self.holiday_repo.find_all() {
            Ok(custom) => holidays.extend(custom),
            Err(e) => {
                warn!(error = %e, "自定义休日读取失败，降级为仅内置节日表");
            }
        }
        Ok(holidays)
    }

    fn begin_pending(&self, key: MonthKey) -> EngineResult<Option<PendingGuard<'_>>> {
        let mut set = self
            .pending
            .lock()
            .map_err(|e| EngineError::Other(anyhow::anyhow!("in-flight 标记锁获取失败: {}", e)))?;
        if set.insert(key) {
            Ok(Some(PendingGuard {
                pending: &self.pending,
                key,
            }))
        } else {
            Ok(None)
        }
    }

    /// 确定目标月份的起始下标
    ///
    /// 未记录时执行回填: 自目标月向前回溯至最近已记录月份（上限
    /// lookback_months，超出假定 0），再逐月正向重放 compute_month，
    /// 把每月 next_offset 喂给下一月，途经月份全部幂等落库。
    /// 目标月的下一月也总被记录，使"明日值班"无需跨月特判。
    ///
    /// 同月已有回填在途时本次只计算不落库（抑制重复写）。
    pub fn ensure_start_offset(&self, target: MonthKey) -> EngineResult<usize> {
        // 月份越界先行拒绝: 回溯用的 prev()/next() 假定月份键合法
        if !(1..=12).contains(&target.month) {
            return Err(EngineError::InvalidCalendar {
                year: target.year,
                month: target.month,
            });
        }

        if let Some(offset) = self.offset_repo.find(target)? {
            return Ok(offset);
        }

        let guard = self.begin_pending(target)?;
        let recording = guard.is_some();
        if !recording {
            debug!(month = %target, "同月回填在途，本次只计算不落库");
        }

        let members = self.load_roster()?;
        let names: Vec<String> = members.into_iter().map(|m| m.name).collect();

        // 有界回溯: 找最近已记录月份，找不到则假定 0
        let mut cursor = target;
        let mut offset = 0usize;
        let mut found = false;
        for _ in 0..self.lookback_months {
            cursor = cursor.prev();
            if let Some(recorded) = self.offset_repo.find(cursor)? {
                offset = recorded;
                found = true;
                break;
            }
        }
        if !found {
            debug!(
                month = %target,
                lookback = self.lookback_months,
                "回溯上限内无已记录月份，自 {} 起假定起始下标 0", cursor
            );
        }

        // 正向重放: 有界循环（最多 lookback_months + 2 个月）
        let mut target_offset = 0usize;
        loop {
            if recording {
                self.offset_repo.record_if_absent(cursor, offset)?;
            }
            if cursor == target {
                target_offset = offset;
            }
            if cursor > target {
                break;
            }
            let holidays = self.effective_holidays(cursor.year)?;
            let computation =
                compute_month(cursor.year, cursor.month, &names, &holidays, offset)?;
            offset = computation.next_offset;
            cursor = cursor.next();
        }

        Ok(target_offset)
    }

    /// 某月排班表（已叠加人工换班覆盖）
    ///
    /// 覆盖合并是单纯的映射覆写: 替换 member 并置 is_overridden，
    /// 休日标记保持不变
    pub fn month_schedule(&self, key: MonthKey) -> EngineResult<MonthSchedule> {
        let start_offset = self.ensure_start_offset(key)?;
        let members = self.load_roster()?;
        let names: Vec<String> = members.into_iter().map(|m| m.name).collect();
        let holidays = self.effective_holidays(key.year)?;

        let computation = compute_month(key.year, key.month, &names, &holidays, start_offset)?;
        let mut schedule = computation.schedule;

        for (day, member_name) in self.override_repo.find_month(key)? {
            if let Some(entry) = schedule.get_mut(&day) {
                entry.member = Some(member_name);
                entry.is_overridden = true;
            }
        }

        Ok(schedule)
    }

    /// 某日值班分配（非工作日返回 None）
    pub fn duty_on(&self, date: NaiveDate) -> EngineResult<Option<DutyAssignment>> {
        let holidays = self.effective_holidays(date.year())?;
        if !is_business_day(date, &holidays) {
            return Ok(None);
        }
        let schedule = self.month_schedule(MonthKey::from_date(date))?;
        Ok(schedule.get(&date.day()).cloned())
    }

    /// 自某日（不含）起的下一个工作日及其值班分配
    ///
    /// 回填总是连带记录下一月的下标，跨月边界不需要特判
    pub fn next_duty_after(&self, date: NaiveDate) -> EngineResult<(NaiveDate, DutyAssignment)> {
        let mut probe = date + Duration::days(1);
        for _ in 0..DUTY_SCAN_LIMIT_DAYS {
            let holidays = self.effective_holidays(probe.year())?;
            if is_business_day(probe, &holidays) {
                let schedule = self.month_schedule(MonthKey::from_date(probe))?;
                let assignment = schedule.get(&probe.day()).cloned().ok_or_else(|| {
                    EngineError::Other(anyhow::anyhow!("排班表缺少日号 {}", probe))
                })?;
                return Ok((probe, assignment));
            }
            probe += Duration::days(1);
        }

        Err(EngineError::DutyScanExhausted {
            from: date.to_string(),
            scanned: DUTY_SCAN_LIMIT_DAYS,
        })
    }
}
