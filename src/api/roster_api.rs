// ==========================================
// 晨检值班排班系统 - 名册管理接口
// ==========================================
// 职责: 名册查询与整体替换（仅管理员）
// 约束: 替换名册后清空全部起始下标与换班覆盖，排班整体重算
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::config_manager::DEFAULT_LOG_RETENTION;
use crate::config::ConfigManager;
use crate::domain::{Member, UserProfile};
use crate::engine::DutyOrchestrator;
use crate::repository::{
    ChangeLogRepository, MemberRepository, RotationOffsetRepository, ScheduleOverrideRepository,
};
use rusqlite::Connection;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use tracing::info;

// ==========================================
// RosterApi - 名册管理接口
// ==========================================
pub struct RosterApi {
    member_repo: MemberRepository,
    offset_repo: RotationOffsetRepository,
    override_repo: ScheduleOverrideRepository,
    change_log: ChangeLogRepository,
    orchestrator: Arc<DutyOrchestrator>,
    log_retention: usize,
}

impl RosterApi {
    /// 从共享连接创建接口实例
    pub fn new(conn: Arc<Mutex<Connection>>, orchestrator: Arc<DutyOrchestrator>) -> Self {
        let log_retention = ConfigManager::from_connection(Arc::clone(&conn))
            .get_log_retention()
            .unwrap_or(DEFAULT_LOG_RETENTION);
        Self {
            member_repo: MemberRepository::from_connection(Arc::clone(&conn)),
            offset_repo: RotationOffsetRepository::from_connection(Arc::clone(&conn)),
            override_repo: ScheduleOverrideRepository::from_connection(Arc::clone(&conn)),
            change_log: ChangeLogRepository::from_connection(conn),
            orchestrator,
            log_retention,
        }
    }

    /// 查询名册（持久化名册缺失时返回内置默认名册）
    pub fn list_members(&self) -> ApiResult<Vec<Member>> {
        Ok(self.orchestrator.load_roster()?)
    }

    /// 整体替换名册（仅管理员）
    ///
    /// 名册变更使历史下标与覆盖全部失效: 下标依赖工作日消费顺序，
    /// 覆盖依赖旧成员名，二者都必须清空重算
    pub fn replace_members(
        &self,
        actor: &UserProfile,
        members: &[Member],
        is_bulk_update: bool,
    ) -> ApiResult<()> {
        require_admin(actor, "팀원 관리")?;
        validate_roster(members)?;

        self.member_repo.replace_all(members)?;
        let cleared_offsets = self.offset_repo.clear_all()?;
        let cleared_overrides = self.override_repo.clear_all()?;
        info!(
            members = members.len(),
            cleared_offsets, cleared_overrides, "名册已整体替换"
        );

        let description = if is_bulk_update {
            "팀원 목록이 일괄 수정 기능으로 변경되었습니다."
        } else {
            "팀원 목록이 변경되었습니다."
        };
        self.change_log.append(description, self.log_retention)?;
        self.change_log.append(
            "모든 월의 수동 변경사항이 초기화되고 스케줄이 재계산됩니다.",
            self.log_retention,
        )?;

        Ok(())
    }
}

/// 校验操作者为管理员
pub(crate) fn require_admin(actor: &UserProfile, operation: &str) -> ApiResult<()> {
    if actor.is_admin() {
        Ok(())
    } else {
        Err(ApiError::PermissionDenied(format!(
            "{} 需要管理员角色 (actor={})",
            operation, actor.email
        )))
    }
}

/// 名册校验: 名字非空且名册内唯一
fn validate_roster(members: &[Member]) -> ApiResult<()> {
    let mut seen: HashSet<&str> = HashSet::new();
    for member in members {
        let name = member.name.trim();
        if name.is_empty() {
            return Err(ApiError::InvalidInput(format!(
                "成员名不能为空 (id={})",
                member.id
            )));
        }
        if !seen.insert(name) {
            return Err(ApiError::InvalidInput(format!("成员名重复: {}", name)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{MemberGroup, UserRole};

    fn member(name: &str) -> Member {
        Member::new(name, MemberGroup::Operations, "x@example.com", "010-0000-0000")
    }

    #[test]
    fn test_validate_roster_rejects_duplicates() {
        let members = vec![member("가"), member("나"), member("가")];
        assert!(validate_roster(&members).is_err());
    }

    #[test]
    fn test_validate_roster_rejects_blank_name() {
        let members = vec![member("  ")];
        assert!(validate_roster(&members).is_err());
        assert!(validate_roster(&[member("가")]).is_ok());
    }

    #[test]
    fn test_require_admin() {
        let admin = UserProfile {
            uid: "u1".into(),
            email: "a@example.com".into(),
            name: "관리자".into(),
            role: UserRole::Admin,
        };
        let plain = UserProfile {
            role: UserRole::Member,
            ..admin.clone()
        };
        assert!(require_admin(&admin, "테스트").is_ok());
        assert!(matches!(
            require_admin(&plain, "테스트"),
            Err(ApiError::PermissionDenied(_))
        ));
    }
}
