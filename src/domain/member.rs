// ==========================================
// 晨检值班排班系统 - 成员实体
// ==========================================
// 名册是有序序列: 轮换顺序严格按名册顺序
// 约束: 名册只能整体替换，调度器不做局部修改
// ==========================================

use crate::domain::types::{MemberGroup, UserRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ==========================================
// Member - 团队成员
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// 唯一标识
    pub id: String,
    /// 显示名（名册内唯一）
    pub name: String,
    /// 分组标签
    pub group: MemberGroup,
    /// 联系邮箱
    pub email: String,
    /// 联系电话
    pub phone: String,
}

impl Member {
    /// 创建新成员（自动生成 id）
    pub fn new(name: &str, group: MemberGroup, email: &str, phone: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            group,
            email: email.to_string(),
            phone: phone.to_string(),
        }
    }
}

// ==========================================
// UserProfile - 用户档案
// ==========================================
// 登录身份由外部认证服务校验，这里只保存角色映射
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub uid: String,
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl UserProfile {
    /// 是否为管理员
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }
}

// ==========================================
// 默认名册
// ==========================================

/// 生成默认名册（持久化名册缺失时的本地回退）
///
/// 交替分配到两个分组，邮箱/电话使用占位格式
pub fn default_members() -> Vec<Member> {
    (1..=21)
        .map(|i| {
            let group = if i % 2 == 1 {
                MemberGroup::Operations
            } else {
                MemberGroup::Planning
            };
            Member::new(
                &format!("팀원 {}", i),
                group,
                &format!("member{}@example.com", i),
                &format!("010-1234-56{:02}", i),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_members() {
        let members = default_members();
        assert_eq!(members.len(), 21);
        assert_eq!(members[0].group, MemberGroup::Operations);
        assert_eq!(members[1].group, MemberGroup::Planning);
        assert_eq!(members[0].name, "팀원 1");
        assert_eq!(members[20].phone, "010-1234-5621");

        // id 唯一
        let mut ids: Vec<&str> = members.iter().map(|m| m.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 21);
    }

    #[test]
    fn test_is_admin() {
        let admin = UserProfile {
            uid: "u1".to_string(),
            email: "a@example.com".to_string(),
            name: "관리자".to_string(),
            role: UserRole::Admin,
        };
        assert!(admin.is_admin());
    }
}
