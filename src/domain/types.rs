// ==========================================
// 晨检值班排班系统 - 领域类型定义
// ==========================================
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 成员分组 (Member Group)
// ==========================================
// 固定两类: 운영(运营) / 기획(企划)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MemberGroup {
    Operations, // 운영
    Planning,   // 기획
}

impl fmt::Display for MemberGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MemberGroup::Operations => write!(f, "OPERATIONS"),
            MemberGroup::Planning => write!(f, "PLANNING"),
        }
    }
}

impl MemberGroup {
    /// 从字符串解析分组
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "PLANNING" => MemberGroup::Planning,
            _ => MemberGroup::Operations, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            MemberGroup::Operations => "OPERATIONS",
            MemberGroup::Planning => "PLANNING",
        }
    }

    /// 界面显示用的韩文标签
    pub fn label(&self) -> &'static str {
        match self {
            MemberGroup::Operations => "운영",
            MemberGroup::Planning => "기획",
        }
    }
}

// ==========================================
// 用户角色 (User Role)
// ==========================================
// 管理员可改名册/休日/换班，普通成员只能记录本人晨检
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserRole {
    Admin,  // 管理员
    Member, // 普通成员
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UserRole::Admin => write!(f, "ADMIN"),
            UserRole::Member => write!(f, "MEMBER"),
        }
    }
}

impl UserRole {
    /// 从字符串解析角色
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "ADMIN" => UserRole::Admin,
            _ => UserRole::Member, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "ADMIN",
            UserRole::Member => "MEMBER",
        }
    }
}

// ==========================================
// 晨检整体状态 (Check Status)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CheckStatus {
    CompletedNormal,     // 点检完成 - 正常
    CompletedWithIssues, // 点检完成 - 有异常
}

impl fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckStatus::CompletedNormal => write!(f, "COMPLETED_NORMAL"),
            CheckStatus::CompletedWithIssues => write!(f, "COMPLETED_WITH_ISSUES"),
        }
    }
}

impl CheckStatus {
    /// 从字符串解析状态
    pub fn from_str(s: &str) -> Self {
        match s.to_uppercase().as_str() {
            "COMPLETED_WITH_ISSUES" => CheckStatus::CompletedWithIssues,
            _ => CheckStatus::CompletedNormal, // 默认值
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            CheckStatus::CompletedNormal => "COMPLETED_NORMAL",
            CheckStatus::CompletedWithIssues => "COMPLETED_WITH_ISSUES",
        }
    }
}

// ==========================================
// 检查项状态 (Checklist Item State)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChecklistItemState {
    Default, // 默认（无异常）
    Issue,   // 有异常
}

impl fmt::Display for ChecklistItemState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChecklistItemState::Default => write!(f, "DEFAULT"),
            ChecklistItemState::Issue => write!(f, "ISSUE"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_member_group_roundtrip() {
        assert_eq!(MemberGroup::from_str("PLANNING"), MemberGroup::Planning);
        assert_eq!(MemberGroup::from_str("operations"), MemberGroup::Operations);
        // 未知值回退到默认分组
        assert_eq!(MemberGroup::from_str("???"), MemberGroup::Operations);
        assert_eq!(MemberGroup::Planning.to_db_str(), "PLANNING");
        assert_eq!(MemberGroup::Operations.label(), "운영");
    }

    #[test]
    fn test_user_role_parse() {
        assert_eq!(UserRole::from_str("admin"), UserRole::Admin);
        assert_eq!(UserRole::from_str("other"), UserRole::Member);
    }

    #[test]
    fn test_check_status_serde() {
        let json = serde_json::to_string(&CheckStatus::CompletedWithIssues).unwrap();
        assert_eq!(json, "\"COMPLETED_WITH_ISSUES\"");
        let back: CheckStatus = serde_json::from_str(&json).unwrap();
        assert_eq!(back, CheckStatus::CompletedWithIssues);
    }
}
