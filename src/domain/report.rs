// ==========================================
// 晨检值班排班系统 - 晨检报告实体
// ==========================================
// 每个工作日最多一条报告，按 ISO 日期作键
// 检查清单按条目序号记录状态与备注
// ==========================================

use crate::domain::types::{CheckStatus, ChecklistItemState};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ChecklistItem - 检查清单模板条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub text: String,
    /// 正常时的默认文案
    pub default_status: String,
}

// ==========================================
// ChecklistEntry - 单条检查记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    pub state: ChecklistItemState,
    pub note: String,
}

// ==========================================
// CheckResult - 晨检结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// 条目序号 → 检查记录
    pub checklist: BTreeMap<u32, ChecklistEntry>,
    /// ISO 8601 记录时间
    pub timestamp: String,
}

impl CheckResult {
    /// 是否存在异常条目
    pub fn has_issues(&self) -> bool {
        self.checklist
            .values()
            .any(|e| e.state == ChecklistItemState::Issue)
    }
}

// ==========================================
// 检查清单模板
// ==========================================

/// 晨检检查清单模板（固定 6 项）
pub fn checklist_template() -> Vec<ChecklistItem> {
    let items: &[(&str, &str)] = &[
        ("LC 포털 로그인 중요화면 점검", "특이사항없음"),
        ("GA 포털 로그인 중요화면 점검", "특이사항없음"),
        ("스마트비서 로그인 중요화면 점검", "특이사항없음"),
        ("청약조회, 계약조회, 증권조회", "정상"),
        ("오즈출력물 및 SMS, 팩스/EDMS뷰어", "정상"),
        ("크롬 브라우져 서비스", "정상"),
    ];

    items
        .iter()
        .map(|(text, default_status)| ChecklistItem {
            text: text.to_string(),
            default_status: default_status.to_string(),
        })
        .collect()
}
