// ==========================================
// 晨检值班排班系统 - 邮件链接模板
// ==========================================
// 说明: 不做邮件发送，只生成 mailto 链接字符串，
//       主题/正文按 RFC 6068 做百分号编码
// ==========================================

use crate::domain::Member;
use urlencoding::encode;

/// 单个成员的值班通知 mailto 链接
pub fn duty_notice_mailto(member: &Member, subject: &str, body: &str) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        member.email,
        encode(subject),
        encode(body)
    )
}

/// 全员密送的通知 mailto 链接，空名册返回 None
pub fn bulk_notice_mailto(members: &[Member], subject: &str, body: &str) -> Option<String> {
    if members.is_empty() {
        return None;
    }
    let bcc: Vec<&str> = members.iter().map(|m| m.email.as_str()).collect();
    Some(format!(
        "mailto:?bcc={}&subject={}&body={}",
        bcc.join(","),
        encode(subject),
        encode(body)
    ))
}
