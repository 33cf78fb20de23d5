//! 可翻译性过滤器
//!
//! 在调用翻译服务之前排除非语言内容：过短文本、纯数字/标点、邮箱、URL，
//! 以及躲过标签跳过规则漏进普通文本节点的脚本/样式片段。

// 标准库导入
use std::fmt;
use std::sync::LazyLock;

// 第三方crate导入
use regex::Regex;

/// 候选文本的最短字符数
pub const MIN_CANDIDATE_CHARS: usize = 3;

static NUMERIC_PUNCTUATION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9\s\-+().,]+$").unwrap());

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z0-9._%+-]+@[a-z0-9.-]+\.[a-z]{2,}$").unwrap());

/// 文本被拒绝的原因
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    TooShort,
    NumericOrPunctuation,
    Email,
    Url,
    ScriptLeak,
    BraceBlock,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            RejectReason::TooShort => "文本过短",
            RejectReason::NumericOrPunctuation => "纯数字或标点",
            RejectReason::Email => "邮箱地址",
            RejectReason::Url => "URL",
            RejectReason::ScriptLeak => "疑似脚本代码",
            RejectReason::BraceBlock => "疑似样式或脚本块",
        };
        f.write_str(reason)
    }
}

/// 返回拒绝原因；可翻译时返回 `None`
pub fn rejection_reason(text: &str) -> Option<RejectReason> {
    let trimmed = text.trim();
    if trimmed.chars().count() < MIN_CANDIDATE_CHARS {
        return Some(RejectReason::TooShort);
    }

    let lower = trimmed.to_lowercase();
    if NUMERIC_PUNCTUATION_REGEX.is_match(&lower) {
        Some(RejectReason::NumericOrPunctuation)
    } else if EMAIL_REGEX.is_match(&lower) {
        Some(RejectReason::Email)
    } else if lower.starts_with("http") || lower.starts_with("www.") {
        Some(RejectReason::Url)
    } else if lower.contains("function(") || lower.contains("var ") {
        Some(RejectReason::ScriptLeak)
    } else if lower.contains('{') && lower.contains('}') {
        Some(RejectReason::BraceBlock)
    } else {
        None
    }
}

/// 判断候选文本是否值得发送给翻译服务
pub fn is_candidate_translatable(text: &str) -> bool {
    rejection_reason(text).is_none()
}
