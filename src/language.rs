//! 基于Unicode文字区块的语言检测
//!
//! 对每种语言统计输入中落在其文字区块内的字符数，得分最高者胜出；
//! 得分相同时按模式表顺序取第一个。汉字同样出现在日文中，因此计数之前
//! 先检查日文标记和中文标记两张显式列表。

// 标准库导入
use std::sync::LazyLock;

// 第三方crate导入
use regex::Regex;
use tracing::debug;

/// 未匹配任何模式时的默认语言
pub const DEFAULT_LANGUAGE: &str = "en";

/// 语言代码 → 文字区块模式，顺序决定并列时的优先级
static LANGUAGE_PATTERNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("zh", r"[\u{4E00}-\u{9FFF}\u{3400}-\u{4DBF}\u{F900}-\u{FAFF}]"),
        ("ja", r"[\u{3040}-\u{309F}\u{30A0}-\u{30FF}]"),
        ("ko", r"[\u{AC00}-\u{D7AF}\u{1100}-\u{11FF}\u{3130}-\u{318F}]"),
        (
            "ar",
            r"[\u{0600}-\u{06FF}\u{0750}-\u{077F}\u{08A0}-\u{08FF}\u{FB50}-\u{FDFF}\u{FE70}-\u{FEFF}]",
        ),
        ("th", r"[\u{0E00}-\u{0E7F}]"),
        ("hi", r"[\u{0900}-\u{097F}]"),
        ("he", r"[\u{0590}-\u{05FF}]"),
        ("ru", r"[\u{0400}-\u{04FF}]"),
        ("el", r"[\u{0370}-\u{03FF}]"),
        ("tr", r"[çÇğĞıİöÖşŞüÜ]"),
        ("vi", r"[àáạảãâầấậẩẫăằắặẳẵèéẹẻẽêềếệểễìíịỉĩòóọỏõôồố]"),
    ]
    .into_iter()
    .map(|(lang, pattern)| (lang, Regex::new(pattern).unwrap()))
    .collect()
});

static KANA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{3040}-\u{309F}\u{30A0}-\u{30FF}]").unwrap());

/// 日文功能词与常见界面用语
const JAPANESE_MARKERS: &[&str] = &["ログイン", "パスワード", "ユーザー", "する", "です"];

/// 繁体/简体中文特有词汇（银行与界面用语）
const CHINESE_MARKERS: &[&str] = &[
    "網路", "銀行", "時間", "輸入", "請", "統編", "帳戶", "臺北", "繁中", "网路", "银行", "时间",
    "输入", "请", "统编", "账户", "台北",
];

/// 语言检测器，无内部状态，可在线程间自由共享
#[derive(Debug, Clone, Copy, Default)]
pub struct LanguageDetector;

impl LanguageDetector {
    pub fn new() -> Self {
        Self
    }

    /// 检测文本语言，未命中任何模式时返回 `"en"`
    pub fn detect(&self, text: &str) -> String {
        detect_language(text).to_string()
    }
}

/// 是否包含日文标记（假名或日文特有词）
pub fn has_japanese_markers(text: &str) -> bool {
    KANA_REGEX.is_match(text) || JAPANESE_MARKERS.iter().any(|marker| text.contains(marker))
}

/// 是否包含中文特有词汇
pub fn has_chinese_markers(text: &str) -> bool {
    CHINESE_MARKERS.iter().any(|marker| text.contains(marker))
}

/// 各语言的字符命中数（只包含非零项，按模式表顺序）
pub fn script_scores(text: &str) -> Vec<(&'static str, usize)> {
    LANGUAGE_PATTERNS
        .iter()
        .map(|(lang, pattern)| (*lang, pattern.find_iter(text).count()))
        .filter(|(_, count)| *count > 0)
        .collect()
}

/// 检测文本语言
pub fn detect_language(text: &str) -> &'static str {
    if text.trim().is_empty() {
        return DEFAULT_LANGUAGE;
    }

    if has_japanese_markers(text) {
        return "ja";
    }
    if has_chinese_markers(text) {
        return "zh";
    }

    let scores = script_scores(text);
    let mut best: Option<(&'static str, usize)> = None;
    for &(lang, count) in &scores {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((lang, count));
        }
    }

    match best {
        Some((lang, _)) => {
            debug!("检测到语言: {} (得分: {:?})", lang, scores);
            lang
        }
        None => DEFAULT_LANGUAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_single_scripts() {
        assert_eq!(detect_language("مرحبا بالعالم"), "ar");
        assert_eq!(detect_language("안녕하세요"), "ko");
        assert_eq!(detect_language("สวัสดีครับ"), "th");
        assert_eq!(detect_language("नमस्ते दुनिया"), "hi");
        assert_eq!(detect_language("שלום עולם"), "he");
        assert_eq!(detect_language("Привет мир"), "ru");
        assert_eq!(detect_language("Καλημέρα κόσμε"), "el");
        assert_eq!(detect_language("中文内容"), "zh");
    }

    #[test]
    fn test_defaults_to_english() {
        assert_eq!(detect_language("Hello world"), "en");
        assert_eq!(detect_language(""), "en");
        assert_eq!(detect_language("   "), "en");
        assert_eq!(detect_language("12345"), "en");
    }

    #[test]
    fn test_japanese_marker_wins_over_ideographs() {
        // 汉字多于假名，仍应判为日文
        assert_eq!(detect_language("東京都新宿区西新宿ログイン"), "ja");
        assert_eq!(detect_language("日本語です"), "ja");
    }

    #[test]
    fn test_chinese_marker_without_japanese_markers() {
        assert_eq!(detect_language("網路銀行"), "zh");
        assert_eq!(detect_language("请输入帐号"), "zh");
    }

    #[test]
    fn test_majority_script_wins() {
        assert_eq!(detect_language("Привет שָׁלוֹם мир друзья"), "ru");
    }

    #[test]
    fn test_tie_resolved_by_table_order() {
        // 阿拉伯文与希伯来文各两个字符，阿拉伯文在表中靠前
        assert_eq!(detect_language("مر של"), "ar");
    }

    #[test]
    fn test_latin_extensions() {
        assert_eq!(detect_language("Günaydın çocuklar"), "tr");
        assert_eq!(detect_language("Tiếng Việt rất đẹp"), "vi");
    }

    #[test]
    fn test_detection_is_deterministic() {
        let detector = LanguageDetector::new();
        let input = "ユーザー設定を変更する";
        assert_eq!(detector.detect(input), detector.detect(input));
        assert_eq!(detector.detect(input), "ja");
    }

    #[test]
    fn test_script_scores_only_non_zero() {
        let scores = script_scores("abc مرحبا");
        assert_eq!(scores, vec![("ar", 5)]);
    }
}
