//! 离线算法翻译服务
//!
//! 不依赖网络，在没有配置远程密钥时使用，保证流水线总能确定性地跑完。
//! 输出只是占位变换，并不代表翻译质量：
//! - 目标为英文时，把源文字区块的连续字符替换为占位词
//! - 目标为其他语言时，给原文加上目标语言标记

// 标准库导入
use std::sync::LazyLock;

// 第三方crate导入
use regex::Regex;
use tracing::debug;

// 本地模块导入
use crate::api_constants::is_auto_language;
use crate::language::LanguageDetector;
use crate::provider::TranslationProvider;
use crate::utils::truncate_chars;

/// 占位词
const WORD_TOKEN: &str = " [WORD] ";

/// 中文逐字生成英文词时使用的词根
const WORD_BASES: &[&str] = &["word", "term", "item", "text", "data", "info", "part", "unit"];

static NUMERIC_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[\d\s/:-]+$").unwrap());

static URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(https?://|www\.)\S+$").unwrap());

static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}").unwrap());

static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// 源语言 → 需要替换的连续文字区块
static SCRIPT_RUNS: LazyLock<Vec<(&'static str, Regex)>> = LazyLock::new(|| {
    [
        ("ar", r"[\u{0600}-\u{06FF}]+"),
        ("ja", r"[\u{3040}-\u{309F}\u{30A0}-\u{30FF}\u{4E00}-\u{9FAF}]+"),
        ("ko", r"[\u{AC00}-\u{D7AF}]+"),
        ("ru", r"[\u{0400}-\u{04FF}]+"),
        ("th", r"[\u{0E00}-\u{0E7F}]+"),
        ("hi", r"[\u{0900}-\u{097F}]+"),
        ("he", r"[\u{0590}-\u{05FF}]+"),
        ("vi", r"[àáạảãâầấậẩẫăằắặẳẵèéẹẻẽêềếệểễìíịỉĩòóọỏõôồố]+"),
        ("tr", r"[çÇğĞıİöÖşŞüÜ]+"),
    ]
    .into_iter()
    .map(|(lang, pattern)| (lang, Regex::new(pattern).unwrap()))
    .collect()
});

/// 无依赖的确定性翻译服务
#[derive(Debug, Clone, Default)]
pub struct AlgorithmicProvider {
    detector: LanguageDetector,
}

impl AlgorithmicProvider {
    pub fn new() -> Self {
        Self {
            detector: LanguageDetector::new(),
        }
    }

    fn transform(&self, text: &str, source_lang: &str, target_lang: &str) -> String {
        if looks_non_linguistic(text) {
            return text.to_string();
        }

        if target_lang.eq_ignore_ascii_case("en") {
            simulate_english(text, source_lang)
        } else {
            format!("[AUTO-TRANSLATED to {}] {}", target_lang.to_uppercase(), text)
        }
    }
}

impl TranslationProvider for AlgorithmicProvider {
    fn name(&self) -> &'static str {
        "algorithmic"
    }

    fn translate_text(&self, text: &str, source_lang: &str, target_lang: &str) -> String {
        if text.trim().is_empty() {
            return text.to_string();
        }

        let source = if is_auto_language(source_lang) {
            self.detector.detect(text)
        } else {
            source_lang.trim().to_ascii_lowercase()
        };

        if source.eq_ignore_ascii_case(target_lang.trim()) {
            return text.to_string();
        }

        let translated = self.transform(text, &source, target_lang.trim());
        debug!(
            "算法翻译 {} -> {}: '{}' -> '{}'",
            source,
            target_lang,
            truncate_chars(text, 50),
            truncate_chars(&translated, 50)
        );
        translated
    }

    fn detect_language(&self, text: &str) -> String {
        self.detector.detect(text)
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// 数字/日期、URL、邮箱样式的文本原样保留
fn looks_non_linguistic(text: &str) -> bool {
    let trimmed = text.trim();
    NUMERIC_REGEX.is_match(trimmed) || URL_REGEX.is_match(trimmed) || EMAIL_REGEX.is_match(trimmed)
}

fn simulate_english(text: &str, source_lang: &str) -> String {
    if source_lang == "zh" {
        return simulate_ideographs(text);
    }

    match SCRIPT_RUNS.iter().find(|(lang, _)| *lang == source_lang) {
        Some((_, pattern)) => {
            let replaced = pattern.replace_all(text, WORD_TOKEN);
            WHITESPACE_REGEX.replace_all(&replaced, " ").trim().to_string()
        }
        None => format!("[TRANSLATED from {}] {}", source_lang.to_uppercase(), text),
    }
}

/// 每个汉字按码位与位置生成一个英文词
fn simulate_ideographs(text: &str) -> String {
    let mut result = String::with_capacity(text.len() * 2);

    for (position, c) in text.chars().enumerate() {
        let code = c as u32;
        if (0x4E00..=0x9FFF).contains(&code) {
            result.push_str(WORD_BASES[code as usize % WORD_BASES.len()]);
            if position > 0 {
                result.push_str(&position.to_string());
            }
            result.push(' ');
        } else {
            result.push(c);
        }
    }

    result.trim().to_string()
}
