//! 翻译结果
//!
//! 一次翻译调用的不可变记录。字段只在 crate 内以结构体字面量构建一次，
//! 外部调用者只能通过只读访问器读取。

// 标准库导入
use std::time::Duration;

// 第三方crate导入
use chrono::{DateTime, Local};
use serde::Serialize;

/// HTML翻译结果
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationResult {
    pub(crate) original_html: String,
    pub(crate) translated_html: String,
    pub(crate) source_language: String,
    pub(crate) target_language: String,
    pub(crate) detected_language: Option<String>,
    pub(crate) total_text_elements: usize,
    pub(crate) translated_elements: usize,
    pub(crate) errors: Vec<String>,
    pub(crate) translation_time: DateTime<Local>,
    pub(crate) processing_time_ms: u64,
}

impl TranslationResult {
    /// 失败结果：译文等于原文，计数为零，只带一条错误
    pub(crate) fn failed(
        original_html: &str,
        source_language: &str,
        target_language: &str,
        error: String,
        translation_time: DateTime<Local>,
        elapsed: Duration,
    ) -> Self {
        Self {
            original_html: original_html.to_string(),
            translated_html: original_html.to_string(),
            source_language: source_language.to_string(),
            target_language: target_language.to_string(),
            detected_language: None,
            total_text_elements: 0,
            translated_elements: 0,
            errors: vec![error],
            translation_time,
            processing_time_ms: elapsed.as_millis() as u64,
        }
    }

    pub fn original_html(&self) -> &str {
        &self.original_html
    }

    pub fn translated_html(&self) -> &str {
        &self.translated_html
    }

    /// 调用方传入的源语言（可能是 `auto`）
    pub fn source_language(&self) -> &str {
        &self.source_language
    }

    pub fn target_language(&self) -> &str {
        &self.target_language
    }

    /// 实际使用的源语言；解析失败时为 `None`
    pub fn detected_language(&self) -> Option<&str> {
        self.detected_language.as_deref()
    }

    /// 候选单元总数
    pub fn total_text_elements(&self) -> usize {
        self.total_text_elements
    }

    /// 实际被改写的单元数
    pub fn translated_elements(&self) -> usize {
        self.translated_elements
    }

    /// 非致命错误，按发生顺序
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn translation_time(&self) -> DateTime<Local> {
        self.translation_time
    }

    pub fn processing_time_ms(&self) -> u64 {
        self.processing_time_ms
    }

    /// 翻译完成度（百分比），没有候选单元时为 0
    pub fn completeness(&self) -> f64 {
        if self.total_text_elements == 0 {
            return 0.0;
        }
        self.translated_elements as f64 / self.total_text_elements as f64 * 100.0
    }
}
