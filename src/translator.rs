//! 翻译编排器
//!
//! 一次翻译调用依次经过：解析 → 源语言判定 → 提取候选单元 → 过滤 → 逐个翻译并写回
//! → 序列化 → 生成不可变的 [`TranslationResult`]。
//!
//! 单个单元的意外失败只记录一条错误并继续；流水线本身失败时返回原文和一条错误。
//! [`HtmlTranslator::translate`] 从不返回 `Err`，也不会把 panic 传给调用者。

// 标准库导入
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::time::Instant;

// 第三方crate导入
use chrono::Local;
use tracing::{debug, error, info, warn};

// 本地模块导入
use crate::api_constants::dom_config::{ATTRIBUTE_ERROR_PREVIEW_CHARS, TEXT_ERROR_PREVIEW_CHARS};
use crate::api_constants::{is_auto_language, service_config};
use crate::config::TranslatorConfig;
use crate::document::HtmlDocument;
use crate::error::Result;
use crate::filter::rejection_reason;
use crate::html_processor::{self, TranslatableUnit, UnitLocation};
use crate::language::LanguageDetector;
use crate::provider::{ProviderRegistry, TranslationProvider};
use crate::result::TranslationResult;
use crate::translation_error;
use crate::utils::truncate_chars;

/// 流水线成功跑完后的中间产物
struct PipelineOutput {
    translated_html: String,
    detected_language: String,
    total_text_elements: usize,
    translated_elements: usize,
    errors: Vec<String>,
}

/// HTML翻译器
///
/// 持有一个翻译服务和默认语言对，自身无其他可变状态；同一实例可以被多个线程同时使用。
///
/// 远程翻译服务内部是阻塞式HTTP客户端，需要在异步运行时之外（或阻塞线程池中）创建和销毁。
pub struct HtmlTranslator {
    provider: Box<dyn TranslationProvider>,
    detector: LanguageDetector,
    default_source_lang: String,
    default_target_lang: String,
}

impl HtmlTranslator {
    /// 使用内置默认语言对（auto -> en）
    pub fn new(provider: Box<dyn TranslationProvider>) -> Self {
        Self {
            provider,
            detector: LanguageDetector::new(),
            default_source_lang: service_config::DEFAULT_SOURCE_LANG.to_string(),
            default_target_lang: service_config::DEFAULT_TARGET_LANG.to_string(),
        }
    }

    /// 校验配置后通过默认注册表选出翻译服务
    pub fn from_config(config: &TranslatorConfig) -> Result<Self> {
        Self::with_registry(&ProviderRegistry::default(), config)
    }

    pub fn with_registry(registry: &ProviderRegistry, config: &TranslatorConfig) -> Result<Self> {
        config.validate()?;
        let provider = registry.build(config)?;
        Ok(Self {
            default_source_lang: or_default(
                config.default_source_lang(),
                service_config::DEFAULT_SOURCE_LANG,
            )
            .to_ascii_lowercase(),
            default_target_lang: or_default(
                config.default_target_lang(),
                service_config::DEFAULT_TARGET_LANG,
            )
            .to_ascii_lowercase(),
            ..Self::new(provider)
        })
    }

    pub fn provider(&self) -> &dyn TranslationProvider {
        self.provider.as_ref()
    }

    pub fn default_source_lang(&self) -> &str {
        &self.default_source_lang
    }

    pub fn default_target_lang(&self) -> &str {
        &self.default_target_lang
    }

    /// 使用配置的默认语言对翻译
    pub fn translate_with_defaults(&self, html_content: &str) -> TranslationResult {
        self.translate(html_content, "", "")
    }

    /// 翻译HTML文档
    ///
    /// 源语言或目标语言为空白时使用配置的默认值；源语言为 `auto` 时先做文档级语言检测。
    pub fn translate(
        &self,
        html_content: &str,
        source_language: &str,
        target_language: &str,
    ) -> TranslationResult {
        let started = Instant::now();
        let translation_time = Local::now();
        let source_language = or_default(source_language, &self.default_source_lang);
        let target = or_default(target_language, &self.default_target_lang).to_ascii_lowercase();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
            self.run_pipeline(html_content, source_language, &target)
        }));

        let output = match outcome {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                error!("❌ HTML翻译失败: {}", e);
                return TranslationResult::failed(
                    html_content,
                    source_language,
                    &target,
                    e.to_string(),
                    translation_time,
                    started.elapsed(),
                );
            }
            Err(payload) => {
                let message = format!("翻译失败: {}", panic_message(payload.as_ref()));
                error!("❌ HTML翻译意外中止: {}", message);
                return TranslationResult::failed(
                    html_content,
                    source_language,
                    &target,
                    message,
                    translation_time,
                    started.elapsed(),
                );
            }
        };

        let elapsed = started.elapsed();
        info!(
            "✅ HTML翻译完成: {}/{} 个元素已翻译 ({} -> {}), 耗时 {}ms",
            output.translated_elements,
            output.total_text_elements,
            output.detected_language,
            target,
            elapsed.as_millis()
        );

        TranslationResult {
            original_html: html_content.to_string(),
            translated_html: output.translated_html,
            source_language: source_language.to_string(),
            target_language: target,
            detected_language: Some(output.detected_language),
            total_text_elements: output.total_text_elements,
            translated_elements: output.translated_elements,
            errors: output.errors,
            translation_time,
            processing_time_ms: elapsed.as_millis() as u64,
        }
    }

    /// 提取HTML中的可见纯文本；无法解析时返回空字符串
    pub fn extract_plain_text(&self, html_content: &str) -> String {
        match HtmlDocument::parse(html_content) {
            Ok(doc) => html_processor::extract_plain_text(&doc),
            Err(e) => {
                warn!("纯文本提取失败: {}", e);
                String::new()
            }
        }
    }

    /// 输入非空且能被解析
    pub fn is_valid_html(&self, html_content: &str) -> bool {
        is_valid_html(html_content)
    }

    fn run_pipeline(
        &self,
        html_content: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<PipelineOutput> {
        if html_content.trim().is_empty() {
            return Err(translation_error!(input_validation, "html_content", "HTML内容为空"));
        }

        let mut doc = HtmlDocument::parse(html_content)?;

        let detected_language = if is_auto_language(source_language) {
            self.detect_document_language(&doc)
        } else {
            source_language.trim().to_ascii_lowercase()
        };
        debug!("源语言: {}", detected_language);

        let units = html_processor::extract_translatable_units(&doc);
        debug!("📝 提取到 {} 个候选单元", units.len());

        let mut total_text_elements = 0;
        let mut translated_elements = 0;
        let mut errors = Vec::new();

        for unit in &units {
            // 过滤之前计数：被过滤掉的单元同样计入总数
            total_text_elements += 1;

            if let Some(reason) = rejection_reason(&unit.text) {
                debug!("跳过 '{}': {}", truncate_chars(&unit.text, 30), reason);
                continue;
            }

            let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
                self.provider
                    .translate_text(&unit.text, &detected_language, target_language)
            }));

            match outcome {
                Ok(translated) => {
                    if translated != unit.text {
                        write_back(&mut doc, unit, &translated)?;
                        translated_elements += 1;
                    }
                }
                Err(payload) => {
                    warn!(
                        "单元翻译失败，保留原文: {}",
                        panic_message(payload.as_ref())
                    );
                    errors.push(unit_failure_message(unit));
                }
            }
        }

        Ok(PipelineOutput {
            translated_html: doc.serialize()?,
            detected_language,
            total_text_elements,
            translated_elements,
            errors,
        })
    }

    /// 翻译服务无法判断时退回本地检测器
    fn detect_document_language(&self, doc: &HtmlDocument) -> String {
        html_processor::detect_document_language(doc, |sample| {
            let detected = self.provider.detect_language(sample);
            let detected = detected.trim();
            if detected.is_empty() || detected.eq_ignore_ascii_case(service_config::UNKNOWN_LANGUAGE) {
                self.detector.detect(sample)
            } else {
                detected.to_ascii_lowercase()
            }
        })
    }
}

/// 输入非空且能被解析
pub fn is_valid_html(html_content: &str) -> bool {
    !html_content.trim().is_empty() && HtmlDocument::parse(html_content).is_ok()
}

fn or_default<'a>(language: &'a str, default: &'a str) -> &'a str {
    let language = language.trim();
    if language.is_empty() {
        default
    } else {
        language
    }
}

/// 写回译文；文本节点保留原有的首尾空白
fn write_back(doc: &mut HtmlDocument, unit: &TranslatableUnit, translated: &str) -> Result<()> {
    match unit.location {
        UnitLocation::Text(id) => {
            let original = doc.text(id).unwrap_or_default();
            let start = original.len() - original.trim_start().len();
            let end = original.trim_end().len().max(start);
            let replaced = format!("{}{}{}", &original[..start], translated, &original[end..]);
            doc.set_text(id, &replaced)
        }
        UnitLocation::Attribute { element, name } => doc.set_attribute(element, name, translated),
    }
}

fn unit_failure_message(unit: &TranslatableUnit) -> String {
    match unit.location {
        UnitLocation::Text(_) => format!(
            "翻译失败: {}",
            truncate_chars(&unit.text, TEXT_ERROR_PREVIEW_CHARS)
        ),
        UnitLocation::Attribute { name, .. } => format!(
            "属性 {} 翻译失败: {}",
            name,
            truncate_chars(&unit.text, ATTRIBUTE_ERROR_PREVIEW_CHARS)
        ),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "未知错误".to_string()
    }
}
