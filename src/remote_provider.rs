//! 远程翻译服务（Google Translate v2 REST）
//!
//! 所有失败（未配置密钥、网络错误、超时、非成功状态码、无法解析的响应）
//! 都只记录日志并返回原文，不会向编排器报告错误。

// 第三方crate导入
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

// 本地模块导入
use crate::api_constants::{api_config, is_auto_language, service_config};
use crate::config::TranslatorConfig;
use crate::error::Result;
use crate::provider::TranslationProvider;
use crate::translation_error;
use crate::utils::truncate_chars;

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: Vec<TranslationEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslationEntry {
    translated_text: String,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    data: DetectData,
}

#[derive(Debug, Deserialize)]
struct DetectData {
    detections: Vec<Vec<DetectionEntry>>,
}

#[derive(Debug, Deserialize)]
struct DetectionEntry {
    language: String,
}

/// 基于网络API的翻译服务
pub struct RemoteProvider {
    client: Client,
    api_key: Option<String>,
    api_url: String,
    detect_url: String,
    max_text_length: usize,
    available: bool,
}

impl RemoteProvider {
    /// 按配置创建；是否可用在此确定，之后不再重新计算
    pub fn new(config: &TranslatorConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        let api_key = config.api_key().map(str::to_string);
        let available = api_key.is_some();

        if available {
            info!("Google Translate REST 服务已初始化 ({})", config.api_url());
        } else {
            warn!(
                "未配置Google Translate API密钥，远程翻译不可用；请设置 {} 环境变量",
                api_config::API_KEY_ENV
            );
        }

        Ok(Self {
            client,
            api_key,
            api_url: config.api_url().to_string(),
            detect_url: config.detect_url().to_string(),
            max_text_length: config.max_text_length(),
            available,
        })
    }

    fn api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| translation_error!(config, "api_key", "未配置API密钥"))
    }

    fn request_translation(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        let mut form = vec![("q", text), ("target", target_lang)];
        if !is_auto_language(source_lang) {
            form.push(("source", source_lang));
        }

        let response = self
            .client
            .post(&self.api_url)
            .query(&[("key", self.api_key()?)])
            .form(&form)
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(translation_error!(
                translation_api,
                status.as_u16(),
                truncate_chars(&body, 200),
                self.api_url
            ));
        }

        parse_translation_response(&body, &self.api_url)
    }

    fn request_detection(&self, text: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.detect_url)
            .query(&[("key", self.api_key()?)])
            .form(&[("q", text)])
            .send()?;

        let status = response.status();
        let body = response.text()?;
        if !status.is_success() {
            return Err(translation_error!(
                translation_api,
                status.as_u16(),
                truncate_chars(&body, 200),
                self.detect_url
            ));
        }

        parse_detection_response(&body, &self.detect_url)
    }
}

impl TranslationProvider for RemoteProvider {
    fn name(&self) -> &'static str {
        "remote"
    }

    fn translate_text(&self, text: &str, source_lang: &str, target_lang: &str) -> String {
        if !self.available {
            debug!("远程翻译服务不可用，返回原文");
            return text.to_string();
        }
        if text.trim().is_empty() {
            return text.to_string();
        }
        if !is_auto_language(source_lang) && source_lang.eq_ignore_ascii_case(target_lang) {
            return text.to_string();
        }
        if text.chars().count() > self.max_text_length {
            warn!(
                "文本超过最大长度 {}，保留原文: {}...",
                self.max_text_length,
                truncate_chars(text, 50)
            );
            return text.to_string();
        }

        match self.request_translation(text, source_lang, target_lang) {
            Ok(translated) if !translated.is_empty() => translated,
            Ok(_) => text.to_string(),
            Err(e) => {
                warn!("翻译失败: {} - 错误: {}", truncate_chars(text, 50), e);
                text.to_string()
            }
        }
    }

    fn detect_language(&self, text: &str) -> String {
        if !self.available || text.trim().is_empty() {
            return service_config::UNKNOWN_LANGUAGE.to_string();
        }

        match self.request_detection(text) {
            Ok(language) => language,
            Err(e) => {
                warn!("语言检测失败: {}", e);
                service_config::UNKNOWN_LANGUAGE.to_string()
            }
        }
    }

    fn is_available(&self) -> bool {
        self.available
    }
}

/// 解析翻译响应；JSON解码负责还原 `\"`、`\n`、`\t`、`\uXXXX` 等转义
fn parse_translation_response(body: &str, api_url: &str) -> Result<String> {
    let response: TranslateResponse = serde_json::from_str(body).map_err(|e| {
        translation_error!(translation_api, 200, format!("响应解析失败: {}", e), api_url)
    })?;

    response
        .data
        .translations
        .into_iter()
        .next()
        .map(|entry| decode_html_entities(&entry.translated_text))
        .ok_or_else(|| translation_error!(translation_api, 200, "响应中没有翻译结果", api_url))
}

fn parse_detection_response(body: &str, api_url: &str) -> Result<String> {
    let response: DetectResponse = serde_json::from_str(body).map_err(|e| {
        translation_error!(translation_api, 200, format!("检测响应解析失败: {}", e), api_url)
    })?;

    response
        .data
        .detections
        .into_iter()
        .flatten()
        .next()
        .map(|entry| entry.language)
        .filter(|language| !language.trim().is_empty())
        .ok_or_else(|| translation_error!(translation_api, 200, "响应中没有检测结果", api_url))
}

/// 还原翻译结果中的HTML实体
fn decode_html_entities(text: &str) -> String {
    text.replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#x27;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&amp;", "&")
}
