//! 配置管理模块
//!
//! 提供CLI参数解析和翻译配置管理功能

// 标准库导入
use std::path::PathBuf;
use std::time::Duration;

// 第三方crate导入
use clap::Parser;

// 本地模块导入
use crate::api_constants::{
    api_config, cli_config, is_valid_api_url, service_config,
};
use crate::error::Result;
use crate::translation_error;

/// 翻译配置结构体
///
/// 进程启动时构建一次，之后只读。支持Builder模式进行链式配置。
///
/// # Examples
///
/// ```rust
/// use html_translator::config::TranslatorConfig;
///
/// let config = TranslatorConfig::new()
///     .with_provider("google")
///     .with_api_key("my-key")
///     .with_timeout_secs(10)
///     .target_language("en");
///
/// assert_eq!(config.provider(), "google");
/// assert!(config.has_api_key());
/// ```
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// 翻译服务注册名 (mock / algorithmic / google / remote / auto)
    provider: String,
    /// 远程翻译API密钥
    api_key: Option<String>,
    /// 翻译接口地址
    api_url: String,
    /// 语言检测接口地址
    detect_url: String,
    /// 单次请求超时（秒）
    timeout_secs: u64,
    /// 单次翻译文本最大长度（字符）
    max_text_length: usize,
    /// 默认源语言
    default_source_lang: String,
    /// 默认目标语言
    default_target_lang: String,
}

impl TranslatorConfig {
    /// 创建新的配置实例
    ///
    /// 默认值：
    /// - 翻译服务: mock（离线算法实现）
    /// - API地址: Google Translate v2
    /// - 超时: 30秒
    /// - 最大文本长度: 5000
    /// - 源语言: auto，目标语言: en
    pub fn new() -> Self {
        Self {
            provider: service_config::DEFAULT_PROVIDER.to_string(),
            api_key: None,
            api_url: api_config::GOOGLE_TRANSLATE_API_URL.to_string(),
            detect_url: api_config::GOOGLE_DETECTION_API_URL.to_string(),
            timeout_secs: service_config::REQUEST_TIMEOUT_SECONDS,
            max_text_length: service_config::DEFAULT_MAX_TEXT_LENGTH,
            default_source_lang: service_config::DEFAULT_SOURCE_LANG.to_string(),
            default_target_lang: service_config::DEFAULT_TARGET_LANG.to_string(),
        }
    }

    /// 获取翻译服务注册名
    pub fn provider(&self) -> &str {
        &self.provider
    }

    /// 获取API密钥（空白密钥视为未配置）
    pub fn api_key(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    /// 是否配置了API密钥
    pub fn has_api_key(&self) -> bool {
        self.api_key().is_some()
    }

    /// 获取翻译接口地址
    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// 获取语言检测接口地址
    pub fn detect_url(&self) -> &str {
        &self.detect_url
    }

    /// 获取请求超时
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 获取单次翻译文本最大长度
    pub fn max_text_length(&self) -> usize {
        self.max_text_length
    }

    /// 获取默认源语言
    pub fn default_source_lang(&self) -> &str {
        &self.default_source_lang
    }

    /// 获取默认目标语言
    pub fn default_target_lang(&self) -> &str {
        &self.default_target_lang
    }

    /// 设置翻译服务
    pub fn with_provider(mut self, provider: &str) -> Self {
        self.provider = provider.trim().to_ascii_lowercase();
        self
    }

    /// 设置API密钥
    pub fn with_api_key(mut self, key: &str) -> Self {
        self.api_key = Some(key.to_string());
        self
    }

    /// 设置翻译接口地址
    pub fn with_api_url(mut self, url: &str) -> Self {
        self.api_url = url.to_string();
        self
    }

    /// 设置语言检测接口地址
    pub fn with_detect_url(mut self, url: &str) -> Self {
        self.detect_url = url.to_string();
        self
    }

    /// 设置请求超时（秒）
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    /// 设置单次翻译文本最大长度
    pub fn with_max_text_length(mut self, length: usize) -> Self {
        self.max_text_length = length;
        self
    }

    /// 设置默认源语言
    pub fn source_language(mut self, lang: &str) -> Self {
        self.default_source_lang = lang.to_string();
        self
    }

    /// 设置默认目标语言
    pub fn target_language(mut self, lang: &str) -> Self {
        self.default_target_lang = lang.to_string();
        self
    }

    /// 校验配置；翻译服务名是否注册由 [`ProviderRegistry`](crate::provider::ProviderRegistry) 负责
    pub fn validate(&self) -> Result<()> {
        if !is_valid_api_url(&self.api_url) {
            return Err(translation_error!(config, "api_url", format!("无效的API地址: {}", self.api_url)));
        }
        if !is_valid_api_url(&self.detect_url) {
            return Err(translation_error!(
                config,
                "detect_url",
                format!("无效的检测接口地址: {}", self.detect_url)
            ));
        }
        if self.timeout_secs == 0 {
            return Err(translation_error!(config, "timeout", "超时时间必须大于0"));
        }
        if self.max_text_length == 0 {
            return Err(translation_error!(config, "max_text_length", "最大文本长度必须大于0"));
        }
        Ok(())
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// CLI参数结构
#[derive(Parser, Debug)]
#[command(author, version, about = "HTML翻译CLI工具 - 保留标记结构，仅翻译可见文本", long_about = None)]
pub struct Cli {
    /// 输入HTML文件或目录（可多个）
    #[arg(short, long, value_name = "FILE_OR_DIR", required = true, num_args = 1..)]
    pub input: Vec<PathBuf>,

    /// 输出文件路径 (仅单文件模式，默认为输入文件名+语言代码)
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// 源语言代码，auto 表示自动检测
    #[arg(short, long, default_value = service_config::DEFAULT_SOURCE_LANG)]
    pub source: String,

    /// 目标语言代码 (如: en, zh, ja, ar)
    #[arg(short, long, default_value = service_config::DEFAULT_TARGET_LANG)]
    pub lang: String,

    /// 翻译服务 (mock / algorithmic / google / remote / auto)
    #[arg(short, long, env = api_config::PROVIDER_ENV, default_value = service_config::DEFAULT_PROVIDER)]
    pub provider: String,

    /// 远程翻译API密钥
    #[arg(long, env = api_config::API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// 翻译API地址
    #[arg(long, default_value = api_config::GOOGLE_TRANSLATE_API_URL)]
    pub api_url: String,

    /// 语言检测API地址
    #[arg(long, default_value = api_config::GOOGLE_DETECTION_API_URL)]
    pub detect_url: String,

    /// 单次请求超时时间（秒）
    #[arg(long, default_value_t = service_config::REQUEST_TIMEOUT_SECONDS)]
    pub timeout: u64,

    /// 目录模式下并发处理的文件数
    #[arg(long, default_value_t = cli_config::DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// 以JSON输出翻译结果
    #[arg(long)]
    pub json: bool,

    /// 显示翻译统计
    #[arg(long)]
    pub stats: bool,

    /// 详细输出模式
    #[arg(short, long)]
    pub verbose: bool,

    /// 静默模式 (仅输出错误)
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// 由命令行参数构建翻译配置
    pub fn translator_config(&self) -> TranslatorConfig {
        let mut config = TranslatorConfig::new()
            .with_provider(&self.provider)
            .with_api_url(&self.api_url)
            .with_detect_url(&self.detect_url)
            .with_timeout_secs(self.timeout)
            .source_language(&self.source)
            .target_language(&self.lang);

        if let Some(key) = &self.api_key {
            config = config.with_api_key(key);
        }
        config
    }
}
