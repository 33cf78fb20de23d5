//! 翻译服务抽象
//!
//! [`TranslationProvider`] 是编排器进行语言相关工作的唯一接口，有两个实现：
//! [`RemoteProvider`](crate::remote_provider::RemoteProvider) 和
//! [`AlgorithmicProvider`](crate::algorithmic_provider::AlgorithmicProvider)。
//! [`ProviderRegistry`] 在进程启动时按配置字符串选出其中之一。

// 标准库导入
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};

// 第三方crate导入
use tracing::{info, warn};

// 本地模块导入
use crate::algorithmic_provider::AlgorithmicProvider;
use crate::config::TranslatorConfig;
use crate::error::Result;
use crate::remote_provider::RemoteProvider;
use crate::translation_error;
use crate::utils::truncate_chars;

/// 翻译服务能力
///
/// 所有方法都不返回错误：无法翻译时原样返回输入文本（fail-open）。
pub trait TranslationProvider: Send + Sync {
    /// 服务名，用于日志
    fn name(&self) -> &'static str;

    /// 翻译单条文本，失败时返回原文
    fn translate_text(&self, text: &str, source_lang: &str, target_lang: &str) -> String;

    /// 逐条翻译，输出顺序与输入一致；单条失败只影响该条
    fn translate_batch(&self, texts: &[String], source_lang: &str, target_lang: &str) -> Vec<String> {
        texts
            .iter()
            .map(|text| {
                panic::catch_unwind(AssertUnwindSafe(|| {
                    self.translate_text(text, source_lang, target_lang)
                }))
                .unwrap_or_else(|_| {
                    warn!("批量翻译中单条失败，保留原文: {}", truncate_chars(text, 50));
                    text.clone()
                })
            })
            .collect()
    }

    /// 检测语言，无法判断时返回 `"unknown"`
    fn detect_language(&self, text: &str) -> String;

    /// 服务是否可用（构造时根据配置计算一次）
    fn is_available(&self) -> bool;
}

/// 翻译服务构造函数
pub type ProviderFactory = fn(&TranslatorConfig) -> Result<Box<dyn TranslationProvider>>;

fn build_algorithmic(_config: &TranslatorConfig) -> Result<Box<dyn TranslationProvider>> {
    Ok(Box::new(AlgorithmicProvider::new()))
}

fn build_remote(config: &TranslatorConfig) -> Result<Box<dyn TranslationProvider>> {
    Ok(Box::new(RemoteProvider::new(config)?))
}

/// 配置字符串 → 翻译服务构造函数
pub struct ProviderRegistry {
    factories: BTreeMap<String, ProviderFactory>,
}

impl ProviderRegistry {
    /// 空注册表
    pub fn empty() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// 注册（或覆盖）一个翻译服务
    pub fn register(&mut self, name: &str, factory: ProviderFactory) {
        self.factories.insert(name.trim().to_ascii_lowercase(), factory);
    }

    /// 已注册的服务名
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(&name.trim().to_ascii_lowercase())
    }

    /// 解析最终使用的服务名：`auto` 在有API密钥时选 google，否则选 algorithmic
    pub fn resolve_name(config: &TranslatorConfig) -> String {
        let name = config.provider().trim().to_ascii_lowercase();
        if name == "auto" {
            if config.has_api_key() {
                "google".to_string()
            } else {
                "algorithmic".to_string()
            }
        } else {
            name
        }
    }

    /// 按配置构造翻译服务
    pub fn build(&self, config: &TranslatorConfig) -> Result<Box<dyn TranslationProvider>> {
        let name = Self::resolve_name(config);
        let factory = self.factories.get(&name).ok_or_else(|| {
            translation_error!(
                config,
                "provider",
                format!("未注册的翻译服务: {} (可选: {})", name, self.names().join(", "))
            )
        })?;

        let provider = factory(config)?;
        info!(
            "🔌 使用翻译服务: {} (可用: {})",
            provider.name(),
            provider.is_available()
        );
        Ok(provider)
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register("mock", build_algorithmic);
        registry.register("algorithmic", build_algorithmic);
        registry.register("google", build_remote);
        registry.register("remote", build_remote);
        registry
    }
}
