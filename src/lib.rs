//! HTML Translator - HTML文档翻译工具库
//!
//! 解析HTML文档，定位可见文本与可翻译属性，交给可替换的翻译服务处理后写回，
//! 并输出带统计信息的翻译结果。

pub mod algorithmic_provider;
pub mod api_constants;
pub mod config;
pub mod document;
pub mod error;
pub mod filter;
pub mod html_processor;
pub mod language;
pub mod provider;
pub mod remote_provider;
pub mod result;
pub mod stats;
pub mod translator;
pub mod utils;

pub use config::TranslatorConfig;
pub use error::{Result, TranslationError};
pub use provider::{ProviderRegistry, TranslationProvider};
pub use result::TranslationResult;
pub use translator::HtmlTranslator;
