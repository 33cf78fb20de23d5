/// 翻译常量配置
///
/// 该文件定义了翻译服务、DOM遍历和命令行相关的常量，方便统一管理和维护

/// 远程翻译API配置
pub mod api_config {
    /// Google Translate v2 翻译接口
    pub const GOOGLE_TRANSLATE_API_URL: &str =
        "https://translation.googleapis.com/language/translate/v2";

    /// Google Translate v2 语言检测接口
    pub const GOOGLE_DETECTION_API_URL: &str =
        "https://translation.googleapis.com/language/translate/v2/detect";

    /// API密钥环境变量
    pub const API_KEY_ENV: &str = "GOOGLE_TRANSLATE_API_KEY";

    /// 翻译服务选择环境变量
    pub const PROVIDER_ENV: &str = "TRANSLATION_PROVIDER";
}

/// 翻译服务配置
pub mod service_config {
    /// 默认翻译服务
    pub const DEFAULT_PROVIDER: &str = "mock";

    /// 自动选择语言的标记
    pub const AUTO_LANGUAGE: &str = "auto";

    /// 远程检测失败时返回的语言代码
    pub const UNKNOWN_LANGUAGE: &str = "unknown";

    /// 默认源语言
    pub const DEFAULT_SOURCE_LANG: &str = "auto";

    /// 默认目标语言
    pub const DEFAULT_TARGET_LANG: &str = "en";

    /// 单次翻译文本最大长度（字符）
    pub const DEFAULT_MAX_TEXT_LENGTH: usize = 5000;

    /// 请求超时时间（秒）
    pub const REQUEST_TIMEOUT_SECONDS: u64 = 30;

    /// 支持的语言代码
    pub const SUPPORTED_LANGUAGES: &[&str] = &[
        "en", "zh", "ja", "ko", "ar", "th", "hi", "he", "ru", "el", "tr", "vi", "fr", "de",
        "es", "it", "pt", "nl", "sv", "pl", "id", "ms", "fa", "ur", "uk", "bg", "cs", "ro",
    ];
}

/// DOM遍历配置
pub mod dom_config {
    /// 整个子树都不参与文本提取的标签
    pub const SKIP_TAGS: &[&str] = &["script", "style", "code", "pre", "noscript", "svg", "math"];

    /// 可能包含可翻译文本的属性（顺序即扫描顺序）
    pub const TRANSLATABLE_ATTRIBUTES: &[&str] =
        &["title", "alt", "placeholder", "aria-label", "aria-describedby"];

    /// 文档级语言检测的采样长度（字符）
    pub const LANGUAGE_SAMPLE_CHARS: usize = 100;

    /// 错误信息中文本节点的截断长度
    pub const TEXT_ERROR_PREVIEW_CHARS: usize = 50;

    /// 错误信息中属性值的截断长度
    pub const ATTRIBUTE_ERROR_PREVIEW_CHARS: usize = 30;
}

/// 命令行配置
pub mod cli_config {
    /// 单个输入文件的最大字节数 (1MB)
    pub const MAX_HTML_CONTENT_BYTES: usize = 1_000_000;

    /// 目录模式下的默认并发文件数
    pub const DEFAULT_CONCURRENCY: usize = 4;

    /// 目录模式识别的HTML扩展名
    pub const HTML_EXTENSIONS: &[&str] = &["html", "htm"];
}

/// 验证API URL是否有效
pub fn is_valid_api_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
        Err(_) => false,
    }
}

/// 验证语言代码是否支持
pub fn is_supported_language(lang: &str) -> bool {
    service_config::SUPPORTED_LANGUAGES.contains(&lang)
}

/// 判断语言参数是否为自动检测
pub fn is_auto_language(lang: &str) -> bool {
    let lang = lang.trim();
    lang.is_empty() || lang.eq_ignore_ascii_case(service_config::AUTO_LANGUAGE)
}
