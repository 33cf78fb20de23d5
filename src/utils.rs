// 标准库导入
use std::path::{Path, PathBuf};

// 第三方crate导入
use tracing::warn;
use tracing_subscriber::EnvFilter;
use walkdir::WalkDir;

// 本地模块导入
use crate::api_constants::cli_config::{HTML_EXTENSIONS, MAX_HTML_CONTENT_BYTES};
use crate::error::Result;
use crate::translation_error;

/// 初始化日志系统
///
/// 设置了 `RUST_LOG` 时以其为准，否则 verbose 为 DEBUG、默认 INFO；静默模式不安装订阅器。
pub fn init_logging(verbose: bool, quiet: bool) {
    if quiet {
        return;
    }

    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// 按字符截断（不会切断多字节字符）
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn has_html_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| {
            HTML_EXTENSIONS
                .iter()
                .any(|html| ext.to_string_lossy().eq_ignore_ascii_case(html))
        })
        .unwrap_or(false)
}

/// 验证输入文件
pub fn validate_input_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(translation_error!(input_validation, path.display(), "输入文件不存在"));
    }

    if !path.is_file() {
        return Err(translation_error!(input_validation, path.display(), "输入路径不是文件"));
    }

    if !has_html_extension(path) {
        if let Some(ext) = path.extension() {
            warn!("⚠️  文件扩展名不是HTML: {}", ext.to_string_lossy());
        }
    }

    Ok(())
}

/// 读取HTML文件，超过1MB的输入被拒绝
pub fn read_html_file(path: &Path) -> Result<String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| translation_error!(file_op, path.display(), "读取", e))?;

    if content.len() > MAX_HTML_CONTENT_BYTES {
        return Err(translation_error!(
            input_validation,
            path.display(),
            format!(
                "HTML内容过大: {} 字节 (上限 {} 字节)",
                content.len(),
                MAX_HTML_CONTENT_BYTES
            )
        ));
    }

    Ok(content)
}

/// 展开输入：文件原样保留，目录递归收集其中的HTML文件
pub fn collect_html_inputs(inputs: &[PathBuf]) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        warn!("⚠️  无法访问目录项: {}", e);
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file() && has_html_extension(entry.path()))
                .map(|entry| entry.into_path())
                .collect();
            found.sort();
            files.extend(found);
        } else {
            files.push(input.clone());
        }
    }

    files
}

/// 生成输出文件路径
pub fn generate_output_path(input: &Path, output: &Option<PathBuf>, lang: &str) -> PathBuf {
    if let Some(output_path) = output {
        return output_path.clone();
    }

    // 自动生成输出路径: input_en.html
    let stem = input.file_stem().unwrap_or_default();
    let extension = input.extension().unwrap_or_default();

    let output_name = format!(
        "{}_{}.{}",
        stem.to_string_lossy(),
        lang,
        extension.to_string_lossy()
    );

    if let Some(parent) = input.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_chars_multibyte() {
        assert_eq!(truncate_chars("مرحبا بالعالم", 5), "مرحبا");
        assert_eq!(truncate_chars("short", 50), "short");
    }

    #[test]
    fn test_generate_output_path() {
        let path = generate_output_path(Path::new("/tmp/site/index.html"), &None, "en");
        assert_eq!(path, PathBuf::from("/tmp/site/index_en.html"));

        let explicit = Some(PathBuf::from("out.html"));
        assert_eq!(
            generate_output_path(Path::new("index.html"), &explicit, "en"),
            PathBuf::from("out.html")
        );
    }

    #[test]
    fn test_validate_input_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("page.html");
        std::fs::write(&file, "<p>hi</p>").unwrap();

        assert!(validate_input_file(&file).is_ok());
        assert!(validate_input_file(&dir.path().join("missing.html")).is_err());
        assert!(validate_input_file(dir.path()).is_err());
    }

    #[test]
    fn test_read_html_file_rejects_oversized_input() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("big.html");
        std::fs::write(&file, "a".repeat(MAX_HTML_CONTENT_BYTES + 1)).unwrap();

        assert!(matches!(
            read_html_file(&file),
            Err(crate::error::TranslationError::InputValidation { .. })
        ));
    }

    #[test]
    fn test_collect_html_inputs_walks_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("nested");
        std::fs::create_dir(&nested).unwrap();
        std::fs::write(dir.path().join("b.html"), "").unwrap();
        std::fs::write(nested.join("a.HTM"), "").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "").unwrap();

        let files = collect_html_inputs(&[dir.path().to_path_buf()]);
        assert_eq!(files, vec![dir.path().join("b.html"), nested.join("a.HTM")]);
    }
}
