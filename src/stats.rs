// 标准库导入
use std::time::Duration;

// 本地模块导入
use crate::result::TranslationResult;

/// 单个文件的处理统计
#[derive(Debug, Default, Clone)]
pub struct FileStats {
    pub file_read_time: Duration,
    pub translation_time: Duration,
    pub file_write_time: Duration,
    pub input_size: usize,
    pub output_size: usize,
}

/// 打印翻译统计报告
pub fn print_translation_report(
    result: &TranslationResult,
    stats: &FileStats,
    total_duration: Duration,
) {
    println!("\n📊 翻译统计报告:");
    println!("═══════════════════════════════════════");

    // 时间分解
    println!("⏱️  时间分解:");
    println!("   文件读取: {}", format_duration(stats.file_read_time));
    println!("   翻译执行: {}", format_duration(stats.translation_time));
    println!("   文件写入: {}", format_duration(stats.file_write_time));
    println!("   总耗时: {}", format_duration(total_duration));

    // 文件统计
    println!("\n📏 文件统计:");
    println!(
        "   输入大小: {} 字节 ({:.1} KB)",
        stats.input_size,
        stats.input_size as f64 / 1024.0
    );
    println!(
        "   输出大小: {} 字节 ({:.1} KB)",
        stats.output_size,
        stats.output_size as f64 / 1024.0
    );
    if stats.input_size > 0 {
        println!(
            "   大小变化: {:.1}%",
            (stats.output_size as f64 / stats.input_size as f64 - 1.0) * 100.0
        );
    }

    // 翻译统计
    println!("\n🔤 翻译统计:");
    println!(
        "   语言: {} -> {}",
        result.detected_language().unwrap_or(result.source_language()),
        result.target_language()
    );
    println!("   候选单元: {} 项", result.total_text_elements());
    println!("   已翻译: {} 项", result.translated_elements());
    println!("   完成度: {:.1}%", result.completeness());

    if result.has_errors() {
        println!("\n⚠️  错误 ({}):", result.errors().len());
        for error in result.errors() {
            println!("   - {}", error);
        }
    }
}

/// 格式化持续时间
pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.3}s", duration.as_secs_f64())
    }
}
