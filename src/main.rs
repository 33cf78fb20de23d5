// 标准库导入
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

// 第三方crate导入
use anyhow::{Context, Result};
use clap::Parser;
use futures::future::join_all;
use tracing::{error, info, warn};

// 本地模块导入
use html_translator::api_constants::is_supported_language;
use html_translator::config::Cli;
use html_translator::stats::{format_duration, print_translation_report, FileStats};
use html_translator::utils::{
    collect_html_inputs, generate_output_path, init_logging, read_html_file, validate_input_file,
};
use html_translator::{HtmlTranslator, TranslationResult};

/// 单个文件的处理结果
struct FileOutcome {
    input: PathBuf,
    output: PathBuf,
    result: TranslationResult,
    stats: FileStats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // 初始化日志系统
    init_logging(cli.verbose, cli.quiet);

    // 远程翻译服务持有阻塞式HTTP客户端，必须在异步运行时之外创建和销毁
    let config = cli.translator_config();
    let translator = Arc::new(HtmlTranslator::from_config(&config).context("初始化翻译器失败")?);
    let target = translator.default_target_lang().to_string();

    if !is_supported_language(&target) {
        warn!("⚠️  目标语言 {} 不在已知语言列表中，仍将尝试翻译", target);
    }

    let inputs = collect_html_inputs(&cli.input);
    if inputs.is_empty() {
        anyhow::bail!("没有找到可处理的HTML文件");
    }
    if cli.output.is_some() && inputs.len() > 1 {
        anyhow::bail!("--output 只能用于单个输入文件");
    }

    if !cli.quiet {
        info!("🚀 启动HTML翻译: {} 个文件", inputs.len());
        info!(
            "🌐 {} -> {} (服务: {})",
            translator.default_source_lang(),
            target,
            translator.provider().name()
        );
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("创建异步运行时失败")?;

    let total_start = Instant::now();
    let (outcomes, failures) = runtime.block_on(translate_all(
        Arc::clone(&translator),
        &inputs,
        &cli.output,
        &target,
        cli.concurrency,
    ));
    let total_duration = total_start.elapsed();
    drop(runtime);

    if cli.json {
        print_json(&outcomes)?;
    }

    for outcome in &outcomes {
        if !cli.quiet {
            info!(
                "✅ {} -> {} ({}/{} 个元素, {:.1}%)",
                outcome.input.display(),
                outcome.output.display(),
                outcome.result.translated_elements(),
                outcome.result.total_text_elements(),
                outcome.result.completeness()
            );
        }
        for message in outcome.result.errors() {
            warn!("⚠️  {}: {}", outcome.input.display(), message);
        }
        if cli.stats {
            print_translation_report(&outcome.result, &outcome.stats, total_duration);
        }
    }

    if !cli.quiet {
        info!(
            "🏁 完成: {} 个成功, {} 个失败, 总耗时 {}",
            outcomes.len(),
            failures,
            format_duration(total_duration)
        );
    }

    if failures > 0 {
        std::process::exit(1);
    }

    Ok(())
}

/// 按并发数分组，在阻塞线程池中翻译全部文件
async fn translate_all(
    translator: Arc<HtmlTranslator>,
    inputs: &[PathBuf],
    output: &Option<PathBuf>,
    target: &str,
    concurrency: usize,
) -> (Vec<FileOutcome>, usize) {
    let mut outcomes = Vec::new();
    let mut failures = 0;

    for chunk in inputs.chunks(concurrency.max(1)) {
        let tasks = chunk.iter().map(|input| {
            let translator = Arc::clone(&translator);
            let input = input.clone();
            let output = generate_output_path(&input, output, target);

            async move {
                let path = input.clone();
                let outcome =
                    tokio::task::spawn_blocking(move || translate_file(&translator, &input, output))
                        .await
                        .with_context(|| format!("翻译任务执行失败: {}", path.display()))
                        .and_then(|outcome| outcome);
                (path, outcome)
            }
        });

        for (path, outcome) in join_all(tasks).await {
            match outcome {
                Ok(outcome) => outcomes.push(outcome),
                Err(e) => {
                    failures += 1;
                    error!("❌ {} 处理失败: {:#}", path.display(), e);
                }
            }
        }
    }

    (outcomes, failures)
}

/// 读取、翻译并写出一个文件
fn translate_file(translator: &HtmlTranslator, input: &Path, output: PathBuf) -> Result<FileOutcome> {
    validate_input_file(input)?;

    let read_start = Instant::now();
    let html_content = read_html_file(input)?;
    let file_read_time = read_start.elapsed();

    let translate_start = Instant::now();
    let result = translator.translate_with_defaults(&html_content);
    let translation_time = translate_start.elapsed();

    let write_start = Instant::now();
    std::fs::write(&output, result.translated_html())
        .with_context(|| format!("写入输出文件失败: {}", output.display()))?;
    let file_write_time = write_start.elapsed();

    let stats = FileStats {
        file_read_time,
        translation_time,
        file_write_time,
        input_size: html_content.len(),
        output_size: result.translated_html().len(),
    };

    Ok(FileOutcome {
        input: input.to_path_buf(),
        output,
        result,
        stats,
    })
}

fn print_json(outcomes: &[FileOutcome]) -> Result<()> {
    let json = match outcomes {
        [single] => serde_json::to_string_pretty(&single.result)?,
        _ => {
            let entries: Vec<_> = outcomes
                .iter()
                .map(|outcome| {
                    serde_json::json!({
                        "input": outcome.input.display().to_string(),
                        "output": outcome.output.display().to_string(),
                        "result": &outcome.result,
                    })
                })
                .collect();
            serde_json::to_string_pretty(&entries)?
        }
    };
    println!("{}", json);
    Ok(())
}
