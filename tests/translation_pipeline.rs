use std::sync::{Arc, Mutex};

use html_translator::algorithmic_provider::AlgorithmicProvider;
use html_translator::document::HtmlDocument;
use html_translator::html_processor::extract_plain_text;
use html_translator::language::detect_language;
use html_translator::{HtmlTranslator, TranslationProvider, TranslatorConfig};

fn algorithmic() -> HtmlTranslator {
    HtmlTranslator::new(Box::new(AlgorithmicProvider::new()))
}

fn plain_text(html: &str) -> String {
    extract_plain_text(&HtmlDocument::parse(html).unwrap())
}

/// 记录收到的每段文本，原样返回
struct RecordingProvider {
    seen: Arc<Mutex<Vec<String>>>,
}

impl TranslationProvider for RecordingProvider {
    fn name(&self) -> &'static str {
        "recording"
    }

    fn translate_text(&self, text: &str, _source_lang: &str, _target_lang: &str) -> String {
        self.seen.lock().unwrap().push(text.to_string());
        text.to_string()
    }

    fn detect_language(&self, _text: &str) -> String {
        "unknown".to_string()
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[test]
fn script_content_is_never_a_candidate() {
    let result = algorithmic().translate(
        r#"<html lang="ar"><body><p>مرحبا</p><script>var x=1;</script></body></html>"#,
        "auto",
        "en",
    );
    assert_eq!(result.total_text_elements(), 1);
    assert_eq!(result.detected_language(), Some("ar"));
}

#[test]
fn alt_attribute_is_a_candidate() {
    let result = algorithmic().translate(r#"<img alt="صورة">"#, "auto", "en");
    assert_eq!(result.total_text_elements(), 1);
}

#[test]
fn unavailable_remote_provider_passes_through() {
    let config = TranslatorConfig::new().with_provider("google");
    let translator = HtmlTranslator::from_config(&config).unwrap();
    assert!(!translator.provider().is_available());

    let html = r#"<html><body><h1>مرحبا بالعالم</h1><p title="عنوان">نص الفقرة</p></body></html>"#;
    let result = translator.translate(html, "ar", "en");

    assert_eq!(plain_text(result.translated_html()), plain_text(html));
    assert_eq!(result.translated_elements(), 0);
    assert!(result.errors().is_empty());
}

#[test]
fn empty_input_returns_error_result() {
    let result = algorithmic().translate("", "auto", "en");
    assert_eq!(result.total_text_elements(), 0);
    assert_eq!(result.translated_elements(), 0);
    assert!(!result.errors().is_empty());
    assert_eq!(result.translated_html(), "");
}

#[test]
fn skipped_subtrees_never_reach_provider() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let translator = HtmlTranslator::new(Box::new(RecordingProvider {
        seen: Arc::clone(&seen),
    }));
    translator.translate(
        "<body><p>visible paragraph</p><pre><span>pre text here</span></pre>\
         <code>code text here</code><svg><text>svg text here</text></svg>\
         <math><mi>math text</mi></math><noscript>enable scripts</noscript>\
         <style>.x { color: red }</style><script>run()</script></body>",
        "en",
        "fr",
    );
    assert_eq!(*seen.lock().unwrap(), vec!["visible paragraph"]);
}

#[test]
fn filter_rejections_never_reach_provider() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let translator = HtmlTranslator::new(Box::new(RecordingProvider {
        seen: Arc::clone(&seen),
    }));
    let html = "<p>hi</p><p>555-1234</p><p>someone@example.com</p><p>www.example.com</p>\
                <p>function() { return 1; }</p><p>a real sentence</p>";
    let result = translator.translate(html, "en", "fr");
    assert_eq!(*seen.lock().unwrap(), vec!["a real sentence"]);
    assert_eq!(result.total_text_elements(), 6);

    let result = algorithmic().translate(html, "en", "fr");
    assert_eq!(result.total_text_elements(), 6);
    assert_eq!(result.translated_elements(), 1);
}

#[test]
fn translated_count_never_exceeds_total() {
    let translator = algorithmic();
    for html in [
        r#"<p>مرحبا بالعالم</p><img alt="صورة جميلة">"#,
        "<p>Hello world</p>",
        "<div><p>123</p><p>Привет мир</p></div>",
    ] {
        let result = translator.translate(html, "auto", "en");
        assert!(result.translated_elements() <= result.total_text_elements());
    }
}

#[test]
fn same_language_is_a_noop() {
    let html = "<html><body><p>Hello there, world</p></body></html>";
    let result = algorithmic().translate(html, "en", "en");
    assert_eq!(result.translated_elements(), 0);
    assert_eq!(plain_text(result.translated_html()), plain_text(html));
}

#[test]
fn japanese_markers_win_over_shared_ideographs() {
    assert_eq!(detect_language("ログインしてください"), "ja");
    assert_eq!(detect_language("パスワードを入力"), "ja");
    assert_eq!(detect_language("請輸入您的帳戶"), "zh");
}

#[test]
fn unit_failures_do_not_abort_translation() {
    struct FlakyProvider;

    impl TranslationProvider for FlakyProvider {
        fn name(&self) -> &'static str {
            "flaky"
        }

        fn translate_text(&self, text: &str, _source_lang: &str, _target_lang: &str) -> String {
            if text.starts_with("bad") {
                panic!("provider failure");
            }
            format!("<{}>", text)
        }

        fn detect_language(&self, _text: &str) -> String {
            "unknown".to_string()
        }

        fn is_available(&self) -> bool {
            true
        }
    }

    let result = HtmlTranslator::new(Box::new(FlakyProvider)).translate(
        "<p>good one</p><p>bad seed</p><p>good two</p>",
        "en",
        "fr",
    );
    assert_eq!(result.total_text_elements(), 3);
    assert_eq!(result.translated_elements(), 2);
    assert_eq!(result.errors(), &["翻译失败: bad seed".to_string()]);
    assert!(result.translated_html().contains("&lt;good two&gt;"));
}
