//! HTML处理模块
//!
//! 负责在 [`HtmlDocument`] 上定位可翻译单元：
//! - 文本节点按文档顺序（先序深度优先）收集，跳过 `script`/`style` 等非语言标签的整个子树
//! - 属性扫描覆盖整个文档，不受跳过标签限制
//! - 纯文本提取与文档级语言判定

// 本地模块导入
use crate::api_constants::dom_config::{LANGUAGE_SAMPLE_CHARS, SKIP_TAGS, TRANSLATABLE_ATTRIBUTES};
use crate::document::{HtmlDocument, NodeId, NodeKind};

/// 纯文本提取时忽略的标签（非可见内容）
const PLAIN_TEXT_SKIP_TAGS: &[&str] = &["script", "style", "noscript", "template"];

/// 可翻译单元在文档中的位置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitLocation {
    /// 文本节点
    Text(NodeId),
    /// 元素上的某个属性
    Attribute {
        element: NodeId,
        name: &'static str,
    },
}

/// 可翻译单元：位置 + 去除首尾空白后的候选文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatableUnit {
    pub location: UnitLocation,
    pub text: String,
}

impl TranslatableUnit {
    pub fn is_attribute(&self) -> bool {
        matches!(self.location, UnitLocation::Attribute { .. })
    }
}

fn has_tag_in(doc: &HtmlDocument, id: NodeId, tags: &[&str]) -> bool {
    doc.tag_name(id)
        .is_some_and(|tag| tags.iter().any(|skip| tag.eq_ignore_ascii_case(skip)))
}

/// 按文档顺序收集非空文本节点，被跳过标签包裹的子树整体剪掉
pub fn collect_text_nodes(doc: &HtmlDocument) -> Vec<NodeId> {
    collect_text_nodes_skipping(doc, SKIP_TAGS)
}

fn collect_text_nodes_skipping(doc: &HtmlDocument, skip_tags: &[&str]) -> Vec<NodeId> {
    let mut text_nodes = Vec::new();
    let mut next = 0;

    while let Some(id) = doc.node_at(next) {
        match doc.kind(id) {
            Some(NodeKind::Element) if has_tag_in(doc, id, skip_tags) => {
                next = doc.subtree_end(id);
                continue;
            }
            Some(NodeKind::Text) => {
                if doc.text(id).is_some_and(|text| !text.trim().is_empty()) {
                    text_nodes.push(id);
                }
            }
            _ => {}
        }
        next += 1;
    }

    text_nodes
}

/// 文本节点候选
pub fn extract_text_units(doc: &HtmlDocument) -> Vec<TranslatableUnit> {
    collect_text_nodes(doc)
        .into_iter()
        .filter_map(|id| {
            let text = doc.text(id)?;
            Some(TranslatableUnit {
                location: UnitLocation::Text(id),
                text: text.trim().to_string(),
            })
        })
        .collect()
}

/// 扫描全部元素的可翻译属性，同一元素内按固定属性顺序输出
pub fn scan_attributes(doc: &HtmlDocument) -> Vec<TranslatableUnit> {
    let mut units = Vec::new();

    for id in doc.node_ids() {
        if doc.kind(id) != Some(NodeKind::Element) {
            continue;
        }
        for &name in TRANSLATABLE_ATTRIBUTES {
            if let Some(value) = doc.attribute(id, name) {
                let trimmed = value.trim();
                if !trimmed.is_empty() {
                    units.push(TranslatableUnit {
                        location: UnitLocation::Attribute { element: id, name },
                        text: trimmed.to_string(),
                    });
                }
            }
        }
    }

    units
}

/// 完整候选列表：先全部文本节点，再全部属性
pub fn extract_translatable_units(doc: &HtmlDocument) -> Vec<TranslatableUnit> {
    let mut units = extract_text_units(doc);
    units.extend(scan_attributes(doc));
    units
}

/// 提取可见纯文本，空白折叠为单个空格
pub fn extract_plain_text(doc: &HtmlDocument) -> String {
    collect_text_nodes_skipping(doc, PLAIN_TEXT_SKIP_TAGS)
        .into_iter()
        .filter_map(|id| doc.text(id))
        .flat_map(|text| {
            text.split_whitespace()
                .map(str::to_string)
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// 根元素 `lang` 属性的主子标签（连字符之前的部分）
pub fn declared_language(doc: &HtmlDocument) -> Option<String> {
    let root = doc.root_element()?;
    let lang = doc.attribute(root, "lang")?;
    let primary = lang.trim().split('-').next()?.trim();
    if primary.is_empty() {
        None
    } else {
        Some(primary.to_ascii_lowercase())
    }
}

/// 文档级语言检测采样：纯文本的前若干字符
pub fn language_sample(doc: &HtmlDocument) -> String {
    extract_plain_text(doc)
        .chars()
        .take(LANGUAGE_SAMPLE_CHARS)
        .collect()
}

/// 文档级语言判定：优先 `lang` 属性，否则对采样文本运行检测器
pub fn detect_document_language<F>(doc: &HtmlDocument, detect: F) -> String
where
    F: FnOnce(&str) -> String,
{
    match declared_language(doc) {
        Some(lang) => lang,
        None => detect(&language_sample(doc)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(doc: &HtmlDocument) -> Vec<String> {
        extract_text_units(doc).into_iter().map(|u| u.text).collect()
    }

    #[test]
    fn test_text_units_in_document_order() {
        let doc = HtmlDocument::parse(
            "<html><head><title>Page title</title></head>\
             <body><h1>Heading</h1><div><p>First <b>bold</b> tail</p></div><p>Last</p></body></html>",
        )
        .unwrap();
        assert_eq!(
            texts(&doc),
            vec!["Page title", "Heading", "First", "bold", "tail", "Last"]
        );
    }

    #[test]
    fn test_skip_tags_pruned_at_any_depth() {
        let doc = HtmlDocument::parse(
            "<body><p>visible</p>\
             <pre><span><em>preformatted</em></span></pre>\
             <div><code>let x = 1;</code></div>\
             <noscript>enable js</noscript>\
             <svg><g><text>chart label</text></g></svg>\
             <math><mi>x</mi></math>\
             <style>.a { color: red }</style>\
             <script>var y = 2;</script>\
             <p>also visible</p></body>",
        )
        .unwrap();
        assert_eq!(texts(&doc), vec!["visible", "also visible"]);
    }

    #[test]
    fn test_whitespace_only_nodes_ignored() {
        let doc = HtmlDocument::parse("<ul>\n  <li>  one  </li>\n  <li>two</li>\n</ul>").unwrap();
        assert_eq!(texts(&doc), vec!["one", "two"]);
    }

    #[test]
    fn test_attribute_scan_ignores_skip_tags() {
        let doc = HtmlDocument::parse(
            r#"<body><script title="loader script"></script>
               <input placeholder="Your name" title="Name field">
               <img alt="  " src="x.png"><button aria-label="Close dialog">x</button></body>"#,
        )
        .unwrap();
        let units = scan_attributes(&doc);
        let found: Vec<_> = units
            .iter()
            .map(|u| match u.location {
                UnitLocation::Attribute { name, .. } => (name, u.text.as_str()),
                UnitLocation::Text(_) => unreachable!(),
            })
            .collect();
        assert_eq!(
            found,
            vec![
                ("title", "loader script"),
                ("title", "Name field"),
                ("placeholder", "Your name"),
                ("aria-label", "Close dialog"),
            ]
        );
    }

    #[test]
    fn test_text_units_precede_attribute_units() {
        let doc = HtmlDocument::parse(r#"<img alt="photo"><p>caption</p>"#).unwrap();
        let units = extract_translatable_units(&doc);
        assert_eq!(units.len(), 2);
        assert!(!units[0].is_attribute());
        assert_eq!(units[0].text, "caption");
        assert!(units[1].is_attribute());
    }

    #[test]
    fn test_traversal_is_restartable() {
        let doc = HtmlDocument::parse("<p>a1a</p><div><p>b2b</p></div>").unwrap();
        assert_eq!(collect_text_nodes(&doc), collect_text_nodes(&doc));
    }

    #[test]
    fn test_plain_text_collapses_whitespace() {
        let doc = HtmlDocument::parse(
            "<p>Hello\n   world</p><script>ignored()</script><p>again</p>",
        )
        .unwrap();
        assert_eq!(extract_plain_text(&doc), "Hello world again");
    }

    #[test]
    fn test_declared_language_primary_subtag() {
        let doc = HtmlDocument::parse(r#"<html lang="zh-TW"><body>x</body></html>"#).unwrap();
        assert_eq!(declared_language(&doc).as_deref(), Some("zh"));

        let doc = HtmlDocument::parse(r#"<html lang=" "><body>x</body></html>"#).unwrap();
        assert_eq!(declared_language(&doc), None);
    }

    #[test]
    fn test_document_language_falls_back_to_sample() {
        let long_text = "a".repeat(500);
        let doc = HtmlDocument::parse(&format!("<p>{}</p>", long_text)).unwrap();
        let detected = detect_document_language(&doc, |sample| {
            assert_eq!(sample.chars().count(), LANGUAGE_SAMPLE_CHARS);
            "fr".to_string()
        });
        assert_eq!(detected, "fr");
    }
}
