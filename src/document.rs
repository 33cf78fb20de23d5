//! HTML文档模型模块
//!
//! 在 html5ever + markup5ever_rcdom 解析出的DOM之上建立一个按先序排列的节点索引。
//! 提取阶段得到的 [`NodeId`] 在之后的改写阶段仍然有效：改写文本或属性只是一次
//! 按索引的直接更新，不需要重新遍历DOM。

// 第三方crate导入
use html5ever::interface::{Attribute, QualName};
use html5ever::parse_document;
use html5ever::serialize::{serialize, SerializeOpts};
use html5ever::tendril::{StrTendril, TendrilSink};
use html5ever::{LocalName, Namespace};
use markup5ever_rcdom::{Handle, NodeData, RcDom, SerializableHandle};

// 本地模块导入
use crate::error::Result;
use crate::translation_error;

/// 文档内节点的稳定句柄（先序遍历中的位置）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// 节点在先序索引中的位置
    pub fn index(self) -> usize {
        self.0
    }
}

/// 节点类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Element,
    Text,
    /// 注释、doctype、处理指令
    Other,
}

struct NodeEntry {
    handle: Handle,
    /// 子树结束位置（不含），即下一个非后代节点的索引
    subtree_end: usize,
}

/// 解析后的HTML文档
pub struct HtmlDocument {
    dom: RcDom,
    nodes: Vec<NodeEntry>,
}

impl HtmlDocument {
    /// 解析HTML字符串
    pub fn parse(html: &str) -> Result<Self> {
        let dom = parse_document(RcDom::default(), Default::default())
            .from_utf8()
            .read_from(&mut html.as_bytes())
            .map_err(|e| translation_error!(html_parse, e))?;

        let nodes = index_nodes(&dom.document);
        Ok(Self { dom, nodes })
    }

    /// 索引中的节点总数（包括文档节点本身）
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// 按文档顺序返回全部节点句柄
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }

    /// 先序位置对应的句柄
    pub fn node_at(&self, index: usize) -> Option<NodeId> {
        (index < self.nodes.len()).then_some(NodeId(index))
    }

    /// 文档节点
    pub fn document(&self) -> NodeId {
        NodeId(0)
    }

    /// 根元素（通常是 `<html>`）
    pub fn root_element(&self) -> Option<NodeId> {
        self.children(self.document())
            .into_iter()
            .find(|&id| self.kind(id) == Some(NodeKind::Element))
    }

    /// 节点类型，句柄无效时返回 `None`
    pub fn kind(&self, id: NodeId) -> Option<NodeKind> {
        self.nodes.get(id.0).map(|entry| match entry.handle.data {
            NodeData::Document => NodeKind::Document,
            NodeData::Element { .. } => NodeKind::Element,
            NodeData::Text { .. } => NodeKind::Text,
            _ => NodeKind::Other,
        })
    }

    /// 元素标签名（本地名）
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        match &self.nodes.get(id.0)?.handle.data {
            NodeData::Element { name, .. } => Some(name.local.as_ref()),
            _ => None,
        }
    }

    /// 直接子节点，按文档顺序
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let Some(entry) = self.nodes.get(id.0) else {
            return Vec::new();
        };

        let mut children = Vec::new();
        let mut next = id.0 + 1;
        while next < entry.subtree_end {
            children.push(NodeId(next));
            next = self.nodes[next].subtree_end;
        }
        children
    }

    /// 跳过该节点整个子树后的下一个先序位置
    pub fn subtree_end(&self, id: NodeId) -> usize {
        self.nodes
            .get(id.0)
            .map_or(self.nodes.len(), |entry| entry.subtree_end)
    }

    /// 获取属性值
    pub fn attribute(&self, id: NodeId, attr_name: &str) -> Option<String> {
        match &self.nodes.get(id.0)?.handle.data {
            NodeData::Element { attrs, .. } => attrs
                .borrow()
                .iter()
                .find(|attr| &*attr.name.local == attr_name)
                .map(|attr| attr.value.to_string()),
            _ => None,
        }
    }

    /// 获取元素全部属性
    pub fn attributes(&self, id: NodeId) -> Vec<(String, String)> {
        match self.nodes.get(id.0).map(|entry| &entry.handle.data) {
            Some(NodeData::Element { attrs, .. }) => attrs
                .borrow()
                .iter()
                .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// 设置属性值，属性不存在时追加
    pub fn set_attribute(&mut self, id: NodeId, attr_name: &str, value: &str) -> Result<()> {
        let entry = self.entry(id)?;
        let NodeData::Element { attrs, .. } = &entry.handle.data else {
            return Err(translation_error!(document, format!("节点 #{} 不是元素", id.0)));
        };

        let mut attrs = attrs.borrow_mut();
        match attrs.iter_mut().find(|attr| &*attr.name.local == attr_name) {
            Some(attr) => attr.value = StrTendril::from(value),
            None => attrs.push(Attribute {
                name: QualName::new(None, Namespace::from(""), LocalName::from(attr_name)),
                value: StrTendril::from(value),
            }),
        }
        Ok(())
    }

    /// 文本节点内容
    pub fn text(&self, id: NodeId) -> Option<String> {
        match &self.nodes.get(id.0)?.handle.data {
            NodeData::Text { contents } => Some(contents.borrow().to_string()),
            _ => None,
        }
    }

    /// 替换文本节点内容
    pub fn set_text(&mut self, id: NodeId, value: &str) -> Result<()> {
        let entry = self.entry(id)?;
        let NodeData::Text { contents } = &entry.handle.data else {
            return Err(translation_error!(document, format!("节点 #{} 不是文本节点", id.0)));
        };

        let mut contents = contents.borrow_mut();
        contents.clear();
        contents.push_slice(value);
        Ok(())
    }

    /// 序列化为HTML字符串
    pub fn serialize(&self) -> Result<String> {
        let mut buffer = Vec::new();
        let serializable = SerializableHandle::from(self.dom.document.clone());

        serialize(&mut buffer, &serializable, SerializeOpts::default())
            .map_err(|e| translation_error!(html_parse, format!("HTML序列化失败: {}", e)))?;

        String::from_utf8(buffer)
            .map_err(|e| translation_error!(html_parse, format!("UTF-8转换失败: {}", e)))
    }

    fn entry(&self, id: NodeId) -> Result<&NodeEntry> {
        self.nodes
            .get(id.0)
            .ok_or_else(|| translation_error!(document, format!("无效的节点句柄 #{}", id.0)))
    }
}

/// 迭代式先序遍历，记录每个节点的子树范围
fn index_nodes(document: &Handle) -> Vec<NodeEntry> {
    enum Visit {
        Enter(Handle),
        Exit(usize),
    }

    let mut nodes = Vec::new();
    let mut stack = vec![Visit::Enter(document.clone())];

    while let Some(visit) = stack.pop() {
        match visit {
            Visit::Enter(handle) => {
                let index = nodes.len();
                stack.push(Visit::Exit(index));
                for child in handle.children.borrow().iter().rev() {
                    stack.push(Visit::Enter(child.clone()));
                }
                nodes.push(NodeEntry {
                    handle,
                    subtree_end: index + 1,
                });
            }
            Visit::Exit(index) => {
                nodes[index].subtree_end = nodes.len();
            }
        }
    }

    nodes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_element(doc: &HtmlDocument, tag: &str) -> NodeId {
        doc.node_ids()
            .find(|&id| doc.tag_name(id) == Some(tag))
            .expect("element present")
    }

    #[test]
    fn test_root_element_is_html() {
        let doc = HtmlDocument::parse("<p>hello</p>").unwrap();
        let root = doc.root_element().unwrap();
        assert_eq!(doc.tag_name(root), Some("html"));
        assert_eq!(doc.kind(doc.document()), Some(NodeKind::Document));
    }

    #[test]
    fn test_children_follow_document_order() {
        let doc = HtmlDocument::parse("<ul><li>a</li><li>b</li><li>c</li></ul>").unwrap();
        let ul = find_element(&doc, "ul");
        let items: Vec<_> = doc
            .children(ul)
            .into_iter()
            .filter_map(|li| doc.children(li).first().and_then(|&t| doc.text(t)))
            .collect();
        assert_eq!(items, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_subtree_end_skips_descendants() {
        let doc = HtmlDocument::parse("<div><span><b>x</b></span></div><p>y</p>").unwrap();
        let div = find_element(&doc, "div");
        let p = find_element(&doc, "p");
        assert_eq!(doc.subtree_end(div), p.index());
    }

    #[test]
    fn test_handles_stay_valid_after_mutation() {
        let mut doc = HtmlDocument::parse(r#"<p title="old">first</p><p>second</p>"#).unwrap();
        let text_ids: Vec<_> = doc
            .node_ids()
            .filter(|&id| doc.kind(id) == Some(NodeKind::Text))
            .collect();
        let p = find_element(&doc, "p");

        doc.set_text(text_ids[0], "premier").unwrap();
        doc.set_attribute(p, "title", "nouveau").unwrap();
        doc.set_text(text_ids[1], "second!").unwrap();

        assert_eq!(doc.text(text_ids[0]).as_deref(), Some("premier"));
        assert_eq!(doc.text(text_ids[1]).as_deref(), Some("second!"));
        assert_eq!(doc.attribute(p, "title").as_deref(), Some("nouveau"));

        let html = doc.serialize().unwrap();
        assert!(html.contains(r#"<p title="nouveau">premier</p>"#));
    }

    #[test]
    fn test_set_attribute_appends_missing() {
        let mut doc = HtmlDocument::parse("<img src=\"a.png\">").unwrap();
        let img = find_element(&doc, "img");
        doc.set_attribute(img, "alt", "picture").unwrap();
        assert_eq!(
            doc.attributes(img),
            vec![
                ("src".to_string(), "a.png".to_string()),
                ("alt".to_string(), "picture".to_string())
            ]
        );
    }

    #[test]
    fn test_mutation_rejects_wrong_kind_and_bad_handle() {
        let mut doc = HtmlDocument::parse("<p>text</p>").unwrap();
        let p = find_element(&doc, "p");
        assert!(matches!(
            doc.set_text(p, "x"),
            Err(crate::error::TranslationError::Document { .. })
        ));
        assert!(doc.set_text(NodeId(10_000), "x").is_err());
        assert!(doc.set_attribute(NodeId(10_000), "title", "x").is_err());
    }
}
