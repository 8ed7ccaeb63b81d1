//! 标记文档解析器
//!
//! 基于 quick-xml 的事件流构建只读文档树，供物化器遍历。

use crate::error::{LoadError, Result};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// 标记节点类型
#[derive(Debug, Clone, PartialEq)]
pub enum MarkupNodeType {
    Element,
    Text,
    Comment,
}

/// 标记节点
#[derive(Debug, Clone)]
pub struct MarkupNode {
    pub node_type: MarkupNodeType,
    pub tag_name: String,
    /// 属性按文档顺序保存
    pub attributes: Vec<(String, String)>,
    pub children: Vec<MarkupNode>,
    pub text_content: String,
}

impl MarkupNode {
    pub fn new_element(tag_name: &str) -> Self {
        Self {
            node_type: MarkupNodeType::Element,
            tag_name: tag_name.to_string(),
            attributes: Vec::new(),
            children: Vec::new(),
            text_content: String::new(),
        }
    }

    pub fn new_text(content: &str) -> Self {
        Self {
            node_type: MarkupNodeType::Text,
            tag_name: String::new(),
            attributes: Vec::new(),
            children: Vec::new(),
            text_content: content.to_string(),
        }
    }

    pub fn new_comment(content: &str) -> Self {
        Self {
            node_type: MarkupNodeType::Comment,
            ..Self::new_text(content)
        }
    }

    pub fn is_element(&self) -> bool {
        self.node_type == MarkupNodeType::Element
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// 只返回元素子节点，跳过文本与注释
    pub fn element_children(&self) -> impl Iterator<Item = &MarkupNode> {
        self.children.iter().filter(|c| c.is_element())
    }

    /// 第一个子节点的值
    ///
    /// 第一个子节点是文本（含 CDATA）或注释时返回其内容；是元素或没有子节点时返回 `None`。
    pub fn first_child_value(&self) -> Option<&str> {
        match self.children.first() {
            Some(child) if !child.is_element() => Some(child.text_content.as_str()),
            _ => None,
        }
    }
}

/// 解析后的文档
#[derive(Debug, Clone)]
pub struct MarkupDocument {
    pub root: MarkupNode,
}

impl MarkupDocument {
    pub fn root_element(&self) -> &MarkupNode {
        &self.root
    }
}

/// 标记解析器
pub struct MarkupParser;

impl MarkupParser {
    /// 把 XML 文本解析为文档
    ///
    /// 根元素之外的文本、声明、处理指令和 DOCTYPE 都被忽略。
    pub fn parse(input: &str) -> Result<MarkupDocument> {
        let mut reader = Reader::from_str(input);
        let mut stack: Vec<MarkupNode> = Vec::new();
        let mut root: Option<MarkupNode> = None;

        loop {
            match reader.read_event()? {
                Event::Start(e) => {
                    stack.push(Self::element_from(&e)?);
                }
                Event::Empty(e) => {
                    let node = Self::element_from(&e)?;
                    Self::attach(&mut stack, &mut root, node);
                }
                Event::End(_) => {
                    // quick-xml 已经校验了结束标签名
                    if let Some(node) = stack.pop() {
                        Self::attach(&mut stack, &mut root, node);
                    }
                }
                Event::Text(t) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = t.unescape()?;
                        parent.children.push(MarkupNode::new_text(&text));
                    }
                }
                Event::CData(c) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                        parent.children.push(MarkupNode::new_text(&text));
                    }
                }
                Event::Comment(c) => {
                    if let Some(parent) = stack.last_mut() {
                        let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                        parent.children.push(MarkupNode::new_comment(&text));
                    }
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(open) = stack.pop() {
            return Err(LoadError::UnclosedElement(open.tag_name));
        }

        root.map(|root| MarkupDocument { root })
            .ok_or(LoadError::MissingRoot)
    }

    fn element_from(start: &BytesStart<'_>) -> Result<MarkupNode> {
        let tag_name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        let mut node = MarkupNode::new_element(&tag_name);

        for attr in start.attributes() {
            let attr = attr?;
            let name = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value()?.into_owned();
            node.attributes.push((name, value));
        }

        Ok(node)
    }

    fn attach(stack: &mut [MarkupNode], root: &mut Option<MarkupNode>, node: MarkupNode) {
        match stack.last_mut() {
            Some(parent) => parent.children.push(node),
            // 多个顶层元素时保留第一个
            None if root.is_none() => *root = Some(node),
            None => log::warn!("ignoring extra top-level element <{}>", node.tag_name),
        }
    }
}
