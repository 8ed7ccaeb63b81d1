//! 内存控件树
//!
//! 以数组保存全部控件，`WidgetId` 即下标，0 号是根控件。

use super::selector::{ElementView, SelectorList};
use super::Toolkit;
use crate::parser::StyleProperties;
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// 控件 ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(pub usize);

/// 控件类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetKind {
    Root,
    View,
    Text,
    TextInput,
    Button,
    Image,
    Custom,
}

impl WidgetKind {
    /// 根据标签名确定控件类型，未知标签作为自定义控件
    pub fn from_tag(tag: &str) -> Self {
        match tag.to_ascii_lowercase().as_str() {
            "view" | "panel" | "block" | "box" | "scroll-view" => WidgetKind::View,
            "text" | "label" => WidgetKind::Text,
            "textinput" | "input" | "textarea" => WidgetKind::TextInput,
            "button" => WidgetKind::Button,
            "image" | "img" => WidgetKind::Image,
            _ => WidgetKind::Custom,
        }
    }

    /// 是否可以持有文本值
    pub fn holds_value(&self) -> bool {
        matches!(
            self,
            WidgetKind::Text | WidgetKind::TextInput | WidgetKind::Button | WidgetKind::Custom
        )
    }
}

/// 单个控件
#[derive(Debug, Clone)]
pub struct WidgetNode {
    pub kind: WidgetKind,
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub value: Option<String>,
    /// 样式属性，按名称排序便于输出
    pub style: BTreeMap<String, String>,
    pub parent: Option<WidgetId>,
    pub children: Vec<WidgetId>,
}

impl WidgetNode {
    fn new(kind: WidgetKind, tag: &str) -> Self {
        Self {
            kind,
            tag: tag.to_string(),
            attributes: Vec::new(),
            value: None,
            style: BTreeMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn style_value(&self, name: &str) -> Option<&str> {
        self.style.get(name).map(String::as_str)
    }
}

/// 内存工具包
#[derive(Debug, Clone)]
pub struct MemoryToolkit {
    nodes: Vec<WidgetNode>,
    flush_count: usize,
}

impl MemoryToolkit {
    pub const ROOT: WidgetId = WidgetId(0);

    pub fn new() -> Self {
        Self {
            nodes: vec![WidgetNode::new(WidgetKind::Root, "root")],
            flush_count: 0,
        }
    }

    pub fn widget(&self, id: WidgetId) -> &WidgetNode {
        &self.nodes[id.0]
    }

    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        &self.nodes[id.0].children
    }

    /// 控件总数（不含根控件）
    pub fn len(&self) -> usize {
        self.nodes.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 诊断信号触发次数
    pub fn flush_count(&self) -> usize {
        self.flush_count
    }

    /// 按 `id` 属性查找第一个控件
    pub fn find_by_id(&self, id: &str) -> Option<WidgetId> {
        self.descendants(Self::ROOT)
            .into_iter()
            .find(|w| self.widget(*w).get_attr("id") == Some(id))
    }

    /// 以文档顺序列出某控件的全部后代
    pub fn descendants(&self, id: WidgetId) -> Vec<WidgetId> {
        let mut out = Vec::new();
        let mut stack: Vec<WidgetId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// 输出缩进的控件树
    pub fn dump(&self) -> String {
        let mut out = String::new();
        for child in self.children(Self::ROOT) {
            self.dump_node(*child, 0, &mut out);
        }
        out
    }

    fn dump_node(&self, id: WidgetId, depth: usize, out: &mut String) {
        let node = self.widget(id);
        let indent = "  ".repeat(depth);

        let _ = write!(out, "{}<{}", indent, node.tag);
        for (k, v) in &node.attributes {
            let _ = write!(out, " {}=\"{}\"", k, v);
        }
        out.push('>');
        if let Some(value) = &node.value {
            let _ = write!(out, " {:?}", value);
        }
        if !node.style.is_empty() {
            let style: Vec<String> = node.style.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
            let _ = write!(out, " {{{}}}", style.join("; "));
        }
        out.push('\n');

        for child in &node.children {
            self.dump_node(*child, depth + 1, out);
        }
    }
}

impl Default for MemoryToolkit {
    fn default() -> Self {
        Self::new()
    }
}

/// 选择器匹配用的控件视图
#[derive(Clone, Copy)]
struct NodeRef<'a> {
    toolkit: &'a MemoryToolkit,
    id: WidgetId,
}

impl<'a> ElementView for NodeRef<'a> {
    fn tag(&self) -> &str {
        &self.toolkit.widget(self.id).tag
    }

    fn attribute(&self, name: &str) -> Option<&str> {
        self.toolkit.widget(self.id).get_attr(name)
    }

    fn parent(&self) -> Option<Self> {
        self.toolkit
            .widget(self.id)
            .parent
            .map(|id| NodeRef { toolkit: self.toolkit, id })
    }
}

impl Toolkit for MemoryToolkit {
    type Widget = WidgetId;

    fn root(&self) -> WidgetId {
        Self::ROOT
    }

    fn create_element(&mut self, tag: &str) -> WidgetId {
        let id = WidgetId(self.nodes.len());
        self.nodes.push(WidgetNode::new(WidgetKind::from_tag(tag), tag));
        id
    }

    fn append_child(&mut self, parent: &WidgetId, child: &WidgetId) {
        if let Some(old) = self.nodes[child.0].parent.take() {
            self.nodes[old.0].children.retain(|c| c != child);
        }
        self.nodes[child.0].parent = Some(*parent);
        self.nodes[parent.0].children.push(*child);
    }

    fn set_attribute(&mut self, widget: &WidgetId, name: &str, value: &str) {
        let attributes = &mut self.nodes[widget.0].attributes;
        match attributes.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value.to_string(),
            None => attributes.push((name.to_string(), value.to_string())),
        }
    }

    fn set_value(&mut self, widget: &WidgetId, value: &str) {
        let node = &mut self.nodes[widget.0];
        if !node.kind.holds_value() {
            log::warn!("<{}> does not hold a value, ignoring {:?}", node.tag, value);
            return;
        }
        node.value = Some(value.to_string());
    }

    fn merge_style(&mut self, widget: &WidgetId, properties: &StyleProperties) {
        let style = &mut self.nodes[widget.0].style;
        for (name, value) in properties {
            style.insert(name.clone(), value.clone());
        }
    }

    fn query_selector_all(&self, selector: &str) -> Vec<WidgetId> {
        let Some(list) = SelectorList::parse(selector) else {
            log::debug!("unsupported selector {:?}, no matches", selector);
            return Vec::new();
        };

        self.descendants(Self::ROOT)
            .into_iter()
            .filter(|id| list.matches(&NodeRef { toolkit: self, id: *id }))
            .collect()
    }

    fn signal_diagnostic(&mut self) {
        self.flush_count += 1;
        log::debug!("diagnostic signal #{}", self.flush_count);
    }
}
