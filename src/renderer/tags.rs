//! 标签分派表

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// 叶子内容标签的默认集合
pub const DEFAULT_LEAF_TAGS: &[&str] = &["TEXT", "TEXTINPUT"];

/// 标签类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagKind {
    /// `<style>`：内容交给样式解析器，不创建控件
    Style,
    /// `<flush>`：触发诊断信号，不创建控件，不访问子节点
    Flush,
    /// 普通元素；`leaf` 为真时取第一个子节点的文本作为值，不再递归
    Element { leaf: bool },
}

/// 大写标签名到 [`TagKind`] 的查找表，未登记的标签都是非叶子元素
#[derive(Debug, Clone)]
pub struct TagTable {
    table: HashMap<String, TagKind>,
}

static DEFAULT_TABLE: Lazy<TagTable> = Lazy::new(|| TagTable::with_leaf_tags(DEFAULT_LEAF_TAGS));

impl TagTable {
    pub fn with_leaf_tags<S: AsRef<str>>(leaf_tags: &[S]) -> Self {
        let mut table = HashMap::new();
        for tag in leaf_tags {
            table.insert(tag.as_ref().to_ascii_uppercase(), TagKind::Element { leaf: true });
        }
        // 控制标签优先于叶子标签
        table.insert("STYLE".to_string(), TagKind::Style);
        table.insert("FLUSH".to_string(), TagKind::Flush);
        Self { table }
    }

    pub fn resolve(&self, tag_name: &str) -> TagKind {
        self.table
            .get(&tag_name.to_ascii_uppercase())
            .copied()
            .unwrap_or(TagKind::Element { leaf: false })
    }
}

impl Default for TagTable {
    fn default() -> Self {
        DEFAULT_TABLE.clone()
    }
}
