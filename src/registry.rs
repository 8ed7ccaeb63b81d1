//! 样式规则登记表

use crate::parser::{StyleParser, StyleRule};

/// 按插入顺序累积样式规则
///
/// 只追加、不去重。同一个登记表在多次加载之间复用时，
/// 之前文档的规则会继续作用于之后文档的控件。
#[derive(Debug, Clone, Default)]
pub struct StyleRegistry {
    rules: Vec<StyleRule>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_rules<I>(&mut self, rules: I)
    where
        I: IntoIterator<Item = StyleRule>,
    {
        self.rules.extend(rules);
    }

    /// 解析样式文本并追加，返回新增规则数
    pub fn add_style_text(&mut self, text: &str) -> usize {
        let rules = StyleParser::parse(text);
        let count = rules.len();
        self.add_rules(rules);
        count
    }

    pub fn all(&self) -> &[StyleRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub(crate) fn reset(&mut self) {
        self.rules.clear();
    }
}
