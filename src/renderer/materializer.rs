//! 物化器 - 把标记文档构建为宿主控件树

use super::tags::{TagKind, TagTable};
use crate::native::Toolkit;
use crate::parser::MarkupNode;
use crate::registry::StyleRegistry;

/// 一次物化的统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaterializeStats {
    pub widgets: usize,
    pub style_rules: usize,
    pub flushes: usize,
}

pub struct Materializer<'a, T: Toolkit> {
    toolkit: &'a mut T,
    registry: &'a mut StyleRegistry,
    tags: &'a TagTable,
    stats: MaterializeStats,
}

impl<'a, T: Toolkit> Materializer<'a, T> {
    pub fn new(toolkit: &'a mut T, registry: &'a mut StyleRegistry, tags: &'a TagTable) -> Self {
        Self {
            toolkit,
            registry,
            tags,
            stats: MaterializeStats::default(),
        }
    }

    pub fn stats(&self) -> MaterializeStats {
        self.stats
    }

    /// 在 `parent` 下按文档顺序物化 `element` 的元素子节点
    ///
    /// `element` 本身不生成控件；文本等非元素子节点被跳过。
    pub fn materialize(&mut self, element: &MarkupNode, parent: &T::Widget) {
        for child in element.element_children() {
            self.materialize_element(child, parent);
        }
    }

    /// 物化单个元素
    pub fn materialize_element(&mut self, element: &MarkupNode, parent: &T::Widget) {
        match self.tags.resolve(&element.tag_name) {
            TagKind::Style => {
                if let Some(text) = element.first_child_value() {
                    let added = self.registry.add_style_text(text);
                    log::debug!("<{}> added {} style rules", element.tag_name, added);
                    self.stats.style_rules += added;
                }
            }
            TagKind::Flush => {
                self.toolkit.signal_diagnostic();
                self.stats.flushes += 1;
            }
            TagKind::Element { leaf } => {
                let widget = self.toolkit.create_element(&element.tag_name);
                self.toolkit.append_child(parent, &widget);
                for (name, value) in &element.attributes {
                    self.toolkit.set_attribute(&widget, name, value);
                }
                self.stats.widgets += 1;

                if leaf {
                    if let Some(value) = element.first_child_value() {
                        self.toolkit.set_value(&widget, value);
                    }
                } else {
                    self.materialize(element, &widget);
                }
            }
        }
    }
}
