//! 宿主控件工具包接口
//!
//! 物化器和样式应用器只通过 [`Toolkit`] 操作控件；
//! [`MemoryToolkit`] 是内置的内存实现，供命令行工具和测试使用。

mod memory;
pub mod selector;

pub use memory::{MemoryToolkit, WidgetId, WidgetKind, WidgetNode};
pub use selector::{Selector, SelectorList};

use crate::parser::StyleProperties;

/// 宿主控件工具包
///
/// 控件的生命周期归工具包所有，物化器从不释放控件。
pub trait Toolkit {
    /// 控件句柄
    type Widget: Clone;

    /// 文档挂载点
    fn root(&self) -> Self::Widget;

    /// 按标签名创建控件
    fn create_element(&mut self, tag: &str) -> Self::Widget;

    fn append_child(&mut self, parent: &Self::Widget, child: &Self::Widget);

    fn set_attribute(&mut self, widget: &Self::Widget, name: &str, value: &str);

    /// 设置文本类控件的值
    fn set_value(&mut self, widget: &Self::Widget, value: &str);

    /// 把属性表合并进控件的样式，同名属性直接覆盖
    fn merge_style(&mut self, widget: &Self::Widget, properties: &StyleProperties);

    /// 在根控件下按选择器查询，结果按文档顺序排列
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Widget>;

    /// 单向诊断信号，不关心返回
    fn signal_diagnostic(&mut self);
}
