//! Mini Markup - 标记文档到宿主控件树的加载器
//! 解析 XML 标记，物化为控件，收集 `<style>` 中的规则并按选择器应用

pub mod config;
pub mod error;

// 事件系统
pub mod event;

// 标记/样式解析器
pub mod parser;

// 样式登记表
pub mod registry;

// 宿主工具包接口与内存实现
pub mod native;

// 物化器与样式应用
pub mod renderer;

// 加载运行时
pub mod runtime;

pub use config::LoaderConfig;
pub use error::LoadError;
pub use event::{DocumentReady, ListenerId};
pub use native::{MemoryToolkit, Toolkit, WidgetId};
pub use parser::{StyleParser, StyleRule};
pub use registry::StyleRegistry;
pub use runtime::MarkupLoader;

// 单元测试
#[cfg(test)]
mod tests;
