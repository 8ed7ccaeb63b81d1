//! 标记与样式解析器

pub mod markup;
pub mod style;

pub use markup::{MarkupDocument, MarkupNode, MarkupNodeType, MarkupParser};
pub use style::{StyleParser, StyleProperties, StyleRule};
