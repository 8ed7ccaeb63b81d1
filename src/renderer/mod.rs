//! 控件树构建与样式应用

mod applicator;
mod materializer;
mod tags;

pub use applicator::apply_styles;
pub use materializer::{MaterializeStats, Materializer};
pub use tags::{TagKind, TagTable, DEFAULT_LEAF_TAGS};
