//! 加载错误类型

use thiserror::Error;

/// 加载标记文档时可能出现的错误
///
/// 样式语法错误不在此列：样式解析器遇到不完整的规则时会静默截断。
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("XML parse error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    Attribute(#[from] quick_xml::events::attributes::AttrError),

    #[error("Document has no root element")]
    MissingRoot,

    #[error("Element <{0}> is never closed")]
    UnclosedElement(String),

    #[error("Failed to fetch {url}: {message}")]
    Fetch { url: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LoadError>;
