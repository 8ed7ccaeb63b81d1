//! 加载器配置

use crate::error::Result;
use crate::renderer::DEFAULT_LEAF_TAGS;
use serde::Deserialize;
use std::path::Path;

/// 加载器配置（JSON，camelCase 键名，缺省字段取默认值）
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoaderConfig {
    /// 叶子内容标签，大小写不敏感
    #[serde(default = "default_leaf_tags")]
    pub leaf_tags: Vec<String>,
    /// 为假时每次加载前清空样式登记表
    #[serde(default = "default_accumulate")]
    pub accumulate_styles: bool,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_leaf_tags() -> Vec<String> {
    DEFAULT_LEAF_TAGS.iter().map(|t| t.to_ascii_lowercase()).collect()
}
fn default_accumulate() -> bool { true }
fn default_user_agent() -> String { concat!("mini-markup/", env!("CARGO_PKG_VERSION")).to_string() }

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            leaf_tags: default_leaf_tags(),
            accumulate_styles: default_accumulate(),
            user_agent: default_user_agent(),
        }
    }
}

impl LoaderConfig {
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }
}
