//! 传输层 - 按地址获取标记文本

use crate::error::{LoadError, Result};

/// 获取文档内容
///
/// 在后台线程中调用，需要 `Send + Sync`。
pub trait Transport: Send + Sync {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// 基于 ureq 的 HTTP 传输，另外支持 `file://` 地址
pub struct HttpTransport {
    agent: ureq::Agent,
}

impl HttpTransport {
    pub fn new(user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new().user_agent(user_agent).build();
        Self { agent }
    }
}

impl Transport for HttpTransport {
    fn fetch(&self, url: &str) -> Result<String> {
        if let Some(path) = url.strip_prefix("file://") {
            return Ok(std::fs::read_to_string(path)?);
        }

        let response = self.agent.get(url).call().map_err(|e| LoadError::Fetch {
            url: url.to_string(),
            message: e.to_string(),
        })?;
        Ok(response.into_string()?)
    }
}
