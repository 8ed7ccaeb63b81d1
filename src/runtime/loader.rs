//! 标记加载器 - 获取/解析 → 物化 → 应用样式 → 通知

use super::transport::{HttpTransport, Transport};
use crate::config::LoaderConfig;
use crate::error::{LoadError, Result};
use crate::event::{DocumentReady, ListenerId, ReadyChannel};
use crate::native::Toolkit;
use crate::parser::{MarkupDocument, MarkupParser};
use crate::registry::StyleRegistry;
use crate::renderer::{apply_styles, Materializer, TagTable};
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc::{self, Receiver, Sender};
use std::sync::Arc;

/// 后台传输完成的结果
struct FetchOutcome {
    url: String,
    body: Result<String>,
}

/// 标记加载器
///
/// 持有工具包、样式登记表和就绪通道。所有构建工作都在调用方线程完成，
/// 只有按地址加载时的网络传输在后台线程进行。
pub struct MarkupLoader<T: Toolkit> {
    toolkit: T,
    registry: StyleRegistry,
    tags: TagTable,
    ready: ReadyChannel,
    accumulate_styles: bool,
    transport: Arc<dyn Transport>,
    sender: Sender<FetchOutcome>,
    receiver: Receiver<FetchOutcome>,
    in_flight: usize,
}

impl<T: Toolkit> MarkupLoader<T> {
    pub fn new(toolkit: T) -> Self {
        Self::with_config(toolkit, LoaderConfig::default())
    }

    pub fn with_config(toolkit: T, config: LoaderConfig) -> Self {
        let transport = Arc::new(HttpTransport::new(&config.user_agent));
        let (sender, receiver) = mpsc::channel();
        Self {
            toolkit,
            registry: StyleRegistry::new(),
            tags: TagTable::with_leaf_tags(config.leaf_tags.as_slice()),
            ready: ReadyChannel::new(),
            accumulate_styles: config.accumulate_styles,
            transport,
            sender,
            receiver,
            in_flight: 0,
        }
    }

    /// 替换传输层
    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    /// 同步解析文本并构建
    ///
    /// 解析失败时返回错误，不发送通知。
    pub fn load_from_string(&mut self, text: &str) -> Result<()> {
        let document = MarkupParser::parse(text)?;
        self.load_document(&document);
        Ok(())
    }

    /// 异步获取文档
    ///
    /// 传输在后台线程进行，完成后由 [`process_pending`](Self::process_pending)
    /// 或 [`wait_pending`](Self::wait_pending) 在当前线程继续构建。
    pub fn load_from_url(&mut self, url: &str) {
        let transport = Arc::clone(&self.transport);
        let sender = self.sender.clone();
        let url = url.to_string();

        log::debug!("fetching {}", url);
        self.in_flight += 1;
        std::thread::spawn(move || {
            // 每次加载恰好回送一个结果，传输层 panic 也不例外
            let body = panic::catch_unwind(AssertUnwindSafe(|| transport.fetch(&url))).unwrap_or_else(|_| {
                Err(LoadError::Fetch {
                    url: url.clone(),
                    message: "transport panicked".to_string(),
                })
            });
            // 加载器已经销毁时没有人接收结果
            let _ = sender.send(FetchOutcome { url, body });
        });
    }

    /// 处理已经完成的传输，不阻塞；返回成功构建的文档数
    pub fn process_pending(&mut self) -> usize {
        let mut built = 0;
        while let Ok(outcome) = self.receiver.try_recv() {
            built += usize::from(self.complete(outcome));
        }
        built
    }

    /// 阻塞直到所有进行中的传输完成并构建；返回成功构建的文档数
    pub fn wait_pending(&mut self) -> usize {
        let mut built = 0;
        while self.in_flight > 0 {
            match self.receiver.recv() {
                Ok(outcome) => built += usize::from(self.complete(outcome)),
                Err(_) => break,
            }
        }
        built
    }

    fn complete(&mut self, outcome: FetchOutcome) -> bool {
        self.in_flight -= 1;

        let document = outcome.body.and_then(|body| MarkupParser::parse(&body));
        match document {
            Ok(document) => {
                self.load_document(&document);
                true
            }
            Err(e) => {
                log::error!("dropping load of {}: {}", outcome.url, e);
                false
            }
        }
    }

    /// 对已解析的文档执行构建流程：物化根元素的子节点 → 应用样式 → 通知
    pub fn load_document(&mut self, document: &MarkupDocument) {
        if !self.accumulate_styles {
            self.registry.reset();
        }

        let root = self.toolkit.root();
        let stats = {
            let mut materializer = Materializer::new(&mut self.toolkit, &mut self.registry, &self.tags);
            materializer.materialize(document.root_element(), &root);
            materializer.stats()
        };
        let applied = apply_styles(&mut self.toolkit, &self.registry);

        log::info!(
            "document <{}> ready: {} widgets, {} new style rules ({} total), {} style applications",
            document.root_element().tag_name,
            stats.widgets,
            stats.style_rules,
            self.registry.len(),
            applied
        );
        self.ready.dispatch();
    }

    /// 重新应用登记表中的全部规则
    pub fn apply_styles(&mut self) -> usize {
        apply_styles(&mut self.toolkit, &self.registry)
    }

    pub fn add_listener<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&DocumentReady) + 'static,
    {
        self.ready.add_listener(callback)
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.ready.remove_listener(id)
    }

    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    pub fn registry(&self) -> &StyleRegistry {
        &self.registry
    }

    /// 尚未完成的按地址加载数
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }
}
