//! 事件系统 - 文档就绪通知

/// 文档构建完成并已应用样式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentReady;

/// 监听器 ID，用于取消订阅
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// `DocumentReady` 的发布/订阅通道
pub struct ReadyChannel {
    listeners: Vec<(ListenerId, Box<dyn FnMut(&DocumentReady)>)>,
    next_id: u64,
}

impl ReadyChannel {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
            next_id: 1,
        }
    }

    pub fn add_listener<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&DocumentReady) + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(callback)));
        id
    }

    /// 移除监听器，ID 不存在时返回 `false`
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(l, _)| *l != id);
        self.listeners.len() != before
    }

    /// 按订阅顺序通知全部监听器
    pub fn dispatch(&mut self) {
        for (_, callback) in &mut self.listeners {
            callback(&DocumentReady);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for ReadyChannel {
    fn default() -> Self {
        Self::new()
    }
}
