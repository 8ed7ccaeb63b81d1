//! 加载运行时

mod loader;
mod transport;

pub use loader::MarkupLoader;
pub use transport::{HttpTransport, Transport};
