//! expense-bootstrap - 统一服务启动骨架
//!
//! 启动顺序：配置 → 运行时 → 存储 → gRPC 监听 → HTTP gateway

mod infrastructure;
mod metrics;
mod runtime;
mod shutdown;
mod starter;

pub use infrastructure::*;
pub use metrics::*;
pub use runtime::*;
pub use shutdown::*;
pub use starter::*;
