//! Graceful Shutdown

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;

/// Shutdown 控制器
///
/// 触发后，之前和之后创建的等待 future 都会完成。
#[derive(Clone)]
pub struct ShutdownController {
    tx: Arc<watch::Sender<bool>>,
}

impl ShutdownController {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// 触发关闭
    pub fn shutdown(&self) {
        if !self.tx.send_replace(true) {
            info!("Triggering shutdown");
        }
    }

    /// 创建一个可以等待关闭的 future
    pub fn signal(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut rx = self.tx.subscribe();
        async move {
            let _ = rx.wait_for(|stopped| *stopped).await;
        }
    }
}

impl Default for ShutdownController {
    fn default() -> Self {
        Self::new()
    }
}
