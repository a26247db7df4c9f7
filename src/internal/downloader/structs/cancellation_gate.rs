use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::debug;

use crate::internal::registry::structs::download_registry::DownloadRegistry;
use crate::internal::registry::structs::download_state::DownloadState;

use super::download_error::DownloadError;

/// 单次下载的协作式取消闸门。
///
/// 同时观察两个信号：登记表中该 URL 的状态（外部停止/取消），
/// 以及本次下载所有分片共享的 `canceled` 标志（兄弟分片的致命错误）。
#[derive(Debug, Clone)]
pub struct CancellationGate {
    url: String,
    registry: DownloadRegistry,
    canceled: Arc<AtomicBool>,
}

impl CancellationGate {
    pub fn new(registry: DownloadRegistry, url: &str) -> Self {
        Self {
            url: url.to_string(),
            registry,
            canceled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn current_state(&self) -> DownloadState {
        self.registry.get_state(&self.url)
    }

    pub fn is_stopped_or_canceled(&self) -> bool {
        self.current_state().is_stopped_or_canceled()
    }

    /// 兄弟分片是否已请求连带取消。只要求最终可见，不参与内存序同步。
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::Relaxed)
    }

    /// 读循环每一轮调用：任一信号为真时返回取消错误。
    pub fn check(&self) -> Result<(), DownloadError> {
        if self.is_canceled() || self.is_stopped_or_canceled() {
            return Err(self.cancellation());
        }
        Ok(())
    }

    /// 构造取消错误，并让登记表确认与观察到的状态一致的迁移（幂等）。
    ///
    /// 仍为 Running 却被要求取消，只可能来自共享标志，此时按取消处理。
    pub fn cancellation(&self) -> DownloadError {
        match self.current_state() {
            DownloadState::Stopped => {
                self.registry.stop(&self.url);
            }
            DownloadState::Canceled | DownloadState::Running => {
                self.registry.cancel(&self.url);
            }
        }
        self.registry.cancellation_error(&self.url)
    }

    /// 把一个分片的致命错误升级为整次下载的取消：先迁移登记表，再置共享标志，
    /// 兄弟分片因此读到的状态一定是 Canceled。
    pub fn escalate(&self) -> DownloadError {
        if self.current_state().is_running() {
            self.registry.cancel(&self.url);
        }
        if !self.canceled.swap(true, Ordering::Relaxed) {
            debug!(url = %self.url, "分片致命失败，取消其余分片");
        }
        self.cancellation()
    }
}
