use super::download_registry::DownloadRegistry;
use super::download_state::DownloadState;

/// 调用方持有的下载控制句柄，由 [`DownloadRegistry::register`] 返回。
///
/// 停止与取消都是协作式的：分片任务在下一次读循环时观察到并退出。
#[derive(Debug, Clone)]
pub struct CancelableDownload {
    registry: DownloadRegistry,
    url: String,
}

impl CancelableDownload {
    pub(crate) fn new(registry: DownloadRegistry, url: &str) -> Self {
        Self {
            registry,
            url: url.to_string(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn stop(&self) -> bool {
        self.registry.stop(&self.url)
    }

    pub fn cancel(&self) -> bool {
        self.registry.cancel(&self.url)
    }

    pub fn state(&self) -> DownloadState {
        self.registry.get_state(&self.url)
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }
}
