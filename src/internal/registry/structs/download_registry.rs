use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

use crate::internal::chunk::structs::chunk::Chunk;
use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::states::unlock_reactive::PropertyWatcher;

use super::active_download::ActiveDownload;
use super::cancelable_download::CancelableDownload;
use super::download_info::DownloadInfo;
use super::download_progress::DownloadProgress;
use super::download_state::DownloadState;

/// 活动下载登记表：按 URL 记录输出文件、请求的分片数、状态与整体进度。
///
/// 克隆只复制句柄，所有克隆共享同一张表。未登记的 URL 一律视为已取消。
#[derive(Debug, Clone, Default)]
pub struct DownloadRegistry {
    downloads: Arc<RwLock<HashMap<String, ActiveDownload>>>,
}

impl DownloadRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记一次下载并返回调用方用于停止/取消的句柄；同一 URL 的旧记录会被替换。
    pub fn register(
        &self,
        url: &str,
        output: impl Into<PathBuf>,
        chunks_count: usize,
    ) -> CancelableDownload {
        let entry = ActiveDownload::new(output.into(), chunks_count);
        if self.downloads.write().insert(url.to_string(), entry).is_some() {
            debug!(url, "替换已有的下载记录");
        }
        CancelableDownload::new(self.clone(), url)
    }

    pub fn get(&self, url: &str) -> Option<DownloadInfo> {
        let downloads = self.downloads.read();
        downloads.get(url).map(|d| DownloadInfo {
            url: url.to_string(),
            output: d.output.clone(),
            chunks_count: d.chunks_count,
            chunks: d.chunks.clone(),
            state: d.current_state(),
            progress: d.progress.get_or_default(),
            completed: d.completed,
        })
    }

    pub fn contains(&self, url: &str) -> bool {
        self.downloads.read().contains_key(url)
    }

    pub fn update_total_length(&self, url: &str, total_length: u64) {
        if let Some(d) = self.downloads.read().get(url) {
            let _ = d
                .progress
                .update_field(|p| p.total_length = Some(total_length));
        }
    }

    pub fn add_chunks(&self, url: &str, chunks: &[Chunk]) {
        if let Some(d) = self.downloads.write().get_mut(url) {
            d.chunks = chunks.to_vec();
        }
    }

    /// 写入全部分片累计的已下载字节数。
    pub fn update_downloaded(&self, url: &str, downloaded: u64) {
        if let Some(d) = self.downloads.read().get(url) {
            let _ = d.progress.update_field(|p| p.downloaded = downloaded);
        }
    }

    /// 累加 `bytes`。增量在属性锁内应用，多个分片并发累加时总数不会回退。
    pub fn add_downloaded(&self, url: &str, bytes: u64) {
        if let Some(d) = self.downloads.read().get(url) {
            let _ = d
                .progress
                .update_field(|p| p.downloaded = p.downloaded.saturating_add(bytes));
        }
    }

    /// 撤回一次失败尝试已计入的 `bytes`。
    pub fn rollback_downloaded(&self, url: &str, bytes: u64) {
        if let Some(d) = self.downloads.read().get(url) {
            let _ = d
                .progress
                .update_field(|p| p.downloaded = p.downloaded.saturating_sub(bytes));
        }
    }

    pub fn get_state(&self, url: &str) -> DownloadState {
        self.downloads
            .read()
            .get(url)
            .map(ActiveDownload::current_state)
            .unwrap_or(DownloadState::Canceled)
    }

    pub fn is_running(&self, url: &str) -> bool {
        self.get_state(url).is_running()
    }

    /// Running → Stopped；返回是否发生了迁移。
    pub fn stop(&self, url: &str) -> bool {
        let stopped = self
            .downloads
            .read()
            .get(url)
            .map(ActiveDownload::stop)
            .unwrap_or(false);
        if stopped {
            debug!(url, "下载已停止");
        }
        stopped
    }

    /// Running / Stopped → Canceled；返回是否发生了迁移。
    pub fn cancel(&self, url: &str) -> bool {
        let canceled = self
            .downloads
            .read()
            .get(url)
            .map(ActiveDownload::cancel)
            .unwrap_or(false);
        if canceled {
            debug!(url, "下载已取消");
        }
        canceled
    }

    /// 构造该 URL 的取消错误；未登记的 URL 以 `Canceled` 状态报告。
    pub fn cancellation_error(&self, url: &str) -> DownloadError {
        DownloadError::Cancelled {
            state: self.get_state(url),
            url: url.to_string(),
        }
    }

    pub fn mark_completed(&self, url: &str) {
        if let Some(d) = self.downloads.write().get_mut(url) {
            d.completed = true;
        }
    }

    pub fn remove(&self, url: &str) -> Option<DownloadInfo> {
        let info = self.get(url);
        self.downloads.write().remove(url);
        info
    }

    pub fn watch_state(&self, url: &str) -> Option<PropertyWatcher<DownloadState>> {
        self.downloads.read().get(url).map(|d| d.state.watch())
    }

    pub fn watch_progress(&self, url: &str) -> Option<PropertyWatcher<DownloadProgress>> {
        self.downloads.read().get(url).map(|d| d.progress.watch())
    }
}
