use std::path::PathBuf;

use crate::internal::chunk::structs::chunk::Chunk;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::download_progress::DownloadProgress;
use super::download_state::DownloadState;

/// 登记表中的一条活动下载记录。
#[derive(Debug)]
pub(crate) struct ActiveDownload {
    pub(crate) output: PathBuf,
    /// 调用方请求的分片数
    pub(crate) chunks_count: usize,
    /// 实际规划出的分片
    pub(crate) chunks: Vec<Chunk>,
    pub(crate) completed: bool,
    pub(crate) state: UnlockReactiveProperty<DownloadState>,
    pub(crate) progress: UnlockReactiveProperty<DownloadProgress>,
}

impl ActiveDownload {
    pub(crate) fn new(output: PathBuf, chunks_count: usize) -> Self {
        Self {
            output,
            chunks_count: chunks_count.max(1),
            chunks: Vec::new(),
            completed: false,
            state: UnlockReactiveProperty::new(DownloadState::Running),
            progress: UnlockReactiveProperty::new(DownloadProgress::default()),
        }
    }

    pub(crate) fn current_state(&self) -> DownloadState {
        self.state.get_current().unwrap_or(DownloadState::Canceled)
    }

    /// 只允许 Running → Stopped；已停止或已取消时不做任何事。
    pub(crate) fn stop(&self) -> bool {
        self.state
            .replace_if(|s| s.is_running().then_some(DownloadState::Stopped))
            .unwrap_or(false)
    }

    /// Running / Stopped → Canceled；已取消时不做任何事。
    pub(crate) fn cancel(&self) -> bool {
        self.state
            .replace_if(|s| (*s != DownloadState::Canceled).then_some(DownloadState::Canceled))
            .unwrap_or(false)
    }
}

impl Drop for ActiveDownload {
    fn drop(&mut self) {
        self.state.destroy();
        self.progress.destroy();
    }
}
