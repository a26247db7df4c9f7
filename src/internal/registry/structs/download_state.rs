use std::fmt;

/// 下载状态（由登记表维护，下载核心只读并在观察到停止/取消时确认迁移）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DownloadState {
    Running,
    /// 调用方暂停（本库不支持跨进程续传，停止即结束本次下载）
    Stopped,
    Canceled,
}

impl DownloadState {
    pub fn is_running(&self) -> bool {
        matches!(self, DownloadState::Running)
    }

    pub fn is_stopped_or_canceled(&self) -> bool {
        !self.is_running()
    }
}

impl fmt::Display for DownloadState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DownloadState::Running => "running",
            DownloadState::Stopped => "stopped",
            DownloadState::Canceled => "canceled",
        };
        f.write_str(name)
    }
}
