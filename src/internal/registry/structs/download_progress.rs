/// 整体下载进度：响应式状态，记录全部分片累计下载的字节数与文件总长度。
///
/// 调用方通过登记表的 `watch_progress()` 读取或监听；进度比例可用 [`DownloadProgress::pct`] 获取。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DownloadProgress {
    /// 全部分片累计已下载的字节数
    pub downloaded: u64,
    /// 文件总长度（字节）；单分片下载在收到响应头之前未知，为 `None`
    pub total_length: Option<u64>,
}

impl DownloadProgress {
    /// 进度百分比（0～100）；总长度为 0 或未知时返回 `f64::NAN`。
    pub fn pct(&self) -> f64 {
        self.total_length
            .filter(|&t| t > 0)
            .map(|t| (self.downloaded as f64 / t as f64) * 100.0)
            .unwrap_or(f64::NAN)
    }
}
