use std::path::PathBuf;

/// 下载事件流中的一项。
///
/// 顺序保证：先 `Start`，之后任意多个 `Progress`（不同分片之间交错、无序），最后 `Success`。
/// 失败不作为事件值出现，而是以流中唯一的 `Err` 结束。
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadResult {
    Start {
        chunk_count: usize,
    },
    Progress {
        chunk_index: usize,
        downloaded: u64,
        chunk_size: u64,
    },
    Success {
        output: PathBuf,
        /// 从开始分发分片到组装完成的耗时（毫秒）
        elapsed_ms: u64,
    },
}

impl DownloadResult {
    pub fn is_terminal(&self) -> bool {
        matches!(self, DownloadResult::Success { .. })
    }
}
