//! 下载相关错误类型。

use std::path::PathBuf;

use thiserror::Error;

use crate::internal::registry::structs::download_state::DownloadState;

#[derive(Debug, Error)]
pub enum DownloadError {
    /// 下载被外部停止/取消，或因兄弟分片的致命错误被连带取消。从不重试。
    #[error("下载被取消 (state = {state}, url = {url})")]
    Cancelled { state: DownloadState, url: String },

    #[error("HTTP 状态码异常: {code}")]
    HttpStatus { code: u16 },

    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("I/O 失败: {0}")]
    Io(#[from] std::io::Error),

    /// 响应体长度未知或不为正。
    #[error("响应体大小未知: {chunk_size:?}")]
    UnknownSize { chunk_size: Option<u64> },

    /// 实际读取的字节数与声明的不一致，说明传输被截断或损坏。
    #[error("分片大小不一致: 声明 {expected}，实际 {actual}")]
    SizeMismatch { expected: u64, actual: u64 },

    #[error("无法创建分片文件: {start}..{end}")]
    ChunkTargetUnavailable { start: u64, end: u64 },

    #[error("输出文件不存在: {0}")]
    OutputMissing(PathBuf),

    #[error("分片文件不存在: {0}")]
    ChunkMissing(PathBuf),

    /// 下载地址无法解析为 URL，属于调用方错误，不重试。
    #[error("无效的 URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    /// 调用方传入了不合法的分片计划。
    #[error("分片计划不合法: {0}")]
    PlanInvariant(String),

    #[error("分片任务失败: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl DownloadError {
    /// 瞬时故障：网络或流读写的 I/O 问题，在重试上限内重试。
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            DownloadError::Request(_)
                | DownloadError::Io(_)
                | DownloadError::UnknownSize { .. }
                | DownloadError::ChunkTargetUnavailable { .. }
        )
    }

    pub fn is_cancellation(&self) -> bool {
        matches!(self, DownloadError::Cancelled { .. })
    }

    /// 无论分片数多少都要升级为整次下载取消的错误：404 与大小不一致。
    pub(crate) fn cancels_whole_download(&self) -> bool {
        matches!(
            self,
            DownloadError::HttpStatus { code: 404 } | DownloadError::SizeMismatch { .. }
        )
    }
}
