//! 分片任务内部事件：进度可以出现多次，成功/失败是终态且每个分片恰好一个。

use std::path::PathBuf;

use crate::internal::chunk::structs::chunk::Chunk;

use super::download_error::DownloadError;

/// 下载成功的分片：分片文件及其字节区间，交给组装阶段使用。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkSuccess {
    pub chunk_file: PathBuf,
    pub chunk: Chunk,
}

#[derive(Debug)]
pub enum ChunkOutcome {
    Progress {
        chunk_index: usize,
        downloaded: u64,
        chunk_size: u64,
    },
    Success(ChunkSuccess),
    Error(DownloadError),
}

impl From<Result<ChunkSuccess, DownloadError>> for ChunkOutcome {
    fn from(result: Result<ChunkSuccess, DownloadError>) -> Self {
        match result {
            Ok(success) => ChunkOutcome::Success(success),
            Err(e) => ChunkOutcome::Error(e),
        }
    }
}
