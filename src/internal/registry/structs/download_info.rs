use std::path::PathBuf;

use crate::internal::chunk::structs::chunk::Chunk;

use super::download_progress::DownloadProgress;
use super::download_state::DownloadState;

/// 登记表记录的只读快照。
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadInfo {
    pub url: String,
    pub output: PathBuf,
    pub chunks_count: usize,
    pub chunks: Vec<Chunk>,
    pub state: DownloadState,
    pub progress: DownloadProgress,
    pub completed: bool,
}
