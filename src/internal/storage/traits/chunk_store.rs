use std::path::PathBuf;

use async_trait::async_trait;

/// 分片临时文件的分配方。
///
/// 每个字节区间对应独立的文件，两个分片任务不会拿到同一个路径。
#[async_trait]
pub trait ChunkStore: Send + Sync {
    /// 为 `[start, end)` 区间创建（或清空）分片文件；无法创建时返回 `None`。
    async fn create_chunk_target(&self, start: u64, end: u64, url: &str) -> Option<PathBuf>;
}
