use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs::{self, File};
use tracing::warn;

use crate::internal::storage::traits::chunk_store::ChunkStore;

/// 缓存目录下的分片文件分配器。
///
/// 文件名为 `{sha256(url)}_{start}_{end}.chunk`，同一 URL 的不同区间互不冲突；
/// 旧的同名文件会被清空。
#[derive(Debug, Clone)]
pub struct CacheDirChunkStore {
    dir: PathBuf,
}

impl CacheDirChunkStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }

    /// 使用系统缓存目录下的 `chunked_downloader/chunks`，取不到时退回临时目录。
    pub fn in_system_cache() -> Self {
        let base = dirs::cache_dir().unwrap_or_else(std::env::temp_dir);
        Self::new(base.join("chunked_downloader").join("chunks"))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 计算某个区间对应的分片文件路径（不创建文件）。
    pub fn chunk_path(&self, start: u64, end: u64, url: &str) -> PathBuf {
        let mut hasher = Sha256::new();
        hasher.update(url.as_bytes());
        let url_hash = format!("{:x}", hasher.finalize());
        self.dir.join(format!("{url_hash}_{start}_{end}.chunk"))
    }
}

#[async_trait]
impl ChunkStore for CacheDirChunkStore {
    async fn create_chunk_target(&self, start: u64, end: u64, url: &str) -> Option<PathBuf> {
        if let Err(e) = fs::create_dir_all(&self.dir).await {
            warn!(dir = %self.dir.display(), error = %e, "创建分片目录失败");
            return None;
        }

        let path = self.chunk_path(start, end, url);
        match File::create(&path).await {
            Ok(_) => Some(path),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "创建分片文件失败");
                None
            }
        }
    }
}
