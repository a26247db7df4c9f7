use async_trait::async_trait;

use crate::internal::chunk::structs::chunk::Chunk;
use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::fetcher::structs::chunk_response::ChunkResponse;

/// 分片请求方：对一个分片发起一次请求并返回响应。
///
/// 重定向、鉴权由实现方负责；传输层失败返回 `Request` 或 `Io`，由下载器按瞬时故障重试。
#[async_trait]
pub trait ChunkFetcher: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        chunk: &Chunk,
        total_chunks: usize,
    ) -> Result<ChunkResponse, DownloadError>;
}
