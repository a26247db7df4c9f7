//! 基于 reqwest 的分片请求实现。

use std::io;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::RANGE;
use reqwest::Client;
use tracing::trace;
use url::Url;

use crate::internal::chunk::structs::chunk::Chunk;
use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::fetcher::structs::chunk_response::ChunkResponse;
use crate::internal::fetcher::traits::chunk_fetcher::ChunkFetcher;

/// 生成单个 Range 请求头：`bytes=start-(end-1)`，end 为不含上界。
pub fn range_header(start: u64, end: u64) -> String {
    let end_inclusive = end.saturating_sub(1);
    format!("bytes={}-{}", start, end_inclusive)
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestChunkFetcher {
    client: Client,
}

impl ReqwestChunkFetcher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ChunkFetcher for ReqwestChunkFetcher {
    async fn fetch(
        &self,
        url: &str,
        chunk: &Chunk,
        total_chunks: usize,
    ) -> Result<ChunkResponse, DownloadError> {
        let parsed = Url::parse(url).map_err(|e| DownloadError::InvalidUrl {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let mut request = self.client.get(parsed);
        match chunk {
            Chunk::Range { start, end } => {
                request = request.header(RANGE, range_header(*start, *end));
            }
            Chunk::WholeFile if total_chunks > 1 => {
                return Err(DownloadError::PlanInvariant(format!(
                    "整文件分片只能单独下载，当前分片数 = {total_chunks}"
                )));
            }
            Chunk::WholeFile => {}
        }

        trace!(url, %chunk, total_chunks, "发起分片请求");
        let resp = request.send().await?;
        let status = resp.status().as_u16();
        let content_length = resp.content_length();
        let body = resp
            .bytes_stream()
            .map(|item| item.map_err(io::Error::other))
            .boxed();

        Ok(ChunkResponse::new(status, content_length, body))
    }
}
