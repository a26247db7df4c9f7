use std::path::Path;
use std::time::Instant;

use tokio::io::AsyncWriteExt;
use tracing::{debug, error};

use crate::internal::downloader::structs::chunk_outcome::ChunkSuccess;
use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::download_result::DownloadResult;

use super::ConcurrentChunkedDownloader;

impl ConcurrentChunkedDownloader {
    /// 按起始偏移升序把分片文件拼接到 `output`（与完成顺序无关），
    /// 无论拼接成败都删除全部分片文件。
    pub(super) async fn write_chunks_to_output(
        &self,
        url: &str,
        mut successes: Vec<ChunkSuccess>,
        output: &Path,
        started_at: Instant,
    ) -> Result<DownloadResult, DownloadError> {
        successes.sort_by_key(|success| success.chunk.start());

        let copied = self.copy_chunks(&successes, output).await;
        self.delete_chunk_files(&successes).await;
        copied?;

        self.registry.mark_completed(url);
        let elapsed_ms = u64::try_from(started_at.elapsed().as_millis()).unwrap_or(u64::MAX);
        if self.config.verbose_logs {
            debug!(url, output = %output.display(), elapsed_ms, "分片拼接完成");
        }

        Ok(DownloadResult::Success {
            output: output.to_path_buf(),
            elapsed_ms,
        })
    }

    async fn copy_chunks(
        &self,
        successes: &[ChunkSuccess],
        output: &Path,
    ) -> Result<(), DownloadError> {
        if !self.file_store.exists(output).await {
            return Err(DownloadError::OutputMissing(output.to_path_buf()));
        }

        let mut sink = self.file_store.open_write(output).await?;
        for success in successes {
            if !self.file_store.exists(&success.chunk_file).await {
                return Err(DownloadError::ChunkMissing(success.chunk_file.clone()));
            }
            let mut source = self.file_store.open_read(&success.chunk_file).await?;
            tokio::io::copy(&mut source, &mut sink).await?;
        }
        sink.flush().await?;
        sink.shutdown().await?;
        Ok(())
    }

    pub(super) async fn delete_chunk_files(&self, successes: &[ChunkSuccess]) {
        for success in successes {
            self.delete_chunk_file(&success.chunk_file).await;
        }
    }

    pub(super) async fn delete_chunk_file(&self, chunk_file: &Path) {
        if !self.file_store.delete(chunk_file).await {
            error!(chunk_file = %chunk_file.display(), "分片文件删除失败");
        }
    }
}
