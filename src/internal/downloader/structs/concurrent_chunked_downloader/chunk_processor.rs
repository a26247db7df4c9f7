//! 单个分片的生命周期：请求、校验、写分片文件，瞬时故障重试，致命故障升级为整体取消。

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::internal::chunk::structs::chunk::Chunk;
use crate::internal::downloader::structs::cancellation_gate::CancellationGate;
use crate::internal::downloader::structs::chunk_outcome::{ChunkOutcome, ChunkSuccess};
use crate::internal::downloader::structs::download_error::DownloadError;

use super::ConcurrentChunkedDownloader;

/// 一个分片任务需要的全部上下文（形参超过 3 个，用 struct 承载）。
pub(super) struct ChunkTask {
    pub chunk: Chunk,
    pub chunk_index: usize,
    pub total_chunks: usize,
    pub gate: CancellationGate,
    pub outcomes: mpsc::UnboundedSender<ChunkOutcome>,
}

impl ChunkTask {
    pub fn url(&self) -> &str {
        self.gate.url()
    }

    pub fn progress(&self, downloaded: u64, chunk_size: u64) {
        let _ = self.outcomes.send(ChunkOutcome::Progress {
            chunk_index: self.chunk_index,
            downloaded,
            chunk_size,
        });
    }
}

impl ConcurrentChunkedDownloader {
    /// 把一个分片驱动到终态。只有瞬时故障会重试，且不超过 `max_attempts` 次。
    pub(super) async fn process_chunk(
        &self,
        task: &ChunkTask,
    ) -> Result<ChunkSuccess, DownloadError> {
        let max_attempts = self.config.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            let error = match self.pipe_chunk(task).await {
                Ok(success) => {
                    if self.config.verbose_logs {
                        debug!(
                            url = task.url(),
                            chunk_index = task.chunk_index,
                            chunk = %task.chunk,
                            attempt,
                            "分片下载成功"
                        );
                    }
                    return Ok(success);
                }
                Err(e) => self.classify_failure(task, e),
            };

            if !error.is_transient() || attempt >= max_attempts {
                debug!(
                    url = task.url(),
                    chunk_index = task.chunk_index,
                    chunk = %task.chunk,
                    attempt,
                    error = %error,
                    "分片下载失败"
                );
                return Err(error);
            }

            warn!(
                url = task.url(),
                chunk_index = task.chunk_index,
                chunk = %task.chunk,
                attempt,
                error = %error,
                "分片下载失败，准备重试"
            );
            let delay = self.config.retry_delay(attempt);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
            attempt += 1;
        }
    }

    /// 失败分类：
    /// - 下载已被停止/取消：报告取消；
    /// - 404 或大小不一致：无论分片数多少，取消整个下载；
    /// - 多分片下载中的非瞬时故障：取消整个下载，其余分片尽快退出；
    /// - 其余原样返回，由重试逻辑决定是否再试。
    fn classify_failure(&self, task: &ChunkTask, error: DownloadError) -> DownloadError {
        if error.is_cancellation() {
            return error;
        }

        let gate = &task.gate;
        if gate.is_stopped_or_canceled() {
            return gate.escalate();
        }

        let fatal_for_siblings = task.total_chunks > 1 && !error.is_transient();
        if error.cancels_whole_download() || fatal_for_siblings {
            warn!(
                url = task.url(),
                chunk_index = task.chunk_index,
                chunk = %task.chunk,
                error = %error,
                "分片致命失败，取消整个下载"
            );
            return gate.escalate();
        }

        error
    }

    /// 单次尝试：请求 → 校验响应 → 分配分片文件 → 流式写入。
    ///
    /// 写入阶段失败会删除分片文件，并撤回本次尝试计入累计字节数的部分。
    async fn pipe_chunk(&self, task: &ChunkTask) -> Result<ChunkSuccess, DownloadError> {
        task.gate.check()?;

        if task.chunk.is_whole_file() && task.total_chunks > 1 {
            return Err(DownloadError::PlanInvariant(format!(
                "整文件分片只能单独下载，当前分片数 = {}",
                task.total_chunks
            )));
        }

        let response = self
            .fetcher
            .fetch(task.url(), &task.chunk, task.total_chunks)
            .await?;

        if !response.is_success() {
            return Err(DownloadError::HttpStatus {
                code: response.status,
            });
        }

        let chunk_size = match response.content_length {
            Some(size) if size > 0 => size,
            other => return Err(DownloadError::UnknownSize { chunk_size: other }),
        };

        // 服务器忽略 Range 时会返回整文件，写进分片文件会破坏输出
        if let Some(expected) = task.chunk.len() {
            if expected != chunk_size {
                return Err(DownloadError::SizeMismatch {
                    expected,
                    actual: chunk_size,
                });
            }
        }

        if task.total_chunks == 1 {
            // 整文件下载只有拿到响应头才知道总长度
            self.registry.update_total_length(task.url(), chunk_size);
        }

        let start = task.chunk.start();
        let end = task.chunk.end().unwrap_or(start + chunk_size);
        let chunk_file = self
            .chunk_store
            .create_chunk_target(start, end, task.url())
            .await
            .ok_or(DownloadError::ChunkTargetUnavailable { start, end })?;

        let mut downloaded = 0u64;
        let piped = self
            .read_body_loop(task, response.body, &chunk_file, chunk_size, &mut downloaded)
            .await;

        match piped {
            Ok(()) => Ok(ChunkSuccess {
                chunk_file,
                chunk: task.chunk,
            }),
            Err(e) => {
                if downloaded > 0 {
                    self.registry.rollback_downloaded(task.url(), downloaded);
                }
                self.delete_chunk_file(&chunk_file).await;
                Err(e)
            }
        }
    }
}
