//! 分片下载协调：分发、汇总、屏障。

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use tokio::sync::{mpsc, Semaphore};
use tracing::debug;

use crate::internal::chunk::structs::chunk::Chunk;
use crate::internal::chunk::structs::partial_content_info::PartialContentInfo;
use crate::internal::downloader::structs::cancellation_gate::CancellationGate;
use crate::internal::downloader::structs::chunk_outcome::{ChunkOutcome, ChunkSuccess};
use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::downloader::structs::download_result::DownloadResult;

use super::chunk_processor::ChunkTask;
use super::ConcurrentChunkedDownloader;

impl ConcurrentChunkedDownloader {
    /// 并发下载全部分片：进度事件即时转发给调用方，终态事件收齐后统一裁决，
    /// 全部成功才进入组装。
    pub(super) async fn download_internal(
        &self,
        url: &str,
        chunks: Vec<Chunk>,
        partial_content_info: PartialContentInfo,
        output: PathBuf,
        events: &mpsc::Sender<Result<DownloadResult, DownloadError>>,
    ) -> Result<DownloadResult, DownloadError> {
        if chunks.is_empty() {
            return Err(DownloadError::PlanInvariant("分片数必须 >= 1".to_string()));
        }
        if !partial_content_info.could_determine_file_size() && chunks.len() != 1 {
            return Err(DownloadError::PlanInvariant(format!(
                "文件大小未知时只能整文件下载，当前分片数 = {}",
                chunks.len()
            )));
        }

        let gate = CancellationGate::new(self.registry.clone(), url);
        gate.check()?;

        let total_chunks = chunks.len();
        if self.config.verbose_logs {
            debug!(url, total_chunks, length = ?partial_content_info.length, "分发分片");
        }
        let started_at = Instant::now();

        if let Some(length) = partial_content_info.length {
            self.registry.update_total_length(url, length);
        }
        self.registry.add_chunks(url, &chunks);

        let semaphore = Arc::new(Semaphore::new(self.config.max_concurrent_chunks.max(1)));
        let (outcomes, mut outcome_rx) = mpsc::unbounded_channel();

        let mut handles = Vec::with_capacity(total_chunks);
        for (chunk_index, chunk) in chunks.into_iter().enumerate() {
            let task = ChunkTask {
                chunk,
                chunk_index,
                total_chunks,
                gate: gate.clone(),
                outcomes: outcomes.clone(),
            };
            let this = self.clone();
            let semaphore = semaphore.clone();

            handles.push(tokio::spawn(async move {
                let result = match semaphore.acquire_owned().await {
                    Ok(_permit) => this.process_chunk(&task).await,
                    Err(_) => Err(task.gate.cancellation()),
                };
                let _ = task.outcomes.send(ChunkOutcome::from(result));
            }));
        }
        // 只剩分片任务持有发送端，全部结束后接收端自然关闭
        drop(outcomes);

        let mut terminals: Vec<Result<ChunkSuccess, DownloadError>> =
            Vec::with_capacity(total_chunks);
        while let Some(outcome) = outcome_rx.recv().await {
            match outcome {
                ChunkOutcome::Progress {
                    chunk_index,
                    downloaded,
                    chunk_size,
                } => {
                    let _ = events
                        .send(Ok(DownloadResult::Progress {
                            chunk_index,
                            downloaded,
                            chunk_size,
                        }))
                        .await;
                }
                ChunkOutcome::Success(success) => terminals.push(Ok(success)),
                // 多分片下载的非瞬时故障已由分片任务升级为取消，这里只剩瞬时故障与取消
                ChunkOutcome::Error(e) => terminals.push(Err(e)),
            }
        }

        for handle in handles {
            if let Err(e) = handle.await {
                terminals.push(Err(DownloadError::TaskJoin(e)));
            }
        }

        let successes = self
            .resolve_terminal_events(&gate, terminals, total_chunks)
            .await?;
        self.write_chunks_to_output(url, successes, &output, started_at)
            .await
    }

    /// 屏障裁决：取消优先，否则取收集顺序中的第一个错误；任何失败都会先删除
    /// 已成功分片的分片文件。
    async fn resolve_terminal_events(
        &self,
        gate: &CancellationGate,
        terminals: Vec<Result<ChunkSuccess, DownloadError>>,
        total_chunks: usize,
    ) -> Result<Vec<ChunkSuccess>, DownloadError> {
        if terminals.is_empty() {
            return Err(gate.cancellation());
        }

        let mut successes = Vec::with_capacity(terminals.len());
        let mut cancellation = None;
        let mut first_error = None;
        for terminal in terminals {
            match terminal {
                Ok(success) => successes.push(success),
                Err(e) if e.is_cancellation() => {
                    cancellation.get_or_insert(e);
                }
                Err(e) => {
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(error) = cancellation.or(first_error) {
            self.delete_chunk_files(&successes).await;
            return Err(error);
        }

        if successes.len() != total_chunks {
            self.delete_chunk_files(&successes).await;
            return Err(gate.cancellation());
        }

        Ok(successes)
    }
}
