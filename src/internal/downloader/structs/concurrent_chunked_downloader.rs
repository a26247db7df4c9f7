//! 并发分片下载器
//!
//! 把一个远程文件按字节区间切成多个分片，每个分片一个任务并发下载到独立的分片文件，
//! 全部分片结束后按起始偏移升序拼接到输出文件。
//!
//! ## 功能特性
//!
//! - **分片并发**：每个分片一个 tokio 任务，由信号量限制同时下载的分片数
//! - **分片重试**：网络/流读写等瞬时故障在单个分片内重试，不影响其他分片
//! - **协作式取消**：分片在每轮读循环检查登记表状态与共享取消标志
//! - **连带取消**：多分片下载中任一分片致命失败，其余分片尽快退出
//! - **事件流**：调用方拿到 `Start → Progress* → Success` 的流，失败以唯一的 `Err` 结束
//! - **不泄漏分片文件**：无论成功、失败还是取消，本次下载的分片文件都会被删除
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use chunked_downloader::chunk::PartialContentInfo;
//! # use chunked_downloader::downloader::{ConcurrentChunkedDownloader, DownloadResult};
//! # use chunked_downloader::registry::DownloadRegistry;
//! # use futures_util::StreamExt;
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = DownloadRegistry::new();
//! let url = "https://example.com/large.bin";
//! tokio::fs::File::create("large.bin").await?;
//! let handle = registry.register(url, "large.bin", 4);
//!
//! let downloader = ConcurrentChunkedDownloader::new(registry.clone()).max_concurrent_chunks(4);
//! let mut events = downloader.download(url, PartialContentInfo::known(30_000_000), true);
//! while let Some(event) = events.next().await {
//!     match event? {
//!         DownloadResult::Start { chunk_count } => println!("分片数 {chunk_count}"),
//!         DownloadResult::Progress { chunk_index, downloaded, chunk_size } => {
//!             println!("分片 {chunk_index}: {downloaded}/{chunk_size}")
//!         }
//!         DownloadResult::Success { output, elapsed_ms } => {
//!             println!("已保存到 {} ({elapsed_ms}ms)", output.display())
//!         }
//!     }
//! }
//! # let _ = handle;
//! # Ok(())
//! # }
//! ```
//!
//! ## 内部实现说明
//!
//! - `coordinator`：分发分片、汇总事件、在全部终态到齐后决定成功或失败
//! - `chunk_processor`：单个分片的请求、校验、重试与失败分类
//! - `read_body_loop`：流式读取响应体写入分片文件并上报进度
//! - `assembler`：按字节顺序拼接分片文件并清理

mod assembler;
mod chunk_processor;
mod coordinator;
mod read_body_loop;

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::{debug, error};

use crate::internal::chunk::functions::plan_chunks::plan_chunks;
use crate::internal::chunk::structs::chunk::Chunk;
use crate::internal::chunk::structs::partial_content_info::PartialContentInfo;
use crate::internal::fetcher::structs::reqwest_chunk_fetcher::ReqwestChunkFetcher;
use crate::internal::fetcher::traits::chunk_fetcher::ChunkFetcher;
use crate::internal::registry::structs::download_registry::DownloadRegistry;
use crate::internal::storage::structs::cache_dir_chunk_store::CacheDirChunkStore;
use crate::internal::storage::structs::local_file_store::LocalFileStore;
use crate::internal::storage::traits::chunk_store::ChunkStore;
use crate::internal::storage::traits::file_store::FileStore;

use super::download_error::DownloadError;
use super::download_result::DownloadResult;
use super::downloader_config::DownloaderConfig;

/// 调用方事件通道容量；满了之后协调任务等待调用方消费，分片任务不受影响。
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// 单次下载的事件流。
pub type DownloadEventStream = ReceiverStream<Result<DownloadResult, DownloadError>>;

/// 并发分片下载器。克隆只复制句柄，可在多个下载之间共享。
#[derive(Clone)]
pub struct ConcurrentChunkedDownloader {
    pub(crate) fetcher: Arc<dyn ChunkFetcher>,
    pub(crate) file_store: Arc<dyn FileStore>,
    pub(crate) chunk_store: Arc<dyn ChunkStore>,
    pub(crate) registry: DownloadRegistry,
    pub(crate) config: DownloaderConfig,
}

impl ConcurrentChunkedDownloader {
    /// 使用默认协作方：reqwest 请求、本地文件存储、系统缓存目录下的分片文件。
    pub fn new(registry: DownloadRegistry) -> Self {
        Self {
            fetcher: Arc::new(ReqwestChunkFetcher::default()),
            file_store: Arc::new(LocalFileStore::new()),
            chunk_store: Arc::new(CacheDirChunkStore::in_system_cache()),
            registry,
            config: DownloaderConfig::default(),
        }
    }

    pub fn with_fetcher(mut self, fetcher: impl ChunkFetcher + 'static) -> Self {
        self.fetcher = Arc::new(fetcher);
        self
    }

    pub fn with_file_store(mut self, file_store: impl FileStore + 'static) -> Self {
        self.file_store = Arc::new(file_store);
        self
    }

    pub fn with_chunk_store(mut self, chunk_store: impl ChunkStore + 'static) -> Self {
        self.chunk_store = Arc::new(chunk_store);
        self
    }

    pub fn with_config(mut self, config: DownloaderConfig) -> Self {
        self.config = config;
        self
    }

    /// 设置最小分片大小（字节）
    pub fn min_chunk_size(mut self, min_chunk_size: u64) -> Self {
        self.config.min_chunk_size = min_chunk_size;
        self
    }

    /// 设置最大并发分片数
    pub fn max_concurrent_chunks(mut self, n: usize) -> Self {
        self.config.max_concurrent_chunks = n;
        self
    }

    /// 设置单个分片的最大尝试次数
    pub fn max_attempts(mut self, n: usize) -> Self {
        self.config.max_attempts = n;
        self
    }

    /// 设置重试延迟（毫秒）
    pub fn retry_delay_ms(mut self, delay_ms: u64) -> Self {
        self.config.retry_delay_ms = delay_ms;
        self
    }

    pub fn verbose_logs(mut self, verbose: bool) -> Self {
        self.config.verbose_logs = verbose;
        self
    }

    pub fn config(&self) -> &DownloaderConfig {
        &self.config
    }

    pub fn registry(&self) -> &DownloadRegistry {
        &self.registry
    }

    /// 下载一个已在登记表中登记的 URL。
    ///
    /// 输出文件与请求的分片数取自登记表；`chunked` 为 `false` 或文件长度未知时整文件下载，
    /// 否则按最小分片大小收紧分片数后规划。未登记的 URL 以取消错误结束。
    ///
    /// 必须在 tokio 运行时内调用。
    pub fn download(
        &self,
        url: &str,
        partial_content_info: PartialContentInfo,
        chunked: bool,
    ) -> DownloadEventStream {
        let Some(download) = self.registry.get(url) else {
            return failed_stream(self.registry.cancellation_error(url));
        };

        let chunks = match partial_content_info.length {
            Some(length) if chunked && download.chunks_count > 1 => {
                match plan_chunks(length, download.chunks_count, self.config.min_chunk_size) {
                    Ok(chunks) => chunks,
                    Err(e) => return failed_stream(e),
                }
            }
            _ => vec![Chunk::whole_file()],
        };

        self.download_chunks(url, chunks, partial_content_info, download.output)
    }

    /// 按给定的分片计划下载到 `output`。
    ///
    /// `output` 必须事先存在，否则流以 `OutputMissing` 结束且不会发出 `Start`。
    ///
    /// 必须在 tokio 运行时内调用。
    pub fn download_chunks(
        &self,
        url: &str,
        chunks: Vec<Chunk>,
        partial_content_info: PartialContentInfo,
        output: PathBuf,
    ) -> DownloadEventStream {
        let (events, receiver) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        let this = self.clone();
        let url = url.to_string();

        tokio::spawn(async move {
            if !this.file_store.exists(&output).await {
                let _ = events.send(Err(DownloadError::OutputMissing(output))).await;
                return;
            }

            let _ = events
                .send(Ok(DownloadResult::Start {
                    chunk_count: chunks.len(),
                }))
                .await;
            debug!(url = %url, "开始下载");

            match this
                .download_internal(&url, chunks, partial_content_info, output, &events)
                .await
            {
                Ok(success) => {
                    debug!(url = %url, "下载完成");
                    let _ = events.send(Ok(success)).await;
                }
                Err(e) => {
                    error!(url = %url, error = %e, "下载失败");
                    let _ = events.send(Err(e)).await;
                }
            }
        });

        ReceiverStream::new(receiver)
    }
}

/// 只含一个错误的事件流。
fn failed_stream(error: DownloadError) -> DownloadEventStream {
    let (events, receiver) = mpsc::channel(1);
    let _ = events.try_send(Err(error));
    ReceiverStream::new(receiver)
}

/// 协作方为 trait 对象，只打印配置。
impl fmt::Debug for ConcurrentChunkedDownloader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentChunkedDownloader")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
