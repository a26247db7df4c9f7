pub mod cancellation_gate;
pub mod chunk_outcome;
pub mod concurrent_chunked_downloader;
pub mod download_error;
pub mod download_result;
pub mod downloader_config;

// 重导出公共类型
pub use cancellation_gate::CancellationGate;
pub use concurrent_chunked_downloader::{ConcurrentChunkedDownloader, DownloadEventStream};
pub use download_error::DownloadError;
pub use download_result::DownloadResult;
pub use downloader_config::DownloaderConfig;
