use std::time::Duration;

use serde::Deserialize;

/// 默认最小分片大小：1MB
pub const DEFAULT_MIN_CHUNK_SIZE: u64 = 1024 * 1024;

/// 默认同时下载的分片数上限
pub const DEFAULT_MAX_CONCURRENT_CHUNKS: usize = 4;

/// 默认单个分片的最大尝试次数（含首次）
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// 默认重试延迟（毫秒），按尝试次数线性增长
pub const DEFAULT_RETRY_DELAY_MS: u64 = 250;

/// 默认重试延迟上限（毫秒）
pub const DEFAULT_MAX_RETRY_DELAY_MS: u64 = 2000;

/// 默认读缓冲大小：8KB
pub const DEFAULT_BUFFER_SIZE: usize = 8 * 1024;

/// 默认每个分片上报进度的次数（每 10% 一次）
pub const DEFAULT_PROGRESS_STEPS: u64 = 10;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DownloaderConfig {
    /// 分片规划的下限：平均分片不小于该值
    pub min_chunk_size: u64,
    /// 最大并发分片数
    pub max_concurrent_chunks: usize,
    /// 单个分片的最大尝试次数，仅对瞬时 I/O 故障重试
    pub max_attempts: usize,
    /// 重试延迟（毫秒）
    pub retry_delay_ms: u64,
    /// 重试延迟上限（毫秒）
    pub max_retry_delay_ms: u64,
    /// 每次读取响应体的字节数
    pub buffer_size: usize,
    /// 每个分片上报进度的次数
    pub progress_steps: u64,
    /// 打印每个分片的详细日志
    pub verbose_logs: bool,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            min_chunk_size: DEFAULT_MIN_CHUNK_SIZE,
            max_concurrent_chunks: DEFAULT_MAX_CONCURRENT_CHUNKS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_delay_ms: DEFAULT_RETRY_DELAY_MS,
            max_retry_delay_ms: DEFAULT_MAX_RETRY_DELAY_MS,
            buffer_size: DEFAULT_BUFFER_SIZE,
            progress_steps: DEFAULT_PROGRESS_STEPS,
            verbose_logs: false,
        }
    }
}

impl DownloaderConfig {
    /// 第 `attempt` 次失败后的等待时间（attempt 从 1 开始）。
    pub fn retry_delay(&self, attempt: usize) -> Duration {
        let delay = self
            .retry_delay_ms
            .saturating_mul(attempt as u64)
            .min(self.max_retry_delay_ms);
        Duration::from_millis(delay)
    }
}
