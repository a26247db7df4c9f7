//! 分片下载：流式读取响应体——写分片文件、累计字节数、按比例上报进度、检查取消。

use std::path::Path;

use tokio::io::{AsyncReadExt, AsyncWriteExt, BufWriter};
use tokio_util::io::StreamReader;
use tracing::error;

use crate::internal::downloader::structs::download_error::DownloadError;
use crate::internal::fetcher::structs::chunk_response::BodyStream;

use super::chunk_processor::ChunkTask;
use super::ConcurrentChunkedDownloader;

impl ConcurrentChunkedDownloader {
    /// 每读一块先检查取消，再写入分片文件并累加登记表中的整体进度；
    /// 本分片累计字节每跨过 `chunk_size / progress_steps` 上报一次进度。
    ///
    /// `downloaded` 由调用方持有，失败时据此撤回累计字节数。
    pub(super) async fn read_body_loop(
        &self,
        task: &ChunkTask,
        body: BodyStream,
        chunk_file: &Path,
        chunk_size: u64,
        downloaded: &mut u64,
    ) -> Result<(), DownloadError> {
        let mut sink = BufWriter::new(self.file_store.open_write(chunk_file).await?);
        let mut source = StreamReader::new(body);
        let mut buffer = vec![0u8; self.config.buffer_size.max(1)];

        let notify_size = chunk_size / self.config.progress_steps.max(1);
        let mut notify_total = 0u64;

        loop {
            task.gate.check()?;

            let read = source.read(&mut buffer).await?;
            if read == 0 {
                break;
            }
            sink.write_all(&buffer[..read]).await?;

            let read = read as u64;
            *downloaded += read;
            self.registry.add_downloaded(task.url(), read);

            if *downloaded >= notify_total + notify_size {
                notify_total = *downloaded;
                task.progress(*downloaded, chunk_size);
            }
        }

        sink.flush().await?;
        sink.shutdown().await?;

        // 保证每个分片都能观察到 100%
        task.progress(chunk_size, chunk_size);

        if *downloaded != chunk_size {
            error!(
                url = task.url(),
                chunk_index = task.chunk_index,
                downloaded = *downloaded,
                chunk_size,
                "分片实际大小与声明不一致"
            );
            return Err(DownloadError::SizeMismatch {
                expected: chunk_size,
                actual: *downloaded,
            });
        }

        Ok(())
    }
}
