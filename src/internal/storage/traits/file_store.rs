//! 文件存储抽象：下载核心只通过它访问输出文件与分片文件。

use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};

/// 只读字节流句柄。
pub type ByteStream = Box<dyn AsyncRead + Send + Unpin>;

/// 可写字节流句柄；写入从文件开头开始，覆盖原有内容。
pub type ByteSink = Box<dyn AsyncWrite + Send + Unpin>;

#[async_trait]
pub trait FileStore: Send + Sync {
    async fn exists(&self, path: &Path) -> bool;

    async fn open_read(&self, path: &Path) -> io::Result<ByteStream>;

    async fn open_write(&self, path: &Path) -> io::Result<ByteSink>;

    /// 删除文件；文件不存在或删除失败时返回 `false`，由调用方决定是否记录。
    async fn delete(&self, path: &Path) -> bool;
}
