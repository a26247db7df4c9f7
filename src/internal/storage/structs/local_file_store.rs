use std::io;
use std::path::Path;

use async_trait::async_trait;
use tokio::fs::{self, File, OpenOptions};

use crate::internal::storage::traits::file_store::{ByteSink, ByteStream, FileStore};

/// 基于 `tokio::fs` 的本地文件存储。
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFileStore;

impl LocalFileStore {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileStore for LocalFileStore {
    async fn exists(&self, path: &Path) -> bool {
        fs::metadata(path).await.map(|m| m.is_file()).unwrap_or(false)
    }

    async fn open_read(&self, path: &Path) -> io::Result<ByteStream> {
        let file = File::open(path).await?;
        Ok(Box::new(file))
    }

    async fn open_write(&self, path: &Path) -> io::Result<ByteSink> {
        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(path)
            .await?;
        Ok(Box::new(file))
    }

    async fn delete(&self, path: &Path) -> bool {
        fs::remove_file(path).await.is_ok()
    }
}
