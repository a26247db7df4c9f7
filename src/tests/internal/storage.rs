//! 存储协作方测试：分片文件命名与创建、本地文件读写删除。

use tokio::io::{AsyncReadExt, AsyncWriteExt};

use crate::storage::{CacheDirChunkStore, ChunkStore, FileStore, LocalFileStore};

const URL: &str = "https://files.example.com/archive.bin";

#[test]
fn chunk_paths_are_unique_per_range_and_url() {
    let store = CacheDirChunkStore::new("/tmp/chunks");

    let a = store.chunk_path(0, 100, URL);
    let b = store.chunk_path(100, 200, URL);
    let c = store.chunk_path(0, 100, "https://files.example.com/other.bin");

    assert_ne!(a, b);
    assert_ne!(a, c);
    assert_eq!(a, store.chunk_path(0, 100, URL), "同一区间的路径应稳定");
    assert!(a.starts_with("/tmp/chunks"));

    let name = a.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.ends_with("_0_100.chunk"), "文件名: {name}");
    // sha256 十六进制 64 位
    assert_eq!(name.split('_').next().unwrap().len(), 64);
}

#[tokio::test]
async fn create_chunk_target_creates_dir_and_truncates() {
    let dir = tempfile::tempdir().unwrap();
    let store = CacheDirChunkStore::new(dir.path().join("nested").join("chunks"));

    let path = store
        .create_chunk_target(0, 10, URL)
        .await
        .expect("应能创建分片文件");
    assert!(path.is_file());
    assert_eq!(path, store.chunk_path(0, 10, URL));

    std::fs::write(&path, b"stale data").unwrap();
    let again = store.create_chunk_target(0, 10, URL).await.unwrap();
    assert_eq!(again, path);
    assert_eq!(std::fs::metadata(&path).unwrap().len(), 0, "旧内容应被清空");
}

#[tokio::test]
async fn create_chunk_target_returns_none_when_dir_is_a_file() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("blocker");
    std::fs::write(&blocker, b"x").unwrap();

    let store = CacheDirChunkStore::new(&blocker);
    assert!(store.create_chunk_target(0, 10, URL).await.is_none());
}

#[tokio::test]
async fn local_file_store_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("file.bin");
    let store = LocalFileStore::new();

    assert!(!store.exists(&path).await);
    assert!(!store.exists(dir.path()).await, "目录不算文件");

    let mut sink = store.open_write(&path).await.unwrap();
    sink.write_all(b"hello chunked world").await.unwrap();
    sink.shutdown().await.unwrap();
    assert!(store.exists(&path).await);

    // 重新打开写入会覆盖旧内容
    let mut sink = store.open_write(&path).await.unwrap();
    sink.write_all(b"short").await.unwrap();
    sink.shutdown().await.unwrap();

    let mut content = String::new();
    store
        .open_read(&path)
        .await
        .unwrap()
        .read_to_string(&mut content)
        .await
        .unwrap();
    assert_eq!(content, "short");

    assert!(store.delete(&path).await);
    assert!(!store.delete(&path).await, "文件不存在时删除返回 false");
    assert!(store.open_read(&path).await.is_err());
}
