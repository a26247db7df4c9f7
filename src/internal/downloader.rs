//! 下载器领域模块：把一个远程文件切成多个分片并发下载，再按字节顺序组装成输出文件。
//!
//! 使用方式：`ConcurrentChunkedDownloader::new(registry).with_config(config).download(url, info, true)`，
//! 对外导出以 [`crate::downloader`] 为准。

pub mod structs;
