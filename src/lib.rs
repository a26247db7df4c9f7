/// 内部实现模块
mod internal;


/// 分片模型与分片规划
pub mod chunk {
    use crate::internal;
    pub use internal::chunk::functions::plan_chunks::*;
    pub use internal::chunk::structs::chunk::Chunk;
    pub use internal::chunk::structs::partial_content_info::PartialContentInfo;
}

/// 存储协作方：输出文件与分片临时文件的访问能力
pub mod storage {
    use crate::internal;
    pub use internal::storage::structs::cache_dir_chunk_store::CacheDirChunkStore;
    pub use internal::storage::structs::local_file_store::LocalFileStore;
    pub use internal::storage::traits::chunk_store::ChunkStore;
    pub use internal::storage::traits::file_store::{ByteSink, ByteStream, FileStore};
}

/// 网络协作方：单段 Range 请求
pub mod fetcher {
    use crate::internal;
    pub use internal::fetcher::structs::chunk_response::{BodyStream, ChunkResponse};
    pub use internal::fetcher::structs::reqwest_chunk_fetcher::{range_header, ReqwestChunkFetcher};
    pub use internal::fetcher::traits::chunk_fetcher::ChunkFetcher;
}

/// 下载登记表：按 URL 记录下载状态、进度与取消请求
pub mod registry {
    use crate::internal;
    pub use internal::registry::structs::cancelable_download::CancelableDownload;
    pub use internal::registry::structs::download_info::DownloadInfo;
    pub use internal::registry::structs::download_progress::DownloadProgress;
    pub use internal::registry::structs::download_registry::DownloadRegistry;
    pub use internal::registry::structs::download_state::DownloadState;
}

/// 并发分片下载器
pub mod downloader {
    use crate::internal;
    pub use internal::downloader::structs::*;
}

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}
