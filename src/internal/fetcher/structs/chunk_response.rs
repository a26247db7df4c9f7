use std::fmt;
use std::io;

use bytes::Bytes;
use futures_util::stream::BoxStream;

/// 响应体字节流；读取错误统一为 I/O 错误，视为可重试的瞬时故障。
pub type BodyStream = BoxStream<'static, io::Result<Bytes>>;

/// 单段请求的响应：状态码、声明的响应体长度与响应体。
pub struct ChunkResponse {
    pub status: u16,
    pub content_length: Option<u64>,
    pub body: BodyStream,
}

impl ChunkResponse {
    pub fn new(status: u16, content_length: Option<u64>, body: BodyStream) -> Self {
        Self {
            status,
            content_length,
            body,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl fmt::Debug for ChunkResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChunkResponse")
            .field("status", &self.status)
            .field("content_length", &self.content_length)
            .field("body", &"<stream>")
            .finish()
    }
}
