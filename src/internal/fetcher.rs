//! 网络领域模块：发起单段 Range 请求，返回状态码、声明长度与响应体字节流。

pub mod structs;
pub mod traits;
