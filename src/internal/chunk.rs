//! 分片领域模块：分片模型、部分内容检测结果与分片规划。

pub mod functions;
pub mod structs;
