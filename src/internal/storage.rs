//! 存储领域模块：输出文件的读写删，以及按字节区间分配分片临时文件。

pub mod structs;
pub mod traits;
