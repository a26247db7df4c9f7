//! 登记表领域模块：按 URL 记录活动下载的输出文件、分片、状态与进度。
//!
//! 下载核心只读取状态并在观察到停止/取消时做一次对应迁移，状态的发起方是调用者。

pub mod structs;
