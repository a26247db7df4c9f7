/// 部分内容（Range）探测结果：服务器是否给出了文件总长度。
///
/// 长度未知时只能整文件下载，不允许多分片。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PartialContentInfo {
    pub length: Option<u64>,
}

impl PartialContentInfo {
    pub fn known(length: u64) -> Self {
        Self {
            length: Some(length),
        }
    }

    pub fn unknown() -> Self {
        Self { length: None }
    }

    pub fn could_determine_file_size(&self) -> bool {
        self.length.is_some()
    }
}
