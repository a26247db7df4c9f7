use std::fmt;

/// 下载分片：远程文件中一段连续的字节区间。
///
/// `Range` 为半开区间 `[start, end)`；`WholeFile` 表示不分片、不带 Range 头的整文件下载，
/// 只在分片数为 1 或文件大小未知时出现。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Chunk {
    WholeFile,
    Range { start: u64, end: u64 },
}

impl Chunk {
    pub fn whole_file() -> Self {
        Chunk::WholeFile
    }

    pub fn range(start: u64, end: u64) -> Self {
        Chunk::Range { start, end }
    }

    pub fn is_whole_file(&self) -> bool {
        matches!(self, Chunk::WholeFile)
    }

    /// 起始偏移；整文件分片从 0 开始。组装时按它升序写入。
    pub fn start(&self) -> u64 {
        match self {
            Chunk::WholeFile => 0,
            Chunk::Range { start, .. } => *start,
        }
    }

    /// 不含上界的结束偏移；整文件分片未知。
    pub fn end(&self) -> Option<u64> {
        match self {
            Chunk::WholeFile => None,
            Chunk::Range { end, .. } => Some(*end),
        }
    }

    pub fn len(&self) -> Option<u64> {
        self.end().map(|end| end.saturating_sub(self.start()))
    }
}

impl fmt::Display for Chunk {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chunk::WholeFile => f.write_str("whole-file"),
            Chunk::Range { start, end } => write!(f, "{start}..{end}"),
        }
    }
}
