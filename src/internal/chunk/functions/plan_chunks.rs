//! 分片规划：把文件总长度切成互不重叠、首尾相接的字节区间。

use crate::internal::chunk::structs::chunk::Chunk;
use crate::internal::downloader::structs::download_error::DownloadError;

/// 按最小分片大小收紧分片数：平均分片不小于 `min_chunk_size`，且每片至少 1 字节。
///
/// 结果至少为 1；调用方在规划前用它预先收紧请求的分片数。
pub fn clamp_chunk_count(total_length: u64, chunk_count: usize, min_chunk_size: u64) -> usize {
    let by_min_size = total_length / min_chunk_size.max(1);
    let upper = by_min_size.min(total_length).max(1);
    let upper = usize::try_from(upper).unwrap_or(usize::MAX);
    chunk_count.clamp(1, upper)
}

/// 生成分片计划。
///
/// - `chunk_count == 0` 视为调用方错误，返回 `PlanInvariant`；
/// - `chunk_count == 1`（或收紧后为 1）返回单个整文件分片，不读取长度；
/// - 其余情况各分片大小相差不超过 1 字节，余数分给末尾的分片。
pub fn plan_chunks(
    total_length: u64,
    chunk_count: usize,
    min_chunk_size: u64,
) -> Result<Vec<Chunk>, DownloadError> {
    if chunk_count < 1 {
        return Err(DownloadError::PlanInvariant(format!(
            "分片数小于 1: {chunk_count}"
        )));
    }
    if chunk_count == 1 {
        return Ok(vec![Chunk::whole_file()]);
    }

    let count = clamp_chunk_count(total_length, chunk_count, min_chunk_size);
    if count == 1 {
        return Ok(vec![Chunk::whole_file()]);
    }

    let count_u64 = count as u64;
    let base = total_length / count_u64;
    let remainder = total_length % count_u64;
    // 后 remainder 个分片各多 1 字节
    let first_larger = count_u64 - remainder;

    let mut chunks = Vec::with_capacity(count);
    let mut start = 0u64;
    for index in 0..count_u64 {
        let size = if index >= first_larger { base + 1 } else { base };
        let end = start + size;
        chunks.push(Chunk::range(start, end));
        start = end;
    }

    Ok(chunks)
}
