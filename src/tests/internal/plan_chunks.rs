//! 分片规划测试：典型切分、收紧分片数、非法输入，以及覆盖性质的属性测试。

use proptest::prelude::*;

use crate::chunk::{clamp_chunk_count, plan_chunks, Chunk};
use crate::downloader::DownloadError;
use crate::fetcher::range_header;

#[test]
fn splits_thirty_megabytes_into_three_ranges() {
    let chunks = plan_chunks(30_000_000, 3, 1).unwrap();
    assert_eq!(
        chunks,
        vec![
            Chunk::range(0, 10_000_000),
            Chunk::range(10_000_000, 20_000_000),
            Chunk::range(20_000_000, 30_000_000),
        ]
    );
    assert_eq!(range_header(0, 10_000_000), "bytes=0-9999999");
    assert_eq!(range_header(20_000_000, 30_000_000), "bytes=20000000-29999999");
}

#[test]
fn remainder_goes_to_trailing_chunks() {
    let chunks = plan_chunks(10, 3, 1).unwrap();
    assert_eq!(
        chunks,
        vec![Chunk::range(0, 3), Chunk::range(3, 6), Chunk::range(6, 10)]
    );
}

#[test]
fn single_chunk_is_whole_file() {
    assert_eq!(plan_chunks(30_000_000, 1, 1).unwrap(), vec![Chunk::WholeFile]);
}

#[test]
fn zero_chunks_is_invariant_violation() {
    let result = plan_chunks(100, 0, 1);
    assert!(matches!(result, Err(DownloadError::PlanInvariant(_))));
}

#[test]
fn min_chunk_size_clamps_count() {
    const MIB: u64 = 1024 * 1024;
    assert_eq!(clamp_chunk_count(3 * MIB, 8, MIB), 3);
    assert_eq!(plan_chunks(3 * MIB, 8, MIB).unwrap().len(), 3);

    // 不足一个最小分片时退化为整文件
    assert_eq!(clamp_chunk_count(MIB / 2, 4, MIB), 1);
    assert_eq!(plan_chunks(MIB / 2, 4, MIB).unwrap(), vec![Chunk::WholeFile]);
}

#[test]
fn never_more_chunks_than_bytes() {
    assert_eq!(clamp_chunk_count(5, 10, 1), 5);
    let chunks = plan_chunks(5, 10, 1).unwrap();
    assert_eq!(chunks.len(), 5);
    assert!(chunks.iter().all(|c| c.len() == Some(1)));
}

#[test]
fn empty_file_is_whole_file() {
    assert_eq!(plan_chunks(0, 4, 1).unwrap(), vec![Chunk::WholeFile]);
}

proptest! {
    #[test]
    fn ranges_cover_file_without_gaps(
        total in 1u64..50_000_000,
        count in 1usize..64,
        min in 1u64..2_000_000,
    ) {
        let chunks = plan_chunks(total, count, min).unwrap();
        let expected = if count == 1 { 1 } else { clamp_chunk_count(total, count, min) };

        if expected == 1 {
            prop_assert_eq!(chunks, vec![Chunk::WholeFile]);
            return Ok(());
        }

        prop_assert_eq!(chunks.len(), expected);
        prop_assert_eq!(chunks[0].start(), 0);
        prop_assert_eq!(chunks[chunks.len() - 1].end(), Some(total));

        let base = total / expected as u64;
        for pair in chunks.windows(2) {
            prop_assert_eq!(pair[0].end(), Some(pair[1].start()));
        }
        for chunk in &chunks {
            let len = chunk.len().unwrap();
            prop_assert!(len == base || len == base + 1);
            prop_assert!(len >= 1);
        }
    }
}
