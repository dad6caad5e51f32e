use std::cmp;

use byteorder::{BigEndian, ByteOrder};

use crate::engine::lane_mask::LaneMask;
use crate::engine::stages::{LaneClass, LaneState};
use crate::engine::LANES;

const CHUNK: usize = 8;
const BLOCK: usize = 64;

/// Work done by one invocation of the byte stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BytesStats {
    pub lanes: usize,
    pub vector_iterations: usize,
    pub scalar_lanes: usize,
}

/// Lexicographic comparison of the byte lanes (strings, resolved symbols and
/// timestamps). The first unequal byte decides, otherwise the shorter operand
/// orders first.
///
/// All live byte lanes advance together in 8-byte chunks while more than
/// `threshold` of them are undecided. The first chunk is always compared
/// this way. Lanes left over after that are finished one at a time.
pub fn execute(state: &mut LaneState, threshold: usize) -> BytesStats {
    let lanes = state.live_of(LaneClass::Bytes);
    let mut stats = BytesStats { lanes: lanes.count(), ..BytesStats::default() };
    let mut min_len = [0usize; LANES];
    let mut by_len = [0i32; LANES];
    for lane in lanes.iter() {
        let (left, right) = (state.left[lane].len(), state.right[lane].len());
        min_len[lane] = cmp::min(left, right);
        by_len[lane] = left.cmp(&right) as i32;
        if min_len[lane] == 0 {
            state.resolve(lane, by_len[lane]);
        }
    }

    let mut pending = state.live_of(LaneClass::Bytes);
    let mut pos = 0;
    while !pending.is_empty() {
        let mut left = [0u64; LANES];
        let mut right = [0u64; LANES];
        for lane in pending.iter() {
            let n = cmp::min(min_len[lane] - pos, CHUNK);
            left[lane] = load_chunk(&state.left[lane][pos..pos + n]);
            right[lane] = load_chunk(&state.right[lane][pos..pos + n]);
        }
        stats.vector_iterations += 1;
        pos += CHUNK;

        for lane in pending.iter() {
            if left[lane] != right[lane] {
                state.resolve(lane, if left[lane] < right[lane] { -1 } else { 1 });
            } else if min_len[lane] <= pos {
                state.resolve(lane, by_len[lane]);
            }
        }
        pending &= state.live;

        if pending.count() <= threshold {
            if !pending.is_empty() {
                log::debug!(
                    "cmpv: {} byte lanes left after {} chunks, switching to scalar compare",
                    pending.count(),
                    stats.vector_iterations
                );
            }
            break;
        }
    }

    stats.scalar_lanes = pending.count();
    finish_scalar(state, pending, pos, &min_len, &by_len);
    stats
}

fn finish_scalar(state: &mut LaneState, lanes: LaneMask, pos: usize, min_len: &[usize; LANES], by_len: &[i32; LANES]) {
    for lane in lanes.iter() {
        let end = min_len[lane];
        let result = first_difference(&state.left[lane][pos..end], &state.right[lane][pos..end]).unwrap_or(by_len[lane]);
        state.resolve(lane, result);
    }
}

/// Big-endian load of up to 8 bytes, zero padded on the right.
#[inline]
fn load_chunk(bytes: &[u8]) -> u64 {
    let mut chunk = [0u8; CHUNK];
    chunk[..bytes.len()].copy_from_slice(bytes);
    BigEndian::read_u64(&chunk)
}

/// Difference of the first unequal bytes of two equally long slices.
fn first_difference(left: &[u8], right: &[u8]) -> Option<i32> {
    let mut left_blocks = left.chunks_exact(BLOCK);
    let mut right_blocks = right.chunks_exact(BLOCK);
    for (l, r) in (&mut left_blocks).zip(&mut right_blocks) {
        if l != r {
            return differing_byte(l, r);
        }
    }
    differing_byte(left_blocks.remainder(), right_blocks.remainder())
}

#[inline]
fn differing_byte(left: &[u8], right: &[u8]) -> Option<i32> {
    left.iter()
        .zip(right)
        .find(|(l, r)| l != r)
        .map(|(&l, &r)| l as i32 - r as i32)
}
