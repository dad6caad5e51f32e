use std::cmp::Ordering;
use std::fmt;

use crate::bitvec::BitVec;
use crate::comparator::Options;
use crate::engine::batch::LaneBatch;
use crate::engine::lane_mask::LaneMask;
use crate::engine::policy::PolicyTable;
use crate::engine::stages::{bytes, classify, null_bool, numeric, symbolize, LaneClass, LaneState};
use crate::engine::symbols::SymbolTable;
use crate::engine::LANES;
use crate::errors::CompareError;
use crate::perf_counter::BatchStats;

/// Per-lane results of one comparison.
///
/// `results[lane]` is -1, 0 or 1 for lanes in `mask` and 0 everywhere else.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct CompareOutput {
    pub results: [i32; LANES],
    pub mask: LaneMask,
}

impl CompareOutput {
    pub fn empty() -> CompareOutput {
        CompareOutput { results: [0; LANES], mask: LaneMask::EMPTY }
    }

    /// Result of `lane`, `None` if the lane produced no defined result.
    pub fn result(&self, lane: usize) -> Option<i32> {
        if lane < LANES && self.mask.is_set(lane) {
            Some(self.results[lane])
        } else {
            None
        }
    }

    pub fn ordering(&self, lane: usize) -> Option<Ordering> {
        self.result(lane).map(|r| r.cmp(&0))
    }
}

impl fmt::Debug for CompareOutput {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let mut list = f.debug_list();
        for lane in 0..LANES {
            match self.result(lane) {
                Some(r) => list.entry(&r),
                None => list.entry(&format_args!("_")),
            };
        }
        list.finish()
    }
}

/// Runs all stages over one batch.
///
/// Every stage only ever removes lanes from the live mask, and the output
/// mask only ever shrinks from the active mask.
pub(crate) fn execute(
    batch: &LaneBatch,
    table: &PolicyTable,
    symbols: &SymbolTable,
    options: &Options,
) -> Result<(CompareOutput, BatchStats), CompareError> {
    let mut state = LaneState::new(batch);
    let mut stats = BatchStats { active: batch.active().count(), ..BatchStats::default() };
    log::trace!("cmpv[{}]: {} active lanes {}", table.name(), stats.active, batch.active());

    let mut live = state.live;
    stats.incomparable = classify::execute(&mut state, table);
    stats.mismatch = state.output.iter().filter(|&lane| state.class[lane] == LaneClass::Mismatch).count();
    check_narrowed(&mut live, &state, "classify");

    stats.null_bool = null_bool::execute(&mut state);
    check_narrowed(&mut live, &state, "null/bool");

    let number = state.live_of(LaneClass::Number).count();
    let resolved = numeric::execute(&mut state);
    stats.number = resolved;
    stats.incomparable += number - resolved;
    check_narrowed(&mut live, &state, "numeric");

    let unresolved = symbolize::execute(&mut state, symbols, options.unknown_symbols)?;
    stats.unresolved_symbols = unresolved;
    stats.incomparable += unresolved;
    check_narrowed(&mut live, &state, "symbolize");

    stats.bytes = bytes::execute(&mut state, options.scalar_lane_threshold);
    check_narrowed(&mut live, &state, "bytes");
    debug_assert!(state.live.is_empty(), "lanes left unresolved: {}", state.live);
    debug_assert!(state.output.is_subset_of(batch.active()));

    let mut output = CompareOutput { results: [0; LANES], mask: state.output };
    for lane in state.output.iter() {
        output.results[lane] = state.results[lane].signum();
    }
    stats.output = output.mask.count();
    Ok((output, stats))
}

fn check_narrowed(previous: &mut LaneMask, state: &LaneState, stage: &str) {
    debug_assert!(
        state.live.is_subset_of(*previous),
        "live mask widened by {}: {} -> {}",
        stage,
        previous,
        state.live
    );
    log::trace!("cmpv: {} live lanes after {}", state.live.count(), stage);
    *previous = state.live;
}
