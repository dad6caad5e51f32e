//! Stages of the value comparator. Each stage resolves the lanes of one
//! class and removes them from the live mask, the orchestrator in
//! `engine::cmpv` runs them in order.
pub mod bytes;
pub mod classify;
pub mod null_bool;
pub mod numeric;
pub mod symbolize;

use crate::bitvec::BitVecMut;
use crate::engine::batch::LaneBatch;
use crate::engine::lane_mask::LaneMask;
use crate::engine::LANES;

/// Comparison route of a lane, decided by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LaneClass {
    Inactive,
    NullBool,
    Number,
    Bytes,
    /// Comparable types of different rank, ordered by rank difference under
    /// sorting policies.
    Mismatch,
    Incomparable,
}

/// Per-lane working state shared by all stages of one invocation.
pub struct LaneState<'a> {
    pub left_tlv: [u8; LANES],
    pub right_tlv: [u8; LANES],
    pub class: [LaneClass; LANES],
    pub left: [&'a [u8]; LANES],
    pub right: [&'a [u8]; LANES],
    pub results: [i32; LANES],
    /// Lanes whose result is not determined yet.
    pub live: LaneMask,
    /// Lanes that produce a defined result.
    pub output: LaneMask,
}

impl<'a> LaneState<'a> {
    pub fn new(batch: &LaneBatch<'a>) -> LaneState<'a> {
        let mut state = LaneState {
            left_tlv: [0; LANES],
            right_tlv: [0; LANES],
            class: [LaneClass::Inactive; LANES],
            left: [&[][..]; LANES],
            right: [&[][..]; LANES],
            results: [0; LANES],
            live: batch.active(),
            output: batch.active(),
        };
        for lane in batch.active().iter() {
            state.left_tlv[lane] = batch.left().get(lane).tlv;
            state.right_tlv[lane] = batch.right().get(lane).tlv;
            state.left[lane] = batch.left().content(lane);
            state.right[lane] = batch.right().content(lane);
        }
        state
    }

    /// Live lanes routed to `class`.
    pub fn live_of(&self, class: LaneClass) -> LaneMask {
        self.live.iter().filter(|&lane| self.class[lane] == class).collect()
    }

    #[inline]
    pub fn resolve(&mut self, lane: usize, result: i32) {
        self.results[lane] = result;
        self.live.unset(lane);
    }

    /// Removes a lane from the output, its result stays undefined.
    #[inline]
    pub fn exclude(&mut self, lane: usize) {
        self.class[lane] = LaneClass::Incomparable;
        self.results[lane] = 0;
        self.live.unset(lane);
        self.output.unset(lane);
    }

    /// Replaces the live mask, which may only ever shrink.
    pub fn narrow(&mut self, live: LaneMask) {
        debug_assert!(live.is_subset_of(self.live), "live mask widened: {} -> {}", self.live, live);
        self.live = live;
    }
}
