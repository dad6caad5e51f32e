pub mod batch;
pub mod cmpv;
pub mod column;
pub mod immediate;
pub mod lane_mask;
pub mod policy;
pub mod stages;
pub mod symbols;

/// Number of lanes processed by one invocation of the comparator.
pub const LANES: usize = 16;
