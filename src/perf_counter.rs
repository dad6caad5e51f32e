use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::engine::stages::bytes::BytesStats;

const ORDERING: Ordering = Ordering::Relaxed;

/// Lane counts per comparison stage, accumulated over all batches run by one
/// comparator.
#[derive(Debug, Default)]
pub struct PerfCounter {
    batches: AtomicU64,
    active_lanes: AtomicU64,
    output_lanes: AtomicU64,

    null_bool_lanes: AtomicU64,
    number_lanes: AtomicU64,
    bytes_lanes: AtomicU64,
    mismatch_lanes: AtomicU64,
    incomparable_lanes: AtomicU64,

    vector_iterations: AtomicU64,
    scalar_lanes: AtomicU64,
    unresolved_symbols: AtomicU64,
}

/// Lane counts of a single batch, added to the counters in one go.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub active: usize,
    pub output: usize,
    pub null_bool: usize,
    pub number: usize,
    pub mismatch: usize,
    pub incomparable: usize,
    pub unresolved_symbols: usize,
    pub bytes: BytesStats,
}

impl PerfCounter {
    pub fn new() -> PerfCounter {
        PerfCounter::default()
    }

    pub fn record(&self, stats: &BatchStats) {
        self.batches.fetch_add(1, ORDERING);
        self.active_lanes.fetch_add(stats.active as u64, ORDERING);
        self.output_lanes.fetch_add(stats.output as u64, ORDERING);
        self.null_bool_lanes.fetch_add(stats.null_bool as u64, ORDERING);
        self.number_lanes.fetch_add(stats.number as u64, ORDERING);
        self.bytes_lanes.fetch_add(stats.bytes.lanes as u64, ORDERING);
        self.mismatch_lanes.fetch_add(stats.mismatch as u64, ORDERING);
        self.incomparable_lanes.fetch_add(stats.incomparable as u64, ORDERING);
        self.vector_iterations.fetch_add(stats.bytes.vector_iterations as u64, ORDERING);
        self.scalar_lanes.fetch_add(stats.bytes.scalar_lanes as u64, ORDERING);
        self.unresolved_symbols.fetch_add(stats.unresolved_symbols as u64, ORDERING);
    }

    pub fn batches(&self) -> u64 {
        self.batches.load(ORDERING)
    }

    pub fn active_lanes(&self) -> u64 {
        self.active_lanes.load(ORDERING)
    }

    pub fn output_lanes(&self) -> u64 {
        self.output_lanes.load(ORDERING)
    }

    pub fn null_bool_lanes(&self) -> u64 {
        self.null_bool_lanes.load(ORDERING)
    }

    pub fn number_lanes(&self) -> u64 {
        self.number_lanes.load(ORDERING)
    }

    pub fn bytes_lanes(&self) -> u64 {
        self.bytes_lanes.load(ORDERING)
    }

    pub fn mismatch_lanes(&self) -> u64 {
        self.mismatch_lanes.load(ORDERING)
    }

    pub fn incomparable_lanes(&self) -> u64 {
        self.incomparable_lanes.load(ORDERING)
    }

    pub fn vector_iterations(&self) -> u64 {
        self.vector_iterations.load(ORDERING)
    }

    pub fn scalar_lanes(&self) -> u64 {
        self.scalar_lanes.load(ORDERING)
    }

    pub fn unresolved_symbols(&self) -> u64 {
        self.unresolved_symbols.load(ORDERING)
    }
}

impl fmt::Display for PerfCounter {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "batches:            {}", self.batches())?;
        writeln!(f, "active lanes:       {}", self.active_lanes())?;
        writeln!(f, "output lanes:       {}", self.output_lanes())?;
        writeln!(f, "  null/bool:        {}", self.null_bool_lanes())?;
        writeln!(f, "  number:           {}", self.number_lanes())?;
        writeln!(f, "  bytes:            {}", self.bytes_lanes())?;
        writeln!(f, "  type mismatch:    {}", self.mismatch_lanes())?;
        writeln!(f, "incomparable lanes: {}", self.incomparable_lanes())?;
        writeln!(f, "unresolved symbols: {}", self.unresolved_symbols())?;
        writeln!(f, "vector iterations:  {}", self.vector_iterations())?;
        write!(f, "scalar lanes:       {}", self.scalar_lanes())
    }
}
