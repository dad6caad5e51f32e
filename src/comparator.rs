use std::fmt;
use std::str::FromStr;

use crate::engine::batch::{LaneBatch, ValueLanes};
use crate::engine::cmpv::{self as kernel, CompareOutput};
use crate::engine::column::{self, Column, ColumnComparison};
use crate::engine::immediate;
use crate::engine::lane_mask::LaneMask;
use crate::engine::policy::PolicyTable;
use crate::engine::symbols::SymbolTable;
use crate::errors::CompareError;
use crate::perf_counter::PerfCounter;

/// What to do with a symbol id that is not in the symbol table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnknownSymbols {
    /// The lane leaves the output mask.
    Incomparable,
    /// The whole batch fails with `CompareError::SymbolOutOfRange`.
    Fail,
}

impl Default for UnknownSymbols {
    fn default() -> UnknownSymbols {
        UnknownSymbols::Incomparable
    }
}

impl fmt::Display for UnknownSymbols {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            UnknownSymbols::Incomparable => write!(f, "incomparable"),
            UnknownSymbols::Fail => write!(f, "fail"),
        }
    }
}

impl FromStr for UnknownSymbols {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<UnknownSymbols, CompareError> {
        match s {
            "incomparable" | "skip" => Ok(UnknownSymbols::Incomparable),
            "fail" => Ok(UnknownSymbols::Fail),
            _ => Err(CompareError::InvalidArgument(format!("unknown symbol handling `{}`", s))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Options {
    /// Byte lanes still undecided after a chunk are finished one lane at a
    /// time once there are no more than this many of them.
    pub scalar_lane_threshold: usize,
    pub unknown_symbols: UnknownSymbols,
    pub collect_perf: bool,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            scalar_lane_threshold: 4,
            unknown_symbols: UnknownSymbols::Incomparable,
            collect_perf: true,
        }
    }
}

/// Entry point for comparing values, holds options and perf counters
/// shared by all batches it runs.
#[derive(Debug, Default)]
pub struct ValueComparator {
    options: Options,
    perf: PerfCounter,
}

impl ValueComparator {
    pub fn new(options: Options) -> ValueComparator {
        log::debug!("cmpv: {:?}", options);
        ValueComparator { options, perf: PerfCounter::new() }
    }

    /// Compares the active lanes of `batch` under `policy`.
    pub fn compare<P: AsRef<PolicyTable>>(
        &self,
        batch: &LaneBatch,
        policy: P,
        symbols: &SymbolTable,
    ) -> Result<CompareOutput, CompareError> {
        let (output, stats) = kernel::execute(batch, policy.as_ref(), symbols, &self.options)?;
        if self.options.collect_perf {
            self.perf.record(&stats);
        }
        Ok(output)
    }

    /// `cmpv.i64@imm`: compares each numeric lane against `imm`.
    pub fn compare_i64_imm(&self, values: &ValueLanes, active: LaneMask, imm: i64) -> CompareOutput {
        immediate::compare_i64_imm(values, active, imm)
    }

    /// `cmpv.f64@imm`: compares each numeric lane against `imm`.
    pub fn compare_f64_imm(&self, values: &ValueLanes, active: LaneMask, imm: f64) -> CompareOutput {
        immediate::compare_f64_imm(values, active, imm)
    }

    /// Compares two columns row by row, see `engine::column::compare_columns`.
    pub fn compare_columns<'l, 'r, P: AsRef<PolicyTable>>(
        &self,
        left: impl Into<Column<'l>>,
        right: impl Into<Column<'r>>,
        policy: P,
        symbols: &SymbolTable,
    ) -> Result<ColumnComparison, CompareError> {
        column::compare_columns(self, left.into(), right.into(), policy.as_ref(), symbols)
    }

    /// Sorted row order of a column, see `engine::column::sort_indices`.
    pub fn sort_indices<'a, P: AsRef<PolicyTable>>(
        &self,
        values: impl Into<Column<'a>>,
        policy: P,
        symbols: &SymbolTable,
        descending: bool,
    ) -> Result<Vec<usize>, CompareError> {
        column::sort_indices(self, values.into(), policy.as_ref(), symbols, descending)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn perf_counter(&self) -> &PerfCounter {
        &self.perf
    }
}

/// Compares one batch with default options and no perf counters.
pub fn cmpv<P: AsRef<PolicyTable>>(
    batch: &LaneBatch,
    policy: P,
    symbols: &SymbolTable,
) -> Result<CompareOutput, CompareError> {
    let options = Options { collect_perf: false, ..Options::default() };
    kernel::execute(batch, policy.as_ref(), symbols, &options).map(|(output, _)| output)
}
