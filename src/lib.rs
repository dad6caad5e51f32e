#[macro_use]
mod errors;
pub mod bitvec;
pub mod comparator;
pub mod engine;
pub mod ion;
pub mod perf_counter;
pub mod value;

pub use crate::comparator::{cmpv, Options, UnknownSymbols, ValueComparator};
pub use crate::engine::batch::{LaneBatch, ValueLanes, ValueRef};
pub use crate::engine::cmpv::CompareOutput;
pub use crate::engine::column::{Column, ColumnComparison};
pub use crate::engine::lane_mask::LaneMask;
pub use crate::engine::policy::{ComparePolicy, PolicyEntry, PolicyTable};
pub use crate::engine::symbols::SymbolTable;
pub use crate::engine::LANES;
pub use crate::errors::CompareError;
pub use crate::ion::{IonType, ValueBuffer};
pub use crate::value::{Timestamp, Val};

pub type CompareResult<T> = Result<T, CompareError>;
