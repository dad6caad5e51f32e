use std::cmp::Ordering;

use crate::bitvec::{bitmap_with_rows, BitVec, BitVecMut};
use crate::comparator::ValueComparator;
use crate::engine::batch::{LaneBatch, ValueRef};
use crate::engine::policy::PolicyTable;
use crate::engine::symbols::SymbolTable;
use crate::engine::LANES;
use crate::errors::CompareError;
use crate::ion::ValueBuffer;

/// A sequence of values over one buffer.
#[derive(Debug, Clone, Copy)]
pub struct Column<'a> {
    buf: &'a [u8],
    values: &'a [ValueRef],
}

impl<'a> Column<'a> {
    pub fn new(buf: &'a [u8], values: &'a [ValueRef]) -> Column<'a> {
        Column { buf, values }
    }

    pub fn len(&self) -> usize { self.values.len() }
    pub fn is_empty(&self) -> bool { self.values.is_empty() }
    pub fn buf(&self) -> &'a [u8] { self.buf }
    pub fn values(&self) -> &'a [ValueRef] { self.values }
}

impl<'a> From<&'a ValueBuffer> for Column<'a> {
    fn from(buffer: &'a ValueBuffer) -> Column<'a> {
        Column::new(buffer.bytes(), buffer.values())
    }
}

/// Row by row results of comparing two columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnComparison {
    /// -1, 0 or 1 per row, 0 for rows without a result.
    pub results: Vec<i8>,
    /// Bit per row, set if the row has a result.
    pub present: Vec<u8>,
}

impl ColumnComparison {
    pub fn get(&self, row: usize) -> Option<i8> {
        if row < self.results.len() && self.present.is_set(row) {
            Some(self.results[row])
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

/// Compares two equally long columns row by row, `LANES` rows per batch.
pub fn compare_columns(
    comparator: &ValueComparator,
    left: Column,
    right: Column,
    table: &PolicyTable,
    symbols: &SymbolTable,
) -> Result<ColumnComparison, CompareError> {
    ensure!(
        left.len() == right.len(),
        CompareError::InvalidArgument,
        "columns differ in length: {} vs {}",
        left.len(),
        right.len()
    );
    let rows = left.len();
    let mut results = Vec::with_capacity(rows);
    let mut present = bitmap_with_rows(rows);
    for (chunk, (l, r)) in left.values.chunks(LANES).zip(right.values.chunks(LANES)).enumerate() {
        let mut batch = LaneBatch::new(left.buf, right.buf);
        for (&lv, &rv) in l.iter().zip(r) {
            batch.push(lv, rv)?;
        }
        let output = comparator.compare(&batch, table, symbols)?;
        for lane in 0..l.len() {
            results.push(output.results[lane] as i8);
            if output.result(lane).is_some() {
                present.set(chunk * LANES + lane);
            }
        }
    }
    Ok(ColumnComparison { results, present })
}

/// Row indices of `values` in sorted order.
///
/// The sort is stable. Values that do not compare even to themselves
/// (containers, decimals, unknown symbols) follow all others in their
/// original order, both ascending and descending.
pub fn sort_indices(
    comparator: &ValueComparator,
    values: Column,
    table: &PolicyTable,
    symbols: &SymbolTable,
    descending: bool,
) -> Result<Vec<usize>, CompareError> {
    if !table.is_sort() {
        bail!(CompareError::UnsortablePolicy, table.name());
    }
    let sortable = compare_columns(comparator, values, values, table, symbols)?;
    let (mut sorted, unsortable): (Vec<usize>, Vec<usize>) =
        (0..values.len()).partition(|&row| sortable.get(row).is_some());

    let mut error = None;
    sorted.sort_by(|&a, &b| {
        if error.is_some() {
            return Ordering::Equal;
        }
        match compare_rows(comparator, values, a, b, table, symbols) {
            Ok(ordering) if descending => ordering.reverse(),
            Ok(ordering) => ordering,
            Err(err) => {
                error = Some(err);
                Ordering::Equal
            }
        }
    });
    if let Some(err) = error {
        return Err(err);
    }
    sorted.extend(unsortable);
    Ok(sorted)
}

fn compare_rows(
    comparator: &ValueComparator,
    values: Column,
    a: usize,
    b: usize,
    table: &PolicyTable,
    symbols: &SymbolTable,
) -> Result<Ordering, CompareError> {
    let mut batch = LaneBatch::new(values.buf, values.buf);
    batch.push(values.values[a], values.values[b])?;
    let output = comparator.compare(&batch, table, symbols)?;
    Ok(output.ordering(0).unwrap_or(Ordering::Equal))
}
