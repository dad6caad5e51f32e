use std::fmt;

use crate::bitvec::BitVecMut;
use crate::engine::lane_mask::LaneMask;
use crate::engine::LANES;
use crate::errors::CompareError;
use crate::ion::IonType;

/// Location of one encoded value inside a buffer.
///
/// `base` is the position of the type descriptor byte, `offset` and `len`
/// delimit the content bytes that follow the header.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ValueRef {
    pub base: u32,
    pub offset: u32,
    pub len: u32,
    pub tlv: u8,
}

impl ValueRef {
    pub fn new(base: u32, offset: u32, len: u32, tlv: u8) -> ValueRef {
        ValueRef { base, offset, len, tlv }
    }

    #[inline]
    pub fn ion_type(&self) -> IonType {
        IonType::of(self.tlv)
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.offset as usize + self.len as usize
    }

    #[inline]
    pub fn content<'a>(&self, buf: &'a [u8]) -> &'a [u8] {
        &buf[self.offset as usize..self.end()]
    }

    fn validate(&self, lane: usize, buf: &[u8]) -> Result<(), CompareError> {
        if self.end() > buf.len() || self.base > self.offset {
            return Err(CompareError::OutOfBounds {
                lane,
                offset: self.offset as usize,
                end: self.end(),
                buffer_len: buf.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Debug for ValueRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}[{}+{}] (0x{:02x})", self.ion_type(), self.base, self.offset, self.len, self.tlv)
    }
}

/// One side of a batch: up to `LANES` values over a shared buffer.
#[derive(Clone)]
pub struct ValueLanes<'a> {
    buf: &'a [u8],
    values: [ValueRef; LANES],
    len: usize,
}

impl<'a> ValueLanes<'a> {
    pub fn new(buf: &'a [u8]) -> ValueLanes<'a> {
        ValueLanes { buf, values: [ValueRef::default(); LANES], len: 0 }
    }

    pub fn from_slice(buf: &'a [u8], values: &[ValueRef]) -> Result<ValueLanes<'a>, CompareError> {
        let mut lanes = ValueLanes::new(buf);
        for value in values {
            lanes.push(*value)?;
        }
        Ok(lanes)
    }

    /// Appends a value and returns its lane index.
    pub fn push(&mut self, value: ValueRef) -> Result<usize, CompareError> {
        if self.len == LANES {
            return Err(CompareError::TooManyLanes(LANES + 1));
        }
        value.validate(self.len, self.buf)?;
        self.values[self.len] = value;
        self.len += 1;
        Ok(self.len - 1)
    }

    pub fn len(&self) -> usize { self.len }
    pub fn is_empty(&self) -> bool { self.len == 0 }
    pub fn buf(&self) -> &'a [u8] { self.buf }
    pub fn filled(&self) -> LaneMask { LaneMask::first(self.len) }

    #[inline]
    pub fn get(&self, lane: usize) -> ValueRef {
        self.values[lane]
    }

    #[inline]
    pub fn content(&self, lane: usize) -> &'a [u8] {
        self.values[lane].content(self.buf)
    }
}

impl<'a> fmt::Debug for ValueLanes<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_list().entries(&self.values[..self.len]).finish()
    }
}

/// Up to `LANES` pairs of values to compare, plus the mask of active lanes.
#[derive(Clone, Debug)]
pub struct LaneBatch<'a> {
    left: ValueLanes<'a>,
    right: ValueLanes<'a>,
    active: LaneMask,
}

impl<'a> LaneBatch<'a> {
    pub fn new(left_buf: &'a [u8], right_buf: &'a [u8]) -> LaneBatch<'a> {
        LaneBatch {
            left: ValueLanes::new(left_buf),
            right: ValueLanes::new(right_buf),
            active: LaneMask::EMPTY,
        }
    }

    /// Pairs up two sides of equal length, all lanes active.
    pub fn from_lanes(left: ValueLanes<'a>, right: ValueLanes<'a>) -> Result<LaneBatch<'a>, CompareError> {
        ensure!(
            left.len() == right.len(),
            CompareError::InvalidArgument,
            "left side has {} lanes, right side has {}",
            left.len(),
            right.len()
        );
        let active = left.filled();
        Ok(LaneBatch { left, right, active })
    }

    /// Appends an active lane and returns its index.
    pub fn push(&mut self, left: ValueRef, right: ValueRef) -> Result<usize, CompareError> {
        if self.left.len() == LANES {
            return Err(CompareError::TooManyLanes(LANES + 1));
        }
        // Validate the right side first so a failure leaves both sides untouched.
        right.validate(self.right.len(), self.right.buf())?;
        let lane = self.left.push(left)?;
        self.right.push(right)?;
        self.active.set(lane);
        Ok(lane)
    }

    /// Restricts the active lanes, lanes without values are never active.
    pub fn with_active(mut self, mask: LaneMask) -> LaneBatch<'a> {
        self.active = mask & self.left.filled();
        self
    }

    pub fn active(&self) -> LaneMask { self.active }
    pub fn len(&self) -> usize { self.left.len() }
    pub fn is_empty(&self) -> bool { self.left.is_empty() }
    pub fn left(&self) -> &ValueLanes<'a> { &self.left }
    pub fn right(&self) -> &ValueLanes<'a> { &self.right }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_validates_bounds() {
        let buf = [0x83, b'a', b'b', b'c'];
        let mut batch = LaneBatch::new(&buf, &buf);
        let abc = ValueRef::new(0, 1, 3, 0x83);
        assert_eq!(batch.push(abc, abc), Ok(0));
        let overflow = ValueRef::new(0, 1, 4, 0x84);
        assert_eq!(
            batch.push(abc, overflow),
            Err(CompareError::OutOfBounds { lane: 1, offset: 1, end: 5, buffer_len: 4 })
        );
        assert_eq!(batch.len(), 1);
        assert_eq!(batch.active(), LaneMask::new(1));
        assert_eq!(batch.left().content(0), b"abc");
    }

    #[test]
    fn test_too_many_lanes() {
        let buf = [0x0F];
        let null = ValueRef::new(0, 1, 0, 0x0F);
        let mut batch = LaneBatch::new(&buf, &buf);
        for i in 0..LANES {
            assert_eq!(batch.push(null, null), Ok(i));
        }
        assert_eq!(batch.push(null, null), Err(CompareError::TooManyLanes(LANES + 1)));
        assert_eq!(batch.active(), LaneMask::ALL);
    }

    #[test]
    fn test_with_active_ignores_empty_lanes() {
        let buf = [0x0F];
        let null = ValueRef::new(0, 1, 0, 0x0F);
        let left = ValueLanes::from_slice(&buf, &[null, null, null]).unwrap();
        let right = ValueLanes::from_slice(&buf, &[null, null, null]).unwrap();
        let batch = LaneBatch::from_lanes(left, right).unwrap().with_active(LaneMask::new(0b1010_1010));
        assert_eq!(batch.active(), LaneMask::new(0b010));
    }

    #[test]
    fn test_mismatched_sides() {
        let buf = [0x0F];
        let null = ValueRef::new(0, 1, 0, 0x0F);
        let left = ValueLanes::from_slice(&buf, &[null, null]).unwrap();
        let right = ValueLanes::from_slice(&buf, &[null]).unwrap();
        assert!(matches!(LaneBatch::from_lanes(left, right), Err(CompareError::InvalidArgument(_))));
    }
}
