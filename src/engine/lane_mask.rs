use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use crate::bitvec::{BitVec, BitVecMut};
use crate::engine::LANES;

/// Bitset over the lanes of a batch, bit `i` is lane `i`.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LaneMask(u16);

impl LaneMask {
    pub const EMPTY: LaneMask = LaneMask(0);
    pub const ALL: LaneMask = LaneMask(u16::MAX);

    #[inline]
    pub const fn new(bits: u16) -> LaneMask {
        LaneMask(bits)
    }

    /// Mask with the lowest `n` lanes set.
    pub fn first(n: usize) -> LaneMask {
        if n >= LANES {
            LaneMask::ALL
        } else {
            LaneMask((1u16 << n) - 1)
        }
    }

    #[inline]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[inline]
    pub fn count(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn is_subset_of(self, other: LaneMask) -> bool {
        self.0 & !other.0 == 0
    }

    #[inline]
    pub fn and_not(self, other: LaneMask) -> LaneMask {
        LaneMask(self.0 & !other.0)
    }

    /// Lane indices in ascending order.
    pub fn iter(self) -> Lanes {
        Lanes(self.0)
    }
}

pub struct Lanes(u16);

impl Iterator for Lanes {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<usize> {
        if self.0 == 0 {
            return None;
        }
        let lane = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(lane)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.0.count_ones() as usize;
        (n, Some(n))
    }
}

impl BitVec for LaneMask {
    #[inline]
    fn is_set(&self, index: usize) -> bool {
        index < LANES && self.0 & (1 << index) != 0
    }

    fn count_set(&self) -> usize {
        self.count()
    }
}

impl BitVecMut for LaneMask {
    #[inline]
    fn set(&mut self, index: usize) {
        debug_assert!(index < LANES);
        self.0 |= 1 << index;
    }

    #[inline]
    fn unset(&mut self, index: usize) {
        debug_assert!(index < LANES);
        self.0 &= !(1 << index);
    }
}

impl FromIterator<usize> for LaneMask {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> LaneMask {
        let mut mask = LaneMask::EMPTY;
        for lane in iter {
            mask.set(lane);
        }
        mask
    }
}

impl BitAnd for LaneMask {
    type Output = LaneMask;
    fn bitand(self, rhs: LaneMask) -> LaneMask {
        LaneMask(self.0 & rhs.0)
    }
}

impl BitAndAssign for LaneMask {
    fn bitand_assign(&mut self, rhs: LaneMask) {
        self.0 &= rhs.0;
    }
}

impl BitOr for LaneMask {
    type Output = LaneMask;
    fn bitor(self, rhs: LaneMask) -> LaneMask {
        LaneMask(self.0 | rhs.0)
    }
}

impl BitOrAssign for LaneMask {
    fn bitor_assign(&mut self, rhs: LaneMask) {
        self.0 |= rhs.0;
    }
}

impl Not for LaneMask {
    type Output = LaneMask;
    fn not(self) -> LaneMask {
        LaneMask(!self.0)
    }
}

impl fmt::Debug for LaneMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "LaneMask({:016b})", self.0)
    }
}

impl fmt::Display for LaneMask {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:016b}", self.0)
    }
}
