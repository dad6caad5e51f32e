pub trait BitVecMut {
    fn set(&mut self, index: usize);
    fn unset(&mut self, index: usize);
}

pub trait BitVec {
    fn is_set(&self, index: usize) -> bool;
    fn count_set(&self) -> usize;
}

/// Presence bitmap with one bit per row, least significant bit first.
pub fn bitmap_with_rows(rows: usize) -> Vec<u8> {
    vec![0; rows.div_ceil(8)]
}

impl BitVecMut for Vec<u8> {
    fn set(&mut self, index: usize) {
        let slot = index >> 3;
        if slot >= self.len() {
            self.resize(slot + 1, 0);
        }
        self[slot] |= 1 << (index as u8 & 7)
    }

    fn unset(&mut self, index: usize) {
        let slot = index >> 3;
        if slot < self.len() {
            self[slot] &= !(1 << (index as u8 & 7));
        }
    }
}

impl BitVec for Vec<u8> {
    fn is_set(&self, index: usize) -> bool {
        self.as_slice().is_set(index)
    }

    fn count_set(&self) -> usize {
        self.as_slice().count_set()
    }
}

impl BitVec for &'_ [u8] {
    fn is_set(&self, index: usize) -> bool {
        let slot = index >> 3;
        slot < self.len() && self[slot] & (1 << (index as u8 & 7)) > 0
    }

    fn count_set(&self) -> usize {
        self.iter().map(|b| b.count_ones() as usize).sum()
    }
}
