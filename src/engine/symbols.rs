use std::str;

use fnv::FnvHashMap;

/// Interned strings referenced by symbol values, indexed by symbol id.
///
/// Owned by the caller for the duration of a query; the comparator only
/// borrows it.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    data: Vec<u8>,
    ranges: Vec<(u32, u32)>,
    ids: FnvHashMap<Vec<u8>, u32>,
}

impl SymbolTable {
    pub fn new() -> SymbolTable {
        SymbolTable::default()
    }

    /// Returns the id of `name`, adding it to the table if necessary.
    pub fn intern(&mut self, name: &str) -> u32 {
        self.intern_bytes(name.as_bytes())
    }

    pub fn intern_bytes(&mut self, bytes: &[u8]) -> u32 {
        if let Some(&id) = self.ids.get(bytes) {
            return id;
        }
        let id = self.ranges.len() as u32;
        self.ranges.push((self.data.len() as u32, bytes.len() as u32));
        self.data.extend_from_slice(bytes);
        self.ids.insert(bytes.to_vec(), id);
        id
    }

    /// Bytes of symbol `id`, `None` if the id is out of range.
    #[inline]
    pub fn get(&self, id: u64) -> Option<&[u8]> {
        let &(offset, len) = self.ranges.get(usize::try_from(id).ok()?)?;
        Some(&self.data[offset as usize..(offset + len) as usize])
    }

    pub fn name(&self, id: u64) -> Option<&str> {
        self.get(id).and_then(|bytes| str::from_utf8(bytes).ok())
    }

    pub fn id(&self, name: &str) -> Option<u32> {
        self.ids.get(name.as_bytes()).cloned()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for SymbolTable {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> SymbolTable {
        let mut table = SymbolTable::new();
        for name in iter {
            table.intern(name);
        }
        table
    }
}
