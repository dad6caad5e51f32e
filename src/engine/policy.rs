//! Ordering policies, stored as 16 byte lookup tables keyed by the Ion type
//! tag (the high nibble of a type descriptor byte).
//!
//! Every table byte packs:
//!
//!   - `0x0F` - ordering rank (only meaningful for sorting comparisons)
//!   - `0x30` - unused, set to the same value as the `0x40` bit
//!   - `0x40` - non-comparable, values of this type never produce a result
//!   - `0x80` - sorting semantics, values of different rank still get an order
//!
//! Ranks: null < bool < number < timestamp < string/symbol. The nulls-last
//! table moves null to the highest rank. Decimals, LOBs, containers and
//! annotations are non-comparable under every policy.
use std::fmt;
use std::str::FromStr;

use crate::errors::CompareError;

pub const RANK_MASK: u8 = 0x0F;
pub const NON_COMPARABLE: u8 = 0x40;
pub const SORT_ENABLED: u8 = 0x80;

/// Classification of one type tag under a policy.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct PolicyEntry(u8);

impl PolicyEntry {
    #[inline]
    pub fn rank(self) -> u8 {
        self.0 & RANK_MASK
    }

    #[inline]
    pub fn is_comparable(self) -> bool {
        self.0 & NON_COMPARABLE == 0
    }

    #[inline]
    pub fn sort_enabled(self) -> bool {
        self.0 & SORT_ENABLED != 0
    }

    #[inline]
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl fmt::Debug for PolicyEntry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PolicyEntry(rank={}, comparable={}, sort={})", self.rank(), self.is_comparable(), self.sort_enabled())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    name: &'static str,
    entries: [u8; 16],
}

impl PolicyTable {
    pub const fn new(name: &'static str, entries: [u8; 16]) -> PolicyTable {
        PolicyTable { name, entries }
    }

    /// Entry for the type of a type descriptor byte.
    #[inline]
    pub fn lookup(&self, tlv: u8) -> PolicyEntry {
        PolicyEntry(self.entries[(tlv >> 4) as usize])
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// True if every comparable type has sorting semantics.
    pub fn is_sort(&self) -> bool {
        self.entries
            .iter()
            .all(|&e| e & NON_COMPARABLE != 0 || e & SORT_ENABLED != 0)
    }
}

impl AsRef<PolicyTable> for PolicyTable {
    fn as_ref(&self) -> &PolicyTable {
        self
    }
}

/// Types only compare with types of the same rank, no sorting semantics.
pub const MATCHING_TYPE: PolicyTable = PolicyTable::new(
    "matching-type",
    [0x00, 0x01, 0x02, 0x02, 0x02, 0x7F, 0x03, 0x04, 0x04, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F, 0x7F],
);

pub const SORT_NULLS_FIRST: PolicyTable = PolicyTable::new(
    "sort-nulls-first",
    [0x80, 0x81, 0x82, 0x82, 0x82, 0xFF, 0x83, 0x84, 0x84, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
);

pub const SORT_NULLS_LAST: PolicyTable = PolicyTable::new(
    "sort-nulls-last",
    [0x8F, 0x81, 0x82, 0x82, 0x82, 0xFF, 0x83, 0x84, 0x84, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF],
);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComparePolicy {
    MatchingType,
    SortNullsFirst,
    SortNullsLast,
}

impl ComparePolicy {
    pub fn table(self) -> &'static PolicyTable {
        match self {
            ComparePolicy::MatchingType => &MATCHING_TYPE,
            ComparePolicy::SortNullsFirst => &SORT_NULLS_FIRST,
            ComparePolicy::SortNullsLast => &SORT_NULLS_LAST,
        }
    }
}

impl AsRef<PolicyTable> for ComparePolicy {
    fn as_ref(&self) -> &PolicyTable {
        self.table()
    }
}

impl fmt::Display for ComparePolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.table().name())
    }
}

impl FromStr for ComparePolicy {
    type Err = CompareError;

    fn from_str(s: &str) -> Result<ComparePolicy, CompareError> {
        match s {
            "matching" | "matching-type" => Ok(ComparePolicy::MatchingType),
            "nulls-first" | "sort-nulls-first" => Ok(ComparePolicy::SortNullsFirst),
            "nulls-last" | "sort-nulls-last" => Ok(ComparePolicy::SortNullsLast),
            _ => Err(CompareError::InvalidArgument(format!("unknown policy `{}`", s))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ion::IonType;

    fn rank(table: &PolicyTable, ty: IonType) -> u8 {
        table.lookup(ty.tag() << 4).rank()
    }

    #[test]
    fn test_ranks_are_monotonic() {
        for table in &[MATCHING_TYPE, SORT_NULLS_FIRST] {
            assert!(rank(table, IonType::Null) < rank(table, IonType::Bool));
            assert!(rank(table, IonType::Bool) < rank(table, IonType::PosInt));
            assert!(rank(table, IonType::Float) < rank(table, IonType::Timestamp));
            assert!(rank(table, IonType::Timestamp) < rank(table, IonType::String));
            assert_eq!(rank(table, IonType::PosInt), rank(table, IonType::NegInt));
            assert_eq!(rank(table, IonType::PosInt), rank(table, IonType::Float));
            assert_eq!(rank(table, IonType::Symbol), rank(table, IonType::String));
        }
        assert!(rank(&SORT_NULLS_LAST, IonType::String) < rank(&SORT_NULLS_LAST, IonType::Null));
    }

    #[test]
    fn test_non_comparable_types() {
        for policy in &[ComparePolicy::MatchingType, ComparePolicy::SortNullsFirst, ComparePolicy::SortNullsLast] {
            let table = policy.table();
            for ty in &[IonType::Decimal, IonType::Clob, IonType::Blob, IonType::List, IonType::Sexp, IonType::Struct, IonType::Annotation, IonType::Reserved] {
                assert!(!table.lookup(ty.tag() << 4).is_comparable(), "{} {}", policy, ty);
            }
            assert!(table.lookup(0x83).is_comparable());
        }
    }

    #[test]
    fn test_sort_semantics() {
        assert!(!MATCHING_TYPE.is_sort());
        assert!(SORT_NULLS_FIRST.is_sort());
        assert!(SORT_NULLS_LAST.is_sort());
        assert!(SORT_NULLS_FIRST.lookup(0x21).sort_enabled());
        assert!(!MATCHING_TYPE.lookup(0x21).sort_enabled());
    }

    #[test]
    fn test_parse_policy() {
        assert_eq!("nulls-last".parse::<ComparePolicy>(), Ok(ComparePolicy::SortNullsLast));
        assert_eq!("matching-type".parse::<ComparePolicy>(), Ok(ComparePolicy::MatchingType));
        assert!("nulls-sideways".parse::<ComparePolicy>().is_err());
    }
}
