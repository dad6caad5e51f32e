use std::fmt;

/// Low nibble of a type descriptor byte that marks a (typed) null.
pub const NULL_LEN: u8 = 0x0F;
/// Type descriptor byte of an untyped null.
pub const NULL_TLV: u8 = 0x0F;
pub const FALSE_TLV: u8 = 0x10;
pub const TRUE_TLV: u8 = 0x11;

/// Ion type, the high nibble of a type descriptor byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum IonType {
    Null = 0,
    Bool = 1,
    PosInt = 2,
    NegInt = 3,
    Float = 4,
    Decimal = 5,
    Timestamp = 6,
    Symbol = 7,
    String = 8,
    Clob = 9,
    Blob = 10,
    List = 11,
    Sexp = 12,
    Struct = 13,
    Annotation = 14,
    Reserved = 15,
}

impl IonType {
    const ALL: [IonType; 16] = [
        IonType::Null,
        IonType::Bool,
        IonType::PosInt,
        IonType::NegInt,
        IonType::Float,
        IonType::Decimal,
        IonType::Timestamp,
        IonType::Symbol,
        IonType::String,
        IonType::Clob,
        IonType::Blob,
        IonType::List,
        IonType::Sexp,
        IonType::Struct,
        IonType::Annotation,
        IonType::Reserved,
    ];

    #[inline]
    pub fn from_tag(tag: u8) -> IonType {
        IonType::ALL[(tag & 0x0F) as usize]
    }

    #[inline]
    pub fn of(tlv: u8) -> IonType {
        IonType::from_tag(tlv >> 4)
    }

    #[inline]
    pub fn tag(self) -> u8 {
        self as u8
    }

    pub fn is_integer(self) -> bool {
        matches!(self, IonType::PosInt | IonType::NegInt)
    }

    pub fn is_number(self) -> bool {
        matches!(self, IonType::PosInt | IonType::NegInt | IonType::Float)
    }

    pub fn is_container(self) -> bool {
        matches!(self, IonType::List | IonType::Sexp | IonType::Struct)
    }
}

impl fmt::Display for IonType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            IonType::Null => "null",
            IonType::Bool => "bool",
            IonType::PosInt | IonType::NegInt => "int",
            IonType::Float => "float",
            IonType::Decimal => "decimal",
            IonType::Timestamp => "timestamp",
            IonType::Symbol => "symbol",
            IonType::String => "string",
            IonType::Clob => "clob",
            IonType::Blob => "blob",
            IonType::List => "list",
            IonType::Sexp => "sexp",
            IonType::Struct => "struct",
            IonType::Annotation => "annotation",
            IonType::Reserved => "reserved",
        };
        write!(f, "{}", name)
    }
}

/// Typed nulls (`null.int` is `0x2F`, ...) compare like an untyped null.
#[inline]
pub fn normalize_tlv(tlv: u8) -> u8 {
    if tlv & 0x0F == NULL_LEN {
        NULL_TLV
    } else {
        tlv
    }
}
