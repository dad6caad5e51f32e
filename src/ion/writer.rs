use std::fmt;

use crate::engine::batch::ValueRef;
use crate::engine::symbols::SymbolTable;
use crate::ion::types::{IonType, FALSE_TLV, NULL_TLV, TRUE_TLV};
use crate::value::{Timestamp, Val};

/// Append-only buffer of encoded top level values.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct ValueBuffer {
    data: Vec<u8>,
    values: Vec<ValueRef>,
}

impl ValueBuffer {
    pub fn new() -> ValueBuffer {
        ValueBuffer::default()
    }

    /// Encodes `val` at the end of the buffer. Symbols are interned into
    /// `symbols`.
    pub fn push(&mut self, val: &Val, symbols: &mut SymbolTable) -> ValueRef {
        let base = self.data.len();
        let (tlv, offset, len) = encode(val, symbols, &mut self.data);
        self.record(base, tlv, offset, len)
    }

    /// Appends a value of any type with the given content bytes.
    pub fn push_raw(&mut self, ty: IonType, content: &[u8]) -> ValueRef {
        let base = self.data.len();
        let (tlv, offset, len) = write_value(&mut self.data, ty, content);
        self.record(base, tlv, offset, len)
    }

    fn record(&mut self, base: usize, tlv: u8, offset: usize, len: usize) -> ValueRef {
        let value = ValueRef::new(base as u32, offset as u32, len as u32, tlv);
        self.values.push(value);
        value
    }

    pub fn bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn values(&self) -> &[ValueRef] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl fmt::Debug for ValueBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ValueBuffer({} values, {})", self.values.len(), hex::encode(&self.data))
    }
}

/// Writes a complete value and returns its descriptor byte, content offset
/// and content length.
fn encode(val: &Val, symbols: &mut SymbolTable, out: &mut Vec<u8>) -> (u8, usize, usize) {
    let mut content = Vec::new();
    let ty = match val {
        Val::Null => return write_descriptor(out, NULL_TLV),
        Val::Bool(b) => return write_descriptor(out, if *b { TRUE_TLV } else { FALSE_TLV }),
        Val::Int(i) => {
            write_magnitude(&mut content, i.unsigned_abs());
            if *i < 0 { IonType::NegInt } else { IonType::PosInt }
        }
        Val::Float(x) => {
            content.extend_from_slice(&x.to_be_bytes());
            IonType::Float
        }
        Val::Timestamp(ts) => {
            write_timestamp(&mut content, ts);
            IonType::Timestamp
        }
        Val::Str(s) => {
            content.extend_from_slice(s.as_bytes());
            IonType::String
        }
        Val::Symbol(name) => {
            let id = symbols.intern(name);
            write_magnitude(&mut content, id as u64);
            IonType::Symbol
        }
        Val::List(values) => {
            for value in values {
                encode(value, symbols, &mut content);
            }
            IonType::List
        }
    };
    write_value(out, ty, &content)
}

fn write_descriptor(out: &mut Vec<u8>, tlv: u8) -> (u8, usize, usize) {
    out.push(tlv);
    (tlv, out.len(), 0)
}

fn write_value(out: &mut Vec<u8>, ty: IonType, content: &[u8]) -> (u8, usize, usize) {
    let tlv = write_header(out, ty, content.len());
    let offset = out.len();
    out.extend_from_slice(content);
    (tlv, offset, content.len())
}

/// Type descriptor plus VarUInt length for content of 14 bytes or more.
fn write_header(out: &mut Vec<u8>, ty: IonType, len: usize) -> u8 {
    let tlv = if len < 14 { ty.tag() << 4 | len as u8 } else { ty.tag() << 4 | 14 };
    out.push(tlv);
    if len >= 14 {
        write_var_uint(out, len as u64);
    }
    tlv
}

fn write_var_uint(out: &mut Vec<u8>, value: u64) {
    let width = ((64 - value.leading_zeros() as usize) + 6) / 7;
    for i in (0..width.max(1)).rev() {
        let mut byte = ((value >> (7 * i)) & 0x7F) as u8;
        if i == 0 {
            byte |= 0x80;
        }
        out.push(byte);
    }
}

/// Big-endian magnitude without leading zero bytes, zero has no bytes.
fn write_magnitude(out: &mut Vec<u8>, magnitude: u64) {
    let width = (64 - magnitude.leading_zeros() as usize + 7) / 8;
    out.extend_from_slice(&magnitude.to_be_bytes()[8 - width..]);
}

/// UTC offset followed by year, month, day, hour, minute and second.
fn write_timestamp(out: &mut Vec<u8>, ts: &Timestamp) {
    out.push(0x80);
    write_var_uint(out, ts.year as u64);
    for &field in &[ts.month, ts.day, ts.hour, ts.minute, ts.second] {
        write_var_uint(out, field as u64);
    }
}
