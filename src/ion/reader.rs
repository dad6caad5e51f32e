use crate::engine::batch::ValueRef;
use crate::errors::CompareError;
use crate::ion::types::{IonType, NULL_LEN};

/// Length nibble announcing a VarUInt length after the descriptor byte.
const VAR_LEN: u8 = 14;
const MAX_VAR_UINT_BYTES: usize = 5;

/// Reads a VarUInt at `pos`: 7 bits per byte, most significant first, the
/// high bit marks the last byte. Returns the value and its width.
pub fn read_var_uint(buf: &[u8], pos: usize) -> Result<(u32, usize), CompareError> {
    let mut value: u64 = 0;
    for (i, &byte) in buf.iter().skip(pos).take(MAX_VAR_UINT_BYTES).enumerate() {
        value = (value << 7) | (byte & 0x7F) as u64;
        if byte & 0x80 != 0 {
            ensure!(value <= u32::MAX as u64, CompareError::Malformed, "VarUInt at {} overflows: {}", pos, value);
            return Ok((value as u32, i + 1));
        }
    }
    Err(CompareError::Malformed(format!("unterminated VarUInt at {}", pos)))
}

/// Parses the header of the value starting at `pos`.
pub fn read_value(buf: &[u8], pos: usize) -> Result<ValueRef, CompareError> {
    let tlv = match buf.get(pos) {
        Some(&tlv) => tlv,
        None => return Err(CompareError::Malformed(format!("no value at {}, buffer has {} bytes", pos, buf.len()))),
    };
    let ty = IonType::of(tlv);
    let nibble = tlv & 0x0F;
    ensure!(ty != IonType::Reserved, CompareError::Malformed, "reserved type descriptor 0x{:02x} at {}", tlv, pos);

    let header_end = pos + 1;
    let (offset, len) = if nibble == NULL_LEN {
        (header_end, 0)
    } else if ty == IonType::Bool {
        ensure!(nibble <= 1, CompareError::Malformed, "invalid bool descriptor 0x{:02x} at {}", tlv, pos);
        (header_end, 0)
    } else if nibble == VAR_LEN || (ty == IonType::Struct && nibble == 1) {
        let (len, width) = read_var_uint(buf, header_end)?;
        (header_end + width, len as usize)
    } else {
        (header_end, nibble as usize)
    };

    ensure!(
        offset + len <= buf.len(),
        CompareError::Malformed,
        "value at {} needs {} bytes, buffer has {}",
        pos,
        offset + len - pos,
        buf.len() - pos
    );
    Ok(ValueRef::new(pos as u32, offset as u32, len as u32, tlv))
}

/// Reads consecutive top level values until the end of `buf`.
pub fn read_values(buf: &[u8]) -> Result<Vec<ValueRef>, CompareError> {
    let mut values = Vec::new();
    let mut pos = 0;
    while pos < buf.len() {
        let value = read_value(buf, pos)?;
        pos = value.end();
        values.push(value);
    }
    Ok(values)
}
