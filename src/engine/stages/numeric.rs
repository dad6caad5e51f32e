use byteorder::{BigEndian, ByteOrder};

use crate::engine::stages::{LaneClass, LaneState};
use crate::engine::LANES;
use crate::ion::IonType;

/// Decoded numeric operand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Number {
    Int(i64),
    Float(f64),
}

impl Number {
    #[inline]
    pub fn to_f64(self) -> f64 {
        match self {
            Number::Int(i) => i as f64,
            Number::Float(f) => f,
        }
    }
}

/// Big-endian unsigned integer of up to 8 bytes, empty content is zero.
#[inline]
pub fn decode_uint(content: &[u8]) -> Option<u64> {
    match content.len() {
        0 => Some(0),
        n @ 1..=8 => Some(BigEndian::read_uint(content, n)),
        _ => None,
    }
}

/// Decodes the content of an int or float value.
///
/// Integer magnitudes that do not fit an `i64` become floats and lose
/// precision like any promoted integer. Floats are 0, 4 or 8 bytes wide,
/// other widths return `None`.
pub fn decode_number(tlv: u8, content: &[u8]) -> Option<Number> {
    match IonType::of(tlv) {
        IonType::PosInt => Some(match decode_uint(content) {
            Some(magnitude) if magnitude <= i64::MAX as u64 => Number::Int(magnitude as i64),
            Some(magnitude) => Number::Float(magnitude as f64),
            None => Number::Float(wide_magnitude(content)),
        }),
        IonType::NegInt => Some(match decode_uint(content) {
            Some(magnitude) if magnitude <= 1 << 63 => Number::Int((magnitude as i64).wrapping_neg()),
            Some(magnitude) => Number::Float(-(magnitude as f64)),
            None => Number::Float(-wide_magnitude(content)),
        }),
        IonType::Float => match content.len() {
            0 => Some(Number::Float(0.0)),
            4 => Some(Number::Float(BigEndian::read_f32(content) as f64)),
            8 => Some(Number::Float(BigEndian::read_f64(content))),
            _ => None,
        },
        _ => None,
    }
}

fn wide_magnitude(content: &[u8]) -> f64 {
    content.iter().fold(0.0, |acc, &b| acc * 256.0 + b as f64)
}

/// Three-way comparison, integers against floats compare as floats.
///
/// Floats follow IEEE-754 numeric order, so `-0.0 == 0.0`. NaN has no
/// defined position; it falls back to `f64::total_cmp` so the result is at
/// least deterministic.
#[inline]
pub fn compare_numbers(left: Number, right: Number) -> i32 {
    let ordering = match (left, right) {
        (Number::Int(l), Number::Int(r)) => l.cmp(&r),
        (l, r) => {
            let (l, r) = (l.to_f64(), r.to_f64());
            l.partial_cmp(&r).unwrap_or_else(|| l.total_cmp(&r))
        }
    };
    ordering as i32
}

/// Resolves number lanes. Lanes with an undecodable float width leave the
/// output. Returns the number of lanes resolved.
pub fn execute(state: &mut LaneState) -> usize {
    let lanes = state.live_of(LaneClass::Number);
    let mut left = [None; LANES];
    let mut right = [None; LANES];
    for lane in lanes.iter() {
        left[lane] = decode_number(state.left_tlv[lane], state.left[lane]);
        right[lane] = decode_number(state.right_tlv[lane], state.right[lane]);
    }
    let mut resolved = 0;
    for lane in lanes.iter() {
        match (left[lane], right[lane]) {
            (Some(l), Some(r)) => {
                state.resolve(lane, compare_numbers(l, r));
                resolved += 1;
            }
            _ => state.exclude(lane),
        }
    }
    resolved
}
