use crate::bitvec::BitVecMut;
use crate::engine::batch::ValueLanes;
use crate::engine::cmpv::CompareOutput;
use crate::engine::lane_mask::LaneMask;
use crate::engine::stages::numeric::{compare_numbers, decode_number, Number};
use crate::ion::types::normalize_tlv;

/// Compares every numeric lane against an integer constant.
pub fn compare_i64_imm(values: &ValueLanes, active: LaneMask, imm: i64) -> CompareOutput {
    compare_imm(values, active, Number::Int(imm))
}

/// Compares every numeric lane against a float constant.
pub fn compare_f64_imm(values: &ValueLanes, active: LaneMask, imm: f64) -> CompareOutput {
    compare_imm(values, active, Number::Float(imm))
}

// Lanes holding anything other than an int or a well formed float are
// dropped from the mask, whatever their type.
fn compare_imm(values: &ValueLanes, active: LaneMask, imm: Number) -> CompareOutput {
    let mut output = CompareOutput::empty();
    for lane in (active & values.filled()).iter() {
        let tlv = normalize_tlv(values.get(lane).tlv);
        if let Some(value) = decode_number(tlv, values.content(lane)) {
            output.results[lane] = compare_numbers(value, imm);
            output.mask.set(lane);
        }
    }
    output
}
