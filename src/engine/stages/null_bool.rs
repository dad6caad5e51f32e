use crate::engine::stages::{LaneClass, LaneState};

/// Resolves null/bool lanes by the difference of their descriptor bytes:
/// null (`0x0F`) < false (`0x10`) < true (`0x11`).
pub fn execute(state: &mut LaneState) -> usize {
    let lanes = state.live_of(LaneClass::NullBool);
    for lane in lanes.iter() {
        let result = state.left_tlv[lane] as i32 - state.right_tlv[lane] as i32;
        state.resolve(lane, result);
    }
    lanes.count()
}
