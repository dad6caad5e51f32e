use crate::engine::policy::PolicyTable;
use crate::engine::stages::{LaneClass, LaneState};
use crate::ion::types::normalize_tlv;
use crate::ion::IonType;

/// Looks up both sides of every live lane in the policy table and routes
/// each lane to the stage that compares it.
///
/// Lanes with a non-comparable type leave the output. Lanes of different
/// rank keep `rank(left) - rank(right)` as their result if the policy has
/// sorting semantics and leave the output otherwise. Returns the number of
/// lanes excluded here.
pub fn execute(state: &mut LaneState, table: &PolicyTable) -> usize {
    let mut excluded = 0;
    for lane in state.live.iter() {
        let left_tlv = normalize_tlv(state.left_tlv[lane]);
        let right_tlv = normalize_tlv(state.right_tlv[lane]);
        state.left_tlv[lane] = left_tlv;
        state.right_tlv[lane] = right_tlv;

        let left = table.lookup(left_tlv);
        let right = table.lookup(right_tlv);
        state.results[lane] = left.rank() as i32 - right.rank() as i32;

        let class = if !left.is_comparable() || !right.is_comparable() {
            LaneClass::Incomparable
        } else if left.rank() != right.rank() {
            if left.sort_enabled() && right.sort_enabled() {
                LaneClass::Mismatch
            } else {
                LaneClass::Incomparable
            }
        } else {
            route(IonType::of(left_tlv), IonType::of(right_tlv))
        };

        match class {
            LaneClass::Incomparable => {
                state.exclude(lane);
                excluded += 1;
            }
            LaneClass::Mismatch => {
                let result = state.results[lane];
                state.class[lane] = class;
                state.resolve(lane, result);
            }
            _ => state.class[lane] = class,
        }
    }
    excluded
}

/// Stage for two types of equal rank.
fn route(left: IonType, right: IonType) -> LaneClass {
    let family = |ty: IonType| match ty {
        IonType::Null | IonType::Bool => Some(LaneClass::NullBool),
        IonType::PosInt | IonType::NegInt | IonType::Float => Some(LaneClass::Number),
        IonType::Timestamp | IonType::Symbol | IonType::String => Some(LaneClass::Bytes),
        _ => None,
    };
    match (family(left), family(right)) {
        (Some(l), Some(r)) if l == r => l,
        // Only reachable with custom tables that share a rank across
        // families; null and bool keep comparing by descriptor byte.
        (Some(LaneClass::NullBool), _) | (_, Some(LaneClass::NullBool)) => LaneClass::NullBool,
        _ => LaneClass::Incomparable,
    }
}
