use crate::comparator::UnknownSymbols;
use crate::engine::stages::numeric::decode_uint;
use crate::engine::stages::{LaneClass, LaneState};
use crate::engine::symbols::SymbolTable;
use crate::errors::CompareError;
use crate::ion::types::IonType;

/// Replaces the content of symbol operands with the bytes of the symbol
/// they reference, so the byte stage compares them as strings.
///
/// Ids outside the symbol table either exclude the lane or fail the batch,
/// depending on `unknown`. Returns the number of unknown ids excluded.
pub fn execute<'a>(state: &mut LaneState<'a>, symbols: &'a SymbolTable, unknown: UnknownSymbols) -> Result<usize, CompareError> {
    let mut excluded = 0;
    for lane in state.live_of(LaneClass::Bytes).iter() {
        let left = symbolize(state.left_tlv[lane], state.left[lane], symbols);
        let right = symbolize(state.right_tlv[lane], state.right[lane], symbols);
        match (left, right) {
            (Ok(l), Ok(r)) => {
                state.left[lane] = l;
                state.right[lane] = r;
            }
            (Err(id), _) | (_, Err(id)) => match unknown {
                UnknownSymbols::Fail => {
                    return Err(CompareError::SymbolOutOfRange { lane, id, symbols: symbols.len() });
                }
                UnknownSymbols::Incomparable => {
                    log::debug!("cmpv: lane {} references unknown symbol {}", lane, id);
                    state.exclude(lane);
                    excluded += 1;
                }
            },
        }
    }
    Ok(excluded)
}

/// Resolved bytes for a symbol, the content itself for other types, or the
/// offending id.
fn symbolize<'a>(tlv: u8, content: &'a [u8], symbols: &'a SymbolTable) -> Result<&'a [u8], u64> {
    if IonType::of(tlv) != IonType::Symbol {
        return Ok(content);
    }
    let id = decode_uint(content).ok_or(u64::MAX)?;
    symbols.get(id).ok_or(id)
}
