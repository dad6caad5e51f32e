use thiserror::Error;

use crate::engine::LANES;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompareError {
    #[error("Lane batch holds at most {max} lanes, got {0}", max = LANES)]
    TooManyLanes(usize),
    #[error("Value of lane {lane} spans {offset}..{end} but its buffer has {buffer_len} bytes")]
    OutOfBounds {
        lane: usize,
        offset: usize,
        end: usize,
        buffer_len: usize,
    },
    #[error("Symbol id {id} in lane {lane} is not in the symbol table ({symbols} symbols)")]
    SymbolOutOfRange { lane: usize, id: u64, symbols: usize },
    #[error("Malformed ion value: {0}")]
    Malformed(String),
    #[error("Policy {0} has no sorting semantics")]
    UnsortablePolicy(String),
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

#[macro_export]
macro_rules! bail {
    ($kind:expr, $e:expr) => {
        return Err($kind($e.to_owned()));
    };
    ($kind:expr, $fmt:expr, $($arg:tt)+) => {
        return Err($kind(format!($fmt, $($arg)+).to_owned()));
    };
}

#[macro_export]
macro_rules! ensure {
    ($cond:expr, $kind:expr, $e:expr) => {
        if !($cond) {
            return Err($kind($e.to_owned()));
        }
    };
    ($cond:expr, $kind:expr, $fmt:expr, $($arg:tt)+) => {
        if !($cond) {
            return Err($kind(format!($fmt, $($arg)+).to_owned()));
        }
    };
}
