//! Binary Ion framing: type descriptor bytes, a header reader and an
//! append-only value encoder.
pub mod reader;
pub mod types;
pub mod writer;

pub use self::reader::{read_value, read_values, read_var_uint};
pub use self::types::IonType;
pub use self::writer::ValueBuffer;
