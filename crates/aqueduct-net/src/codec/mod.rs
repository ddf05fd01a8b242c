//! Text and binary codecs shared by the evaluator and host implementations
//!
//! - `hex`: hex digit pairs to bytes (decoded buffers are 64-bit aligned)
//! - `utf8`: strict UTF-8 decoding limited to 16-bit code units
//! - `float`: lenient decimal literal parsing
//! - `report`: little-endian f64 reads over decoded weather reports

pub mod float;
pub mod hex;
pub mod report;
pub mod utf8;

pub use float::parse_lenient;
pub use self::hex::decode_aligned;
pub use report::{ReportCursor, read_f64_or_zero};
pub use utf8::decode_utf8;
