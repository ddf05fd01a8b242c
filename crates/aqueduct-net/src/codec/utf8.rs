//! Strict UTF-8 decoder
//!
//! Only sequences of up to three bytes are accepted: every decoded code point
//! must fit a single 16-bit code unit. Lead bytes announcing four or more
//! bytes are rejected as out of range.

use crate::error::DecodeError;

/// Decode `bytes` into a `String`, rejecting malformed or truncated input.
pub fn decode_utf8(bytes: &[u8]) -> Result<String, DecodeError> {
    let mut out = String::with_capacity(bytes.len());
    let mut code: u32 = 0;
    let mut pending = 0usize;
    let mut start = 0usize;

    for (offset, &byte) in bytes.iter().enumerate() {
        if pending > 0 {
            if byte & 0xC0 != 0x80 {
                return Err(DecodeError::MissingContinuation { offset, byte });
            }
            code = (code << 6) | u32::from(byte & 0x3F);
        } else {
            start = offset;
            match byte {
                0x00..=0x7F => {
                    pending = 1;
                    code = u32::from(byte);
                }
                0x80..=0xBF => {
                    return Err(DecodeError::UnexpectedContinuation { offset, byte });
                }
                0xC0..=0xDF => {
                    pending = 2;
                    code = u32::from(byte & 0x1F);
                }
                0xE0..=0xEF => {
                    pending = 3;
                    code = u32::from(byte & 0x0F);
                }
                _ => return Err(DecodeError::OutOfRange { offset }),
            }
        }

        pending -= 1;
        if pending == 0 {
            // 3-byte sequences can still land in the surrogate range
            let ch = char::from_u32(code).ok_or(DecodeError::OutOfRange { offset: start })?;
            out.push(ch);
        }
    }

    if pending != 0 {
        return Err(DecodeError::Truncated);
    }
    Ok(out)
}
