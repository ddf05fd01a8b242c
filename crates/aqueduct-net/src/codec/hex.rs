//! Hex decoding into aligned buffers (encoding is plain `hex::encode`)
//!
//! The decoder sizes its output to a multiple of 8 bytes so that the buffer
//! can be read as a sequence of f64 values without a partial tail.

use crate::error::DecodeError;

/// Alignment of decoded buffers in bytes
pub const ALIGNMENT: usize = 8;

/// Decode hex digit pairs into a zero-padded, 8-byte aligned buffer.
pub fn decode_aligned(input: &str) -> Result<Vec<u8>, DecodeError> {
    let digits = input.as_bytes();
    if digits.len() % 2 != 0 {
        return Err(DecodeError::OddHexLength(digits.len()));
    }

    let len = digits.len() / 2;
    let mut buffer = vec![0u8; len.div_ceil(ALIGNMENT) * ALIGNMENT];
    hex::decode_to_slice(digits, &mut buffer[..len]).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { index, .. } => {
            let offset = index - index % 2;
            DecodeError::InvalidHexPair {
                offset,
                pair: String::from_utf8_lossy(&digits[offset..offset + 2]).into_owned(),
            }
        }
        // lengths are checked above
        _ => DecodeError::OddHexLength(digits.len()),
    })?;
    Ok(buffer)
}
