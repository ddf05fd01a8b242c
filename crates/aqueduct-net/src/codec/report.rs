//! Sequential reads over a decoded weather report
//!
//! A report holds one or two "lines" of little-endian f64 values separated by
//! a newline byte. Reads past the end yield 0 instead of failing.

use byteorder::{ByteOrder, LittleEndian};

const F64_SIZE: usize = 8;
const NEWLINE: u8 = 0x0A;

/// Read the f64 at `offset`, or 0 when fewer than 8 bytes remain.
#[inline]
pub fn read_f64_or_zero(data: &[u8], offset: usize) -> f64 {
    match offset.checked_add(F64_SIZE) {
        Some(end) if end <= data.len() => LittleEndian::read_f64(&data[offset..end]),
        _ => 0.0,
    }
}

/// Forward-only cursor over report bytes
pub struct ReportCursor<'a> {
    data: &'a [u8],
    offset: usize,
}

impl<'a> ReportCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, offset: 0 }
    }

    /// Read `count` consecutive doubles. The offset advances by 8 per value even
    /// when the value was past the end of the buffer.
    pub fn read_line(&mut self, count: usize) -> Vec<f64> {
        let mut values = Vec::with_capacity(count);
        for _ in 0..count {
            values.push(read_f64_or_zero(self.data, self.offset));
            self.offset += F64_SIZE;
        }
        values
    }

    /// Advance past the next newline byte. Returns false when the buffer ends
    /// first.
    pub fn skip_past_newline(&mut self) -> bool {
        while self.offset < self.data.len() {
            let byte = self.data[self.offset];
            self.offset += 1;
            if byte == NEWLINE {
                return true;
            }
        }
        false
    }

    pub fn offset(&self) -> usize {
        self.offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn le_bytes(values: &[f64]) -> Vec<u8> {
        values.iter().flat_map(|v| v.to_le_bytes()).collect()
    }

    #[test]
    fn test_read_line_exact() {
        let data = le_bytes(&[1.25, -2.5, 3.0]);
        let mut cursor = ReportCursor::new(&data);
        assert_eq!(cursor.read_line(3), vec![1.25, -2.5, 3.0]);
        assert_eq!(cursor.offset(), 24);
    }

    #[test]
    fn test_short_tail_reads_zero() {
        let mut data = le_bytes(&[0.5, 0.75]);
        data.truncate(12);
        let mut cursor = ReportCursor::new(&data);
        assert_eq!(cursor.read_line(2), vec![0.5, 0.0]);
    }

    #[test]
    fn test_skip_past_newline() {
        let mut data = le_bytes(&[0.5]);
        data.extend_from_slice(&[0x01, NEWLINE]);
        data.extend(le_bytes(&[9.0]));
        let mut cursor = ReportCursor::new(&data);
        cursor.read_line(1);
        assert!(cursor.skip_past_newline());
        assert_eq!(cursor.read_line(1), vec![9.0]);
        assert!(!cursor.skip_past_newline());
    }

    #[test]
    fn test_read_at_overflowing_offset() {
        assert_eq!(read_f64_or_zero(&[0u8; 8], usize::MAX - 2), 0.0);
    }
}
