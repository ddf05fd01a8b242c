//! Lenient float literal parsing
//!
//! Literals must look like `digits` or `digits.digits`. Anything else is
//! logged and read as 0; the caller never sees an error.

use log::warn;
use regex::Regex;
use std::sync::LazyLock;

static FLOAT_LITERAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid float literal pattern"));

/// Parse a decimal literal, falling back to 0 on mismatch.
pub fn parse_lenient(input: &str) -> f64 {
    let input = input.trim();
    if !FLOAT_LITERAL.is_match(input) {
        warn!("{input} is not a float");
        return 0.0;
    }
    // The pattern only admits literals `str::parse` accepts
    input.parse().unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_plain_decimals() {
        assert_eq!(parse_lenient("1.0"), 1.0);
        assert_eq!(parse_lenient("  42 "), 42.0);
        assert_eq!(parse_lenient("0.125\r"), 0.125);
    }

    #[test]
    fn test_rejected_literals_read_as_zero() {
        for raw in ["-1.5", "1e3", ".5", "5.", "abc", "", "NaN", "0x10"] {
            assert_eq!(parse_lenient(raw), 0.0, "literal {raw:?}");
        }
    }
}
