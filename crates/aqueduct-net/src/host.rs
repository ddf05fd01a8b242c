//! Host call boundary
//!
//! The evaluator never executes host-side logic itself. It talks to the host
//! through three blocking calls and only understands the fixed-width envelopes
//! wrapped around the textual responses.

use crate::codec::parse_lenient;
use crate::error::{NetError, NetResult};

/// Opaque object handle issued by the host. 0 means "no object".
pub type Handle = i64;

/// Handle of the root context object (garden properties, weather report).
pub const ROOT_HANDLE: Handle = 1;

/// Package that provides the host-side layer implementations.
pub const NETWORK_PACKAGE: &str = "aqueduct/network";

/// Method invoked on host-side layer objects.
pub const HANDLE_METHOD: &str = "Handle";

/// Prefix marking a failed invoke.
pub const ERROR_PREFIX: &str = "error ";

/// Characters preceding a scalar retrieve result (`float `).
pub const VALUE_PREFIX_LEN: usize = 6;

/// Characters preceding a string retrieve result (`string `).
pub const STRING_PREFIX_LEN: usize = 7;

/// Envelope around invoke results: `array (` … `)`.
pub const ENVELOPE_HEAD_LEN: usize = 7;
pub const ENVELOPE_TAIL_LEN: usize = 1;

const FLOAT_TAG: &str = "float ";

/// Operations a host environment exposes to the evaluator.
///
/// `Err` is a transport-level failure (lost handle, unreachable target).
/// Method-level failures are reported in-band with [`ERROR_PREFIX`].
pub trait Host {
    /// Create an object of `type_name` from `package`. Returns 0 on failure.
    fn instantiate(&mut self, package: &str, type_name: &str) -> NetResult<Handle>;

    /// Call `method` on the object behind `handle` with typed-token `payload`.
    fn invoke(&mut self, handle: Handle, method: &str, payload: &str) -> NetResult<String>;

    /// Read the property at dotted path `key` from the object behind `handle`.
    fn retrieve(&mut self, handle: Handle, key: &str) -> NetResult<String>;
}

/// Instantiate a host-side layer object, treating handle 0 as failure.
pub fn instantiate_layer(host: &mut dyn Host, type_name: &str) -> NetResult<Handle> {
    let handle = host.instantiate(NETWORK_PACKAGE, type_name)?;
    if handle == 0 {
        return Err(NetError::Host(format!("Invalid handler for {type_name}")));
    }
    Ok(handle)
}

/// Reject responses carrying the error prefix.
pub fn check_response(response: String) -> NetResult<String> {
    match response.strip_prefix(ERROR_PREFIX) {
        Some(message) => Err(NetError::Host(message.to_string())),
        None => Ok(response),
    }
}

/// Drop the first `len` characters of a response.
pub fn strip_prefix_chars(response: &str, len: usize) -> &str {
    match response.char_indices().nth(len) {
        Some((idx, _)) => &response[idx..],
        None => "",
    }
}

/// Parse an `array (float a, float b, …)` invoke result into `expected` values.
pub fn parse_float_vector(response: &str, expected: usize) -> NetResult<Vec<f64>> {
    let chars = response.chars().count();
    if chars < ENVELOPE_HEAD_LEN + ENVELOPE_TAIL_LEN {
        return Err(NetError::Host(format!("malformed response `{response}`")));
    }
    let body: String = response
        .chars()
        .skip(ENVELOPE_HEAD_LEN)
        .take(chars - ENVELOPE_HEAD_LEN - ENVELOPE_TAIL_LEN)
        .collect();
    let body = body.replace(FLOAT_TAG, "");

    let values: Vec<f64> = body
        .split(' ')
        .filter(|token| !token.is_empty())
        .map(|token| parse_lenient(token.trim_end_matches(',')))
        .collect();
    if values.len() < expected {
        return Err(NetError::Host(format!(
            "response carries {} values, {} expected",
            values.len(),
            expected
        )));
    }
    Ok(values)
}
