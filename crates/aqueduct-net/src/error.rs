//! Error types for network parsing and evaluation.
//!
//! Every variant is fatal: an error aborts the whole evaluation. The only
//! locally recovered failure (an unparsable float literal) never reaches this
//! type; see [`crate::codec::float::parse_lenient`].

/// Errors raised while building or evaluating a network
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum NetError {
    /// Structural problem in the definition text
    #[error("format error: {0}")]
    Format(#[from] FormatError),

    /// Unknown activation function name
    #[error("unknown activation function: {0}")]
    UnknownActivation(String),

    /// Failure reported by, or detected at, the host boundary
    #[error("host error: {0}")]
    Host(String),

    /// Invalid hex, UTF-8 or binary report data
    #[error("decode error: {0}")]
    Decode(#[from] DecodeError),
}

/// Structural violations detected by the parser
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("network too big: {lines} lines (max {max})")]
    TooManyLines { lines: usize, max: usize },

    #[error("layer at line {line} declares {count} nodes (max {max})")]
    TooManyNodes {
        line: usize,
        count: usize,
        max: usize,
    },

    #[error("line {line}: layer header must be `LAYER_TYPE ACTIVATION`")]
    MalformedHeader { line: usize },

    #[error("line {line}: invalid node count `{raw}`")]
    InvalidNodeCount { line: usize, raw: String },

    #[error("line {line}: node description should follow the format NODE_TYPE VALUE(S)")]
    MalformedNode { line: usize },

    #[error("definition ended at line {line} inside a layer block")]
    UnexpectedEnd { line: usize },

    #[error("line {line}: unknown node type `{name}`")]
    UnknownNodeType { line: usize, name: String },

    #[error("unknown layer type `{0}`")]
    UnknownLayerType(String),

    #[error("input nodes and weights length mismatch: {inputs} inputs, {weights} weights")]
    WeightMismatch { inputs: usize, weights: usize },

    #[error("`{0}` needs a preceding layer")]
    MissingPreviousLayer(&'static str),

    #[error("permutation layer has {nodes} nodes but the preceding layer has {previous}")]
    PermutationSizeMismatch { nodes: usize, previous: usize },

    #[error("network has no layers")]
    EmptyNetwork,
}

/// Codec failures
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("hex input has odd length {0}")]
    OddHexLength(usize),

    #[error("invalid hex pair `{pair}` at offset {offset}")]
    InvalidHexPair { offset: usize, pair: String },

    #[error("invalid byte {byte:#04x} at offset {offset}: this is a tailing-byte")]
    UnexpectedContinuation { offset: usize, byte: u8 },

    #[error("invalid byte {byte:#04x} at offset {offset}: this is no tailing-byte")]
    MissingContinuation { offset: usize, byte: u8 },

    #[error("invalid encoding at offset {offset}: value out of range")]
    OutOfRange { offset: usize },

    #[error("the bytes don't sum up: truncated sequence at end of input")]
    Truncated,

    #[error("report response too short: {0} characters")]
    ShortReport(usize),
}

/// Result type for network operations
pub type NetResult<T> = Result<T, NetError>;
