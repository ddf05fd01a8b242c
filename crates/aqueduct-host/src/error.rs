//! Error types for the in-process host

use aqueduct_net::{DecodeError, NetError};
use thiserror::Error;

/// Failures raised while serving host calls or loading host configuration.
///
/// Call-level failures (`UnknownMethod`, `Parameters`, …) reach the network as
/// an `error <message>` response; the rest surface as transport errors.
#[derive(Error, Debug)]
pub enum HostObjectError {
    #[error("handle lost: {0}")]
    HandleLost(i64),

    #[error("unknown method `{method}` on {object}")]
    UnknownMethod {
        object: &'static str,
        method: String,
    },

    #[error("fields not in pair")]
    UnpairedFields,

    #[error("unknown value type `{0}`")]
    UnknownType(String),

    #[error("invalid {kind} value `{value}`")]
    InvalidValue { kind: &'static str, value: String },

    #[error("{object} expects {expected}")]
    Parameters {
        object: &'static str,
        expected: &'static str,
    },

    #[error("target not found")]
    TargetNotFound,

    #[error("unsupported garden property `{key}`")]
    UnsupportedProperty { key: String },

    #[error("string value: {0}")]
    Decode(#[from] DecodeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),
}

impl From<HostObjectError> for NetError {
    fn from(err: HostObjectError) -> Self {
        NetError::Host(err.to_string())
    }
}

pub type HostResult<T> = Result<T, HostObjectError>;
