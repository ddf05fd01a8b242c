//! Activation function registry
//!
//! Names resolve to a closed set of scalar functions. Note that `explu` maps
//! to the identity: the exponential-linear combination is only applied by the
//! weather layer's two-line mode, never through this registry.

use crate::error::{NetError, NetResult};

/// Scaling factor of SELU
pub const SELU_LAMBDA: f64 = 1.0507;
/// ELU parameter used by SELU
pub const SELU_ALPHA: f64 = 1.67326;

/// Activation selected for a node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    Linear,
    Sigmoid,
    Relu,
    Selu,
    Softplus,
}

impl Activation {
    /// Resolve an activation by its definition name.
    pub fn from_name(name: &str) -> NetResult<Self> {
        match name {
            "linear" => Ok(Activation::Linear),
            "sigmoid" => Ok(Activation::Sigmoid),
            "relu" => Ok(Activation::Relu),
            "explu" => Ok(Activation::Linear),
            "selu" => Ok(Activation::Selu),
            "softplus" => Ok(Activation::Softplus),
            _ => Err(NetError::UnknownActivation(name.to_string())),
        }
    }

    #[inline]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Activation::Linear => x,
            Activation::Sigmoid => 1.0 / (1.0 + (-x).exp()),
            // NaN passes through; `f64::max` alone would return 0
            Activation::Relu => {
                if x.is_nan() {
                    x
                } else {
                    x.max(0.0)
                }
            }
            Activation::Selu => SELU_LAMBDA * elu(x, SELU_ALPHA),
            Activation::Softplus => (1.0 + x.exp()).ln(),
        }
    }
}

/// Exponential linear unit.
#[inline]
pub fn elu(x: f64, alpha: f64) -> f64 {
    if x > 0.0 { x } else { alpha * x.exp_m1() }
}

/// `alpha * (e^x - 1)` without the positive branch of ELU.
#[inline]
pub fn explu(x: f64, alpha: f64) -> f64 {
    alpha * x.exp_m1()
}
