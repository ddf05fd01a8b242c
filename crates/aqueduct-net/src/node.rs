//! Node model
//!
//! Nodes never own the nodes they read from. A dense node stores the indices
//! of its upstream nodes in the network's [`NodeArena`](crate::arena::NodeArena).

use crate::activation::Activation;
use crate::codec::parse_lenient;
use crate::error::{FormatError, NetResult};

/// Index of a node inside the network arena
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

/// Variant-specific node data
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Pre-valued at construction
    Input,
    /// Weighted sum over `inputs`, one weight per input
    Dense {
        inputs: Vec<NodeId>,
        weights: Vec<f64>,
    },
    /// Value fetched from the host at prepare time
    Retrieval { target: String },
}

/// A scalar computation unit with a memoized value
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub activation: Activation,
    /// NaN until computed
    pub value: f64,
}

impl Node {
    /// Input node valued `activation(literal)`.
    pub fn input(literal: f64, activation: &str) -> NetResult<Self> {
        let activation = Activation::from_name(activation)?;
        Ok(Self {
            kind: NodeKind::Input,
            activation,
            value: activation.apply(literal),
        })
    }

    /// Dense node reading `inputs`. Input and weight counts must match.
    pub fn dense(inputs: Vec<NodeId>, weights: Vec<f64>, activation: &str) -> NetResult<Self> {
        if inputs.len() != weights.len() {
            return Err(FormatError::WeightMismatch {
                inputs: inputs.len(),
                weights: weights.len(),
            }
            .into());
        }
        Ok(Self {
            kind: NodeKind::Dense { inputs, weights },
            activation: Activation::from_name(activation)?,
            value: f64::NAN,
        })
    }

    /// Retrieval node bound to `target`; valued later by `prepare`.
    pub fn retrieval(target: &str, activation: &str) -> NetResult<Self> {
        Ok(Self {
            kind: NodeKind::Retrieval {
                target: target.to_string(),
            },
            activation: Activation::from_name(activation)?,
            value: f64::NAN,
        })
    }

    #[inline]
    pub fn is_computed(&self) -> bool {
        !self.value.is_nan()
    }
}

/// Parse a `DenseNode` payload: comma separated weight literals.
pub fn parse_weights(payload: &str) -> Vec<f64> {
    payload.split(',').map(parse_lenient).collect()
}
