//! Layer model
//!
//! A layer is an ordered group of arena nodes plus a variant-specific compute
//! step. Host-backed variants overwrite their node values in place; later
//! layers are built against those overwritten values.

use log::debug;

use crate::activation::explu;
use crate::arena::NodeArena;
use crate::codec::{ReportCursor, decode_aligned};
use crate::error::{DecodeError, NetResult};
use crate::host::{
    HANDLE_METHOD, Handle, Host, ROOT_HANDLE, STRING_PREFIX_LEN, check_response,
    instantiate_layer, parse_float_vector, strip_prefix_chars,
};
use crate::node::NodeId;

/// Context key passed to `prepare` by location layers.
pub const LOCATION_CONTEXT: &str = "Garden";

/// Activation name that switches weather layers to two-line mode.
pub const COMBINATION_ACTIVATION: &str = "explu";

/// Variant-specific layer data
#[derive(Debug, Clone, PartialEq)]
pub enum LayerKind {
    Input,
    Dense,
    Permutation { handle: Handle },
    Random { handle: Handle },
    Weather { report: String, combine: bool },
    Location,
}

impl LayerKind {
    pub fn name(&self) -> &'static str {
        match self {
            LayerKind::Input => "InputLayer",
            LayerKind::Dense => "DenseLayer",
            LayerKind::Permutation { .. } => "PermutationLayer",
            LayerKind::Random { .. } => "RandomLayer",
            LayerKind::Weather { .. } => "WeatherLayer",
            LayerKind::Location => "LocationLayer",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub kind: LayerKind,
    pub nodes: Vec<NodeId>,
}

impl Layer {
    pub fn input(nodes: Vec<NodeId>) -> Self {
        Self {
            kind: LayerKind::Input,
            nodes,
        }
    }

    pub fn dense(nodes: Vec<NodeId>) -> Self {
        Self {
            kind: LayerKind::Dense,
            nodes,
        }
    }

    /// Permutation layer; the host object is created immediately.
    pub fn permutation(nodes: Vec<NodeId>, host: &mut dyn Host) -> NetResult<Self> {
        let handle = instantiate_layer(host, "PermutationLayer")?;
        Ok(Self {
            kind: LayerKind::Permutation { handle },
            nodes,
        })
    }

    /// Random layer; the host object is created immediately.
    pub fn random(nodes: Vec<NodeId>, host: &mut dyn Host) -> NetResult<Self> {
        let handle = instantiate_layer(host, "RandomLayer")?;
        Ok(Self {
            kind: LayerKind::Random { handle },
            nodes,
        })
    }

    pub fn weather(nodes: Vec<NodeId>, report: &str, activation: &str) -> Self {
        Self {
            kind: LayerKind::Weather {
                report: report.to_string(),
                combine: activation == COMBINATION_ACTIVATION,
            },
            nodes,
        }
    }

    pub fn location(nodes: Vec<NodeId>) -> Self {
        Self {
            kind: LayerKind::Location,
            nodes,
        }
    }

    /// Run the layer's compute step, writing node values into `arena`.
    pub fn compute(&self, arena: &mut NodeArena, host: &mut dyn Host) -> NetResult<()> {
        match &self.kind {
            LayerKind::Input => Ok(()),
            LayerKind::Dense => {
                for &id in &self.nodes {
                    arena.compute(id);
                }
                Ok(())
            }
            LayerKind::Permutation { handle } => {
                let payload = self
                    .nodes
                    .iter()
                    .map(|&id| format!("float {}", arena.value(id)))
                    .collect::<Vec<_>>()
                    .join(" ");
                self.overwrite_from_host(arena, host, *handle, &payload)
            }
            LayerKind::Random { handle } => {
                let payload = format!("int {}", self.nodes.len());
                self.overwrite_from_host(arena, host, *handle, &payload)
            }
            LayerKind::Weather { report, combine } => {
                self.read_weather(arena, host, report, *combine)
            }
            LayerKind::Location => {
                for &id in &self.nodes {
                    arena.prepare(id, LOCATION_CONTEXT, host)?;
                }
                Ok(())
            }
        }
    }

    /// Current values of the layer's nodes, computing any that are missing.
    pub fn values(&self, arena: &mut NodeArena) -> Vec<f64> {
        self.nodes.iter().map(|&id| arena.value(id)).collect()
    }

    fn overwrite_from_host(
        &self,
        arena: &mut NodeArena,
        host: &mut dyn Host,
        handle: Handle,
        payload: &str,
    ) -> NetResult<()> {
        debug!("invoke {} handle={handle} payload={payload}", self.kind.name());
        let response = check_response(host.invoke(handle, HANDLE_METHOD, payload)?)?;
        let values = parse_float_vector(&response, self.nodes.len())?;
        for (&id, value) in self.nodes.iter().zip(values) {
            arena.set_value(id, value);
        }
        Ok(())
    }

    fn read_weather(
        &self,
        arena: &mut NodeArena,
        host: &mut dyn Host,
        report: &str,
        combine: bool,
    ) -> NetResult<()> {
        let response = host.retrieve(ROOT_HANDLE, report)?;
        if response.chars().count() < STRING_PREFIX_LEN {
            return Err(DecodeError::ShortReport(response.chars().count()).into());
        }
        let hex = strip_prefix_chars(&response, STRING_PREFIX_LEN);
        let data = decode_aligned(hex)?;
        // alignment padding is not report data
        let len = hex.len() / 2;
        debug!("weather report `{report}`: {len} bytes, combine={combine}");

        let count = self.nodes.len();
        let mut cursor = ReportCursor::new(&data[..len]);
        let values = if combine {
            let first = cursor.read_line(count);
            if !cursor.skip_past_newline() {
                for &id in &self.nodes {
                    arena.set_value(id, 0.0);
                }
                return Ok(());
            }
            let second = cursor.read_line(count);
            first.iter().zip(&second).map(|(&f, &s)| explu(f, s)).collect()
        } else {
            cursor.read_line(count)
        };

        for (&id, value) in self.nodes.iter().zip(values) {
            arena.set_value(id, value);
        }
        Ok(())
    }
}
