//! Network: ordered layers over a shared node arena

use crate::arena::NodeArena;
use crate::error::{FormatError, NetResult};
use crate::layer::Layer;

#[derive(Debug, Default, Clone)]
pub struct Network {
    pub(crate) arena: NodeArena,
    pub(crate) layers: Vec<Layer>,
}

impl Network {
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn arena(&self) -> &NodeArena {
        &self.arena
    }

    /// Values of the last layer, in node order.
    pub fn output(&mut self) -> NetResult<Vec<f64>> {
        let Network { arena, layers } = self;
        let last = layers.last().ok_or(FormatError::EmptyNetwork)?;
        Ok(last.values(arena))
    }

    /// Output rendered as `[v1,v2,…]`.
    pub fn render(&mut self) -> NetResult<String> {
        Ok(render_values(&self.output()?))
    }
}

/// Render values as a bracketed, comma separated list.
pub fn render_values(values: &[f64]) -> String {
    let items: Vec<String> = values.iter().map(|v| v.to_string()).collect();
    format!("[{}]", items.join(","))
}
