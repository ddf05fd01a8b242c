//! Network definition parser
//!
//! The definition is a sequence of layer blocks:
//!
//! ```text
//! <layer_type> <activation>
//! <node_count>
//! <node_type> <payload>      (node_count lines)
//! <trailer>                  (may be empty)
//! ```
//!
//! Each layer is computed as soon as it is built, because the next block may
//! bind to (dense weights) or copy (permutation seeding) its values.

use log::debug;

use crate::codec::parse_lenient;
use crate::error::{FormatError, NetResult};
use crate::host::Host;
use crate::layer::Layer;
use crate::network::Network;
use crate::node::{Node, NodeId, parse_weights};

/// Maximum number of lines in a definition
pub const MAX_LINES: usize = 1300;

/// Maximum number of nodes in one layer
pub const MAX_NODES_PER_LAYER: usize = 128;

/// Parse `definition` and evaluate every layer against `host`.
pub fn parse_network(definition: &str, host: &mut dyn Host) -> NetResult<Network> {
    DefinitionParser::new(definition)?.run(host)
}

struct DefinitionParser<'a> {
    lines: Vec<&'a str>,
    cursor: usize,
    network: Network,
}

impl<'a> DefinitionParser<'a> {
    fn new(definition: &'a str) -> NetResult<Self> {
        let lines: Vec<&str> = definition.split('\n').collect();
        debug!("found {} lines in NN definition", lines.len());
        if lines.len() > MAX_LINES {
            return Err(FormatError::TooManyLines {
                lines: lines.len(),
                max: MAX_LINES,
            }
            .into());
        }
        Ok(Self {
            lines,
            cursor: 0,
            network: Network::default(),
        })
    }

    fn run(mut self, host: &mut dyn Host) -> NetResult<Network> {
        // `split` always yields at least one line
        while self.cursor < self.lines.len() - 1 {
            debug!("parsing from line {}", self.cursor);
            self.parse_layer(host)?;
        }
        Ok(self.network)
    }

    fn line(&self, index: usize) -> NetResult<&'a str> {
        self.lines
            .get(index)
            .copied()
            .ok_or_else(|| FormatError::UnexpectedEnd { line: index }.into())
    }

    fn parse_layer(&mut self, host: &mut dyn Host) -> NetResult<()> {
        let header_line = self.cursor;
        let mut header = self.line(header_line)?.split_whitespace();
        let (Some(layer_type), Some(activation)) = (header.next(), header.next()) else {
            return Err(FormatError::MalformedHeader { line: header_line }.into());
        };

        let count_line = header_line + 1;
        let raw_count = self.line(count_line)?.trim();
        let node_count: usize = raw_count.parse().map_err(|_| FormatError::InvalidNodeCount {
            line: count_line,
            raw: raw_count.to_string(),
        })?;
        if node_count > MAX_NODES_PER_LAYER {
            return Err(FormatError::TooManyNodes {
                line: count_line,
                count: node_count,
                max: MAX_NODES_PER_LAYER,
            }
            .into());
        }
        debug!("found layer {layer_type} with {node_count} nodes");

        let mut nodes = Vec::with_capacity(node_count);
        for node_idx in 0..node_count {
            let node_line = header_line + 2 + node_idx;
            let node = self.parse_node(node_line, activation)?;
            nodes.push(self.network.arena.push(node));
        }

        // extra info, can be empty or missing on the last block
        let trailer = self
            .lines
            .get(header_line + 2 + node_count)
            .copied()
            .map(str::trim_end)
            .unwrap_or("");

        // header + count + nodes + trailer
        self.cursor += 1 + 1 + node_count + 1;

        let layer = match layer_type {
            "InputLayer" => Layer::input(nodes),
            "DenseLayer" => Layer::dense(nodes),
            "PermutationLayer" => {
                self.seed_from_previous(&nodes)?;
                Layer::permutation(nodes, host)?
            }
            "RandomLayer" => Layer::random(nodes, host)?,
            "WeatherLayer" => Layer::weather(nodes, trailer, activation),
            "LocationLayer" => Layer::location(nodes),
            other => return Err(FormatError::UnknownLayerType(other.to_string()).into()),
        };

        let Network { arena, layers } = &mut self.network;
        layer.compute(arena, host)?;
        layers.push(layer);
        Ok(())
    }

    fn parse_node(&self, line_idx: usize, activation: &str) -> NetResult<Node> {
        let tokens: Vec<&str> = self.line(line_idx)?.split_whitespace().collect();
        let (node_type, payload) = match tokens.as_slice() {
            [node_type, payload] => (*node_type, *payload),
            _ => return Err(FormatError::MalformedNode { line: line_idx }.into()),
        };
        debug!("line {line_idx} declares {node_type}");

        match node_type {
            "InputNode" => Node::input(parse_lenient(payload), activation),
            "DenseNode" => {
                let inputs = self.previous_nodes("DenseNode")?;
                Node::dense(inputs, parse_weights(payload), activation)
            }
            "RetrievalNode" => Node::retrieval(payload, activation),
            other => Err(FormatError::UnknownNodeType {
                line: line_idx,
                name: other.to_string(),
            }
            .into()),
        }
    }

    fn previous_nodes(&self, what: &'static str) -> NetResult<Vec<NodeId>> {
        self.network
            .layers
            .last()
            .map(|layer| layer.nodes.clone())
            .ok_or_else(|| FormatError::MissingPreviousLayer(what).into())
    }

    /// Copy the preceding layer's values into freshly built permutation nodes.
    fn seed_from_previous(&mut self, nodes: &[NodeId]) -> NetResult<()> {
        let previous = self.previous_nodes("PermutationLayer")?;
        if nodes.len() > previous.len() {
            return Err(FormatError::PermutationSizeMismatch {
                nodes: nodes.len(),
                previous: previous.len(),
            }
            .into());
        }
        let arena = &mut self.network.arena;
        for (&id, &source) in nodes.iter().zip(&previous) {
            let value = arena.value(source);
            arena.set_value(id, value);
        }
        Ok(())
    }
}
