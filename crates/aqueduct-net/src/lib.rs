//! aqueduct-net: network definition interpreter
//!
//! Parses the line-oriented network definition format into layers of nodes,
//! evaluating each layer as soon as it is built. Some layers and nodes pull
//! values from a [`Host`] (object handles, named methods, dotted properties).
//!
//! ```ignore
//! let output = aqueduct_net::compute_network(definition, &mut host)?;
//! assert_eq!(output, "[1.5]");
//! ```

pub mod activation;
pub mod arena;
pub mod codec;
pub mod error;
pub mod host;
pub mod layer;
pub mod network;
pub mod node;
pub mod parser;

pub use activation::Activation;
pub use error::{DecodeError, FormatError, NetError, NetResult};
pub use host::{Handle, Host};
pub use layer::{Layer, LayerKind};
pub use network::Network;
pub use node::{Node, NodeId, NodeKind};
pub use parser::{MAX_LINES, MAX_NODES_PER_LAYER, parse_network};

/// Parse and evaluate `definition`, returning the last layer rendered as
/// `[v1,v2,…]`.
pub fn compute_network(definition: &str, host: &mut dyn Host) -> NetResult<String> {
    let mut network = parse_network(definition, host)?;
    let rendered = network.render()?;
    log::info!(
        "network computed: {} layers, {} nodes",
        network.layers().len(),
        network.arena().len()
    );
    Ok(rendered)
}
