//! Node arena
//!
//! All nodes of a network live in one growable store and refer to each other
//! by [`NodeId`]. Values are computed on first read and memoized; there is no
//! invalidation, so a fresh network must be built to re-evaluate.

use log::debug;

use crate::codec::parse_lenient;
use crate::error::NetResult;
use crate::host::{Host, ROOT_HANDLE, VALUE_PREFIX_LEN, strip_prefix_chars};
use crate::node::{Node, NodeId, NodeKind};

#[derive(Debug, Default, Clone)]
pub struct NodeArena {
    nodes: Vec<Node>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    /// Overwrite a node's cached value.
    pub fn set_value(&mut self, id: NodeId, value: f64) {
        self.nodes[id.0].value = value;
    }

    /// Value accessor: computes the node if it has no value yet.
    pub fn value(&mut self, id: NodeId) -> f64 {
        if !self.nodes[id.0].is_computed() {
            self.compute(id);
        }
        self.nodes[id.0].value
    }

    /// Run the node's compute step unconditionally.
    pub fn compute(&mut self, id: NodeId) {
        let node = &self.nodes[id.0];
        let activation = node.activation;
        let value = match &node.kind {
            NodeKind::Input => return,
            NodeKind::Retrieval { .. } => activation.apply(node.value),
            NodeKind::Dense { inputs, .. } => {
                let count = inputs.len();
                let mut sum = 0.0;
                // left to right; summation order is observable in the result
                for i in 0..count {
                    let (input, weight) = match &self.nodes[id.0].kind {
                        NodeKind::Dense { inputs, weights } => (inputs[i], weights[i]),
                        _ => unreachable!("node kind changed during compute"),
                    };
                    sum += self.value(input) * weight;
                }
                activation.apply(sum)
            }
        };
        self.nodes[id.0].value = value;
    }

    /// Resolve a retrieval node's value from the host under `context`.
    /// Other node kinds ignore prepare.
    pub fn prepare(&mut self, id: NodeId, context: &str, host: &mut dyn Host) -> NetResult<()> {
        let NodeKind::Retrieval { target } = &self.nodes[id.0].kind else {
            return Ok(());
        };
        let key = format!("{context}.{target}");
        let response = host.retrieve(ROOT_HANDLE, &key)?;
        debug!("retrieve {key} -> {response}");
        self.nodes[id.0].value = parse_lenient(strip_prefix_chars(&response, VALUE_PREFIX_LEN));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NetError;
    use crate::host::Handle;

    struct PropertyHost;

    impl Host for PropertyHost {
        fn instantiate(&mut self, _: &str, _: &str) -> NetResult<Handle> {
            Ok(0)
        }
        fn invoke(&mut self, _: Handle, _: &str, _: &str) -> NetResult<String> {
            Err(NetError::Host("unsupported".to_string()))
        }
        fn retrieve(&mut self, handle: Handle, key: &str) -> NetResult<String> {
            assert_eq!(handle, ROOT_HANDLE);
            match key {
                "Garden.Latitude" => Ok("float 45.5".to_string()),
                _ => Err(NetError::Host("target not found".to_string())),
            }
        }
    }

    #[test]
    fn test_dense_value_is_weighted_sum() {
        let mut arena = NodeArena::new();
        let a = arena.push(Node::input(1.0, "linear").unwrap());
        let b = arena.push(Node::input(2.0, "linear").unwrap());
        let d = arena.push(Node::dense(vec![a, b], vec![0.5, 0.25], "linear").unwrap());
        assert_eq!(arena.value(d), 1.0);
    }

    #[test]
    fn test_value_is_memoized() {
        let mut arena = NodeArena::new();
        let a = arena.push(Node::input(1.0, "linear").unwrap());
        let d = arena.push(Node::dense(vec![a], vec![3.0], "linear").unwrap());
        assert_eq!(arena.value(d), 3.0);
        // changing the upstream value does not invalidate the cached result
        arena.set_value(a, 100.0);
        assert_eq!(arena.value(d), 3.0);
    }

    #[test]
    fn test_dense_computes_uncomputed_inputs() {
        let mut arena = NodeArena::new();
        let a = arena.push(Node::input(2.0, "linear").unwrap());
        let hidden = arena.push(Node::dense(vec![a], vec![2.0], "linear").unwrap());
        let out = arena.push(Node::dense(vec![hidden], vec![0.5], "sigmoid").unwrap());
        assert_eq!(arena.value(out), 1.0 / (1.0 + (-2.0f64).exp()));
        assert_eq!(arena.node(hidden).value, 4.0);
    }

    #[test]
    fn test_prepare_sets_raw_value() {
        let mut arena = NodeArena::new();
        let r = arena.push(Node::retrieval("Latitude", "relu").unwrap());
        arena.prepare(r, "Garden", &mut PropertyHost).unwrap();
        assert_eq!(arena.value(r), 45.5);
    }

    #[test]
    fn test_prepare_propagates_host_failure() {
        let mut arena = NodeArena::new();
        let r = arena.push(Node::retrieval("Secret", "linear").unwrap());
        assert!(arena.prepare(r, "Garden", &mut PropertyHost).is_err());
    }

    #[test]
    fn test_prepare_ignores_other_kinds() {
        let mut arena = NodeArena::new();
        let a = arena.push(Node::input(1.5, "linear").unwrap());
        arena.prepare(a, "Garden", &mut PropertyHost).unwrap();
        assert_eq!(arena.value(a), 1.5);
    }
}
