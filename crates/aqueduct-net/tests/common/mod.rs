//! Scripted host shared by the integration tests

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};

use aqueduct_net::host::ROOT_HANDLE;
use aqueduct_net::{Handle, Host, NetError, NetResult};

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Instantiate { package: String, type_name: String },
    Invoke {
        handle: Handle,
        method: String,
        payload: String,
    },
    Retrieve { handle: Handle, key: String },
}

/// Host answering from canned responses and recording every call.
#[derive(Default)]
pub struct ScriptedHost {
    pub calls: Vec<Call>,
    /// Handle returned by `instantiate`; `None` hands out 2, 3, …
    pub fixed_handle: Option<Handle>,
    pub invoke_responses: VecDeque<String>,
    pub properties: HashMap<String, String>,
    next_handle: Handle,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self {
            next_handle: ROOT_HANDLE + 1,
            ..Self::default()
        }
    }

    pub fn with_property(mut self, key: &str, response: &str) -> Self {
        self.properties.insert(key.to_string(), response.to_string());
        self
    }

    pub fn with_invoke_response(mut self, response: &str) -> Self {
        self.invoke_responses.push_back(response.to_string());
        self
    }

    /// Register `bytes` as a weather report under `name`.
    pub fn with_report(self, name: &str, bytes: &[u8]) -> Self {
        let response = format!("string {}", hex::encode(bytes));
        self.with_property(name, &response)
    }

    pub fn invoke_payloads(&self) -> Vec<String> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Invoke { payload, .. } => Some(payload.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Host for ScriptedHost {
    fn instantiate(&mut self, package: &str, type_name: &str) -> NetResult<Handle> {
        self.calls.push(Call::Instantiate {
            package: package.to_string(),
            type_name: type_name.to_string(),
        });
        if let Some(handle) = self.fixed_handle {
            return Ok(handle);
        }
        let handle = self.next_handle;
        self.next_handle += 1;
        Ok(handle)
    }

    fn invoke(&mut self, handle: Handle, method: &str, payload: &str) -> NetResult<String> {
        self.calls.push(Call::Invoke {
            handle,
            method: method.to_string(),
            payload: payload.to_string(),
        });
        self.invoke_responses
            .pop_front()
            .ok_or_else(|| NetError::Host("no scripted response".to_string()))
    }

    fn retrieve(&mut self, handle: Handle, key: &str) -> NetResult<String> {
        self.calls.push(Call::Retrieve {
            handle,
            key: key.to_string(),
        });
        self.properties
            .get(key)
            .cloned()
            .ok_or_else(|| NetError::Host("target not found".to_string()))
    }
}

/// Little-endian bytes of `values`.
pub fn le_bytes(values: &[f64]) -> Vec<u8> {
    values.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Build a definition from layer blocks, each block given as its lines.
pub fn definition(blocks: &[&[&str]]) -> String {
    let mut out = String::new();
    for block in blocks {
        for line in *block {
            out.push_str(line);
            out.push('\n');
        }
    }
    out
}
