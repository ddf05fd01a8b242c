//! Host-side objects reachable through handles

use std::collections::BTreeMap;

use aqueduct_net::host::HANDLE_METHOD;
use rand::Rng;
use rand::seq::SliceRandom;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::error::{HostObjectError, HostResult};
use crate::wire::WireValue;

/// Root context object, always behind handle 1.
#[derive(Debug, Clone, Default)]
pub struct RootContext {
    pub garden: BTreeMap<String, WireValue>,
    pub report: Option<Vec<u8>>,
}

impl RootContext {
    /// Walk a dotted path (`Garden.Latitude`, `ReportData`).
    pub fn lookup(&self, path: &str) -> HostResult<WireValue> {
        let mut fields = path.split('.');
        let value = match (fields.next(), fields.next(), fields.next()) {
            (Some("Garden"), Some(field), None) => self.garden.get(field).cloned(),
            (Some("ReportData"), None, None) => self.report.clone().map(WireValue::Bytes),
            _ => None,
        };
        match value {
            Some(value) if !value.is_zero() => Ok(value),
            _ => Err(HostObjectError::TargetNotFound),
        }
    }
}

/// Objects created by `instantiate` in the network package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerObject {
    Permutation,
    Random,
}

impl LayerObject {
    pub fn from_type_name(name: &str) -> Option<Self> {
        match name {
            "PermutationLayer" => Some(LayerObject::Permutation),
            "RandomLayer" => Some(LayerObject::Random),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            LayerObject::Permutation => "PermutationLayer",
            LayerObject::Random => "RandomLayer",
        }
    }

    pub fn call(
        self,
        method: &str,
        params: &[WireValue],
        rng: &mut Xoshiro256PlusPlus,
    ) -> HostResult<WireValue> {
        if method != HANDLE_METHOD {
            return Err(HostObjectError::UnknownMethod {
                object: self.name(),
                method: method.to_string(),
            });
        }
        match self {
            LayerObject::Permutation => {
                let mut values = params
                    .iter()
                    .map(WireValue::as_float)
                    .collect::<Option<Vec<f64>>>()
                    .ok_or(HostObjectError::Parameters {
                        object: self.name(),
                        expected: "float values",
                    })?;
                values.shuffle(rng);
                Ok(WireValue::Array(values.into_iter().map(WireValue::Float).collect()))
            }
            LayerObject::Random => {
                let count = match params {
                    [value] => value.as_int().and_then(|n| usize::try_from(n).ok()),
                    _ => None,
                }
                .ok_or(HostObjectError::Parameters {
                    object: self.name(),
                    expected: "one non-negative int",
                })?;
                let values = (0..count)
                    .map(|_| WireValue::Float(rng.random::<f64>()))
                    .collect();
                Ok(WireValue::Array(values))
            }
        }
    }
}
