//! In-process implementation of the network host

use std::collections::HashMap;

use aqueduct_net::host::{ERROR_PREFIX, NETWORK_PACKAGE, ROOT_HANDLE};
use aqueduct_net::{Handle, Host, NetResult};
use log::{debug, warn};
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;

use crate::config::HostConfig;
use crate::error::{HostObjectError, HostResult};
use crate::objects::{LayerObject, RootContext};
use crate::wire::parse_parameters;

#[derive(Debug)]
enum HostObject {
    Root(RootContext),
    Layer(LayerObject),
}

/// Host serving layer objects and the garden context from memory.
#[derive(Debug)]
pub struct LocalHost {
    objects: HashMap<Handle, HostObject>,
    next_handle: Handle,
    rng: Xoshiro256PlusPlus,
}

impl LocalHost {
    pub fn new(root: RootContext, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Xoshiro256PlusPlus::seed_from_u64(seed),
            None => Xoshiro256PlusPlus::from_rng(&mut rand::rng()),
        };
        let mut objects = HashMap::new();
        objects.insert(ROOT_HANDLE, HostObject::Root(root));
        Self {
            objects,
            next_handle: ROOT_HANDLE + 1,
            rng,
        }
    }

    /// Build a host from a loaded configuration, reading the weather report.
    pub fn from_config(config: &HostConfig) -> HostResult<Self> {
        let root = RootContext {
            garden: config.garden_properties()?,
            report: config.weather_report()?,
        };
        debug!(
            "host root: {} garden properties, report={}",
            root.garden.len(),
            root.report.as_ref().map_or(0, Vec::len)
        );
        Ok(Self::new(root, config.seed))
    }

    fn object(&self, handle: Handle) -> HostResult<&HostObject> {
        self.objects
            .get(&handle)
            .ok_or(HostObjectError::HandleLost(handle))
    }

    fn call(&mut self, handle: Handle, method: &str, payload: &str) -> HostResult<String> {
        let object = match self.object(handle)? {
            HostObject::Layer(object) => *object,
            HostObject::Root(_) => {
                return Err(HostObjectError::UnknownMethod {
                    object: "root context",
                    method: method.to_string(),
                });
            }
        };
        let params = parse_parameters(payload)?;
        let result = object.call(method, &params, &mut self.rng)?;
        Ok(result.to_string())
    }
}

impl Host for LocalHost {
    fn instantiate(&mut self, package: &str, type_name: &str) -> NetResult<Handle> {
        let object = if package == NETWORK_PACKAGE {
            LayerObject::from_type_name(type_name)
        } else {
            None
        };
        let Some(object) = object else {
            warn!("unknown type {package}.{type_name}");
            return Ok(0);
        };
        let handle = self.next_handle;
        self.next_handle += 1;
        self.objects.insert(handle, HostObject::Layer(object));
        debug!("instantiate {type_name} -> handle {handle}");
        Ok(handle)
    }

    fn invoke(&mut self, handle: Handle, method: &str, payload: &str) -> NetResult<String> {
        match self.call(handle, method, payload) {
            Ok(response) => Ok(response),
            Err(err @ HostObjectError::HandleLost(_)) => Err(err.into()),
            Err(err) => {
                debug!("invoke handle {handle} failed: {err}");
                Ok(format!("{ERROR_PREFIX}{err}"))
            }
        }
    }

    fn retrieve(&mut self, handle: Handle, key: &str) -> NetResult<String> {
        let value = match self.object(handle)? {
            HostObject::Root(root) => root.lookup(key)?,
            HostObject::Layer(_) => return Err(HostObjectError::TargetNotFound.into()),
        };
        Ok(value.to_string())
    }
}
