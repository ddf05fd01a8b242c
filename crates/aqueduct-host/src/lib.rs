//! aqueduct-host: in-process host for aqueduct networks
//!
//! [`LocalHost`] keeps a handle table whose handle 1 is the root context
//! (garden properties and the weather report). Permutation and random layer
//! objects are created on demand and answer the `Handle` method.

pub mod config;
pub mod error;
pub mod local;
pub mod objects;
pub mod wire;

pub use config::{HostConfig, WeatherConfig};
pub use error::{HostObjectError, HostResult};
pub use local::LocalHost;
pub use objects::{LayerObject, RootContext};
pub use wire::{WireValue, parse_parameters};
