//! Host configuration file (TOML)
//!
//! ```toml
//! seed = 7
//!
//! [garden]
//! Name = "Rooftop"
//! Latitude = 45.46
//! Longitude = 9.19
//! WaterRequired = 12
//!
//! [weather]
//! report = "report.bin"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HostObjectError, HostResult};
use crate::wire::WireValue;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostConfig {
    /// RNG seed for permutation/random layers; entropy-seeded when absent
    #[serde(default)]
    pub seed: Option<u64>,
    /// Properties exposed under the `Garden` context
    #[serde(default)]
    pub garden: BTreeMap<String, toml::Value>,
    #[serde(default)]
    pub weather: Option<WeatherConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherConfig {
    /// Binary report file, relative paths resolve against the config file
    pub report: PathBuf,
}

impl HostConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> HostResult<Self> {
        let path = path.as_ref();
        let data = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml_str(&data)?;
        if let (Some(weather), Some(dir)) = (config.weather.as_mut(), path.parent()) {
            if weather.report.is_relative() {
                weather.report = dir.join(&weather.report);
            }
        }
        Ok(config)
    }

    pub fn from_toml_str(data: &str) -> HostResult<Self> {
        Ok(toml::from_str(data)?)
    }

    /// Garden properties converted to wire values.
    pub fn garden_properties(&self) -> HostResult<BTreeMap<String, WireValue>> {
        self.garden
            .iter()
            .map(|(key, value)| {
                let wire = match value {
                    toml::Value::String(s) => WireValue::Str(s.clone()),
                    toml::Value::Integer(i) => WireValue::Int(*i),
                    toml::Value::Float(f) => WireValue::Float(*f),
                    _ => {
                        return Err(HostObjectError::UnsupportedProperty { key: key.clone() });
                    }
                };
                Ok((key.clone(), wire))
            })
            .collect()
    }

    /// Raw weather report bytes, if a report is configured.
    pub fn weather_report(&self) -> HostResult<Option<Vec<u8>>> {
        match &self.weather {
            Some(weather) => Ok(Some(std::fs::read(&weather.report)?)),
            None => Ok(None),
        }
    }
}
