//! Chart configuration composition.
//!
//! Painting is left to an external engine behind [`ChartEngine`]; this
//! module owns the configuration side: a base option set, a per-render
//! override, and the merged result handed to the engine.

mod merge;

pub use merge::{Config, SERIES_KEY, merge, merge_value};

use crate::error::{Result, WeftError};

/// The option-setting surface of a charting engine.
pub trait ChartEngine {
    /// Replace the engine's options with a fully merged configuration.
    fn set_option(&mut self, option: &Config);
}

/// A chart bound to an engine, re-applying `base + override` on each render.
#[derive(Debug)]
pub struct Chart<E: ChartEngine> {
    base: Config,
    last_override: Config,
    engine: E,
}

impl<E: ChartEngine> Chart<E> {
    /// Create a chart and push the base options to the engine.
    pub fn new(base: Config, mut engine: E) -> Self {
        engine.set_option(&base);
        Self {
            base,
            last_override: Config::new(),
            engine,
        }
    }

    /// Create a chart from a JSON document holding the base options.
    pub fn from_json_str(base: &str, engine: E) -> Result<Self> {
        Ok(Self::new(parse_config(base)?, engine))
    }

    /// Merge `patch` over the base options and push the result.
    pub fn render(&mut self, patch: Config) {
        self.last_override = patch;
        self.apply();
    }

    /// Swap the base options, keeping the most recent override.
    pub fn set_base(&mut self, base: Config) {
        self.base = base;
        self.apply();
    }

    pub fn base(&self) -> &Config {
        &self.base
    }

    /// The configuration the engine currently holds.
    pub fn option(&self) -> Config {
        merge(&self.base, &self.last_override)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    fn apply(&mut self) {
        let option = merge(&self.base, &self.last_override);
        log::debug!(
            "[chart] apply option keys={} override_keys={}",
            option.len(),
            self.last_override.len()
        );
        self.engine.set_option(&option);
    }
}

/// Parse a JSON document that must be an object.
pub fn parse_config(json: &str) -> Result<Config> {
    match serde_json::from_str(json)? {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Array(_) => Err(WeftError::NotAnObject("array")),
        serde_json::Value::Null => Err(WeftError::NotAnObject("null")),
        serde_json::Value::Bool(_) => Err(WeftError::NotAnObject("boolean")),
        serde_json::Value::Number(_) => Err(WeftError::NotAnObject("number")),
        serde_json::Value::String(_) => Err(WeftError::NotAnObject("string")),
    }
}
