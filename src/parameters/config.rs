//! Serializable parameter definitions
//!
//! Model definitions describe their parameters as a JSON object keyed by
//! parameter name. This module turns such a description into a
//! [`Parameters`] collection, keeping the order the keys appear in.
//!
//! ```json
//! {
//!   "texplosion": {"min_value": -50.0, "max_value": 0.0, "latex": "t_{\\rm exp}"},
//!   "mejecta":    {"min_value": 0.01, "max_value": 100.0, "log": true},
//!   "redshift":   {"value": 0.05},
//!   "kappa":      {"min_value": 0.05, "max_value": 0.34,
//!                  "prior": {"type": "gaussian", "mu": 0.2, "sigma": 0.05}}
//! }
//! ```

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::parameters::parameter::{Parameter, ParameterError};
use crate::parameters::parameters::Parameters;
use crate::parameters::prior::{Gaussian, PowerLaw, Prior, PriorError, Uniform};
use crate::printer::Printer;

/// Prior shape of a free parameter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PriorConfig {
    #[default]
    Uniform,
    Gaussian {
        mu: f64,
        sigma: f64,
    },
    PowerLaw {
        alpha: f64,
    },
}

impl PriorConfig {
    pub fn build(&self) -> std::result::Result<Box<dyn Prior>, PriorError> {
        Ok(match *self {
            PriorConfig::Uniform => Box::new(Uniform),
            PriorConfig::Gaussian { mu, sigma } => Box::new(Gaussian::new(mu, sigma)?),
            PriorConfig::PowerLaw { alpha } => Box::new(PowerLaw::new(alpha)?),
        })
    }
}

/// Definition of a single parameter
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ParameterConfig {
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub value: Option<f64>,
    pub log: bool,
    pub latex: Option<String>,
    pub derived_keys: Vec<String>,
    pub prior: PriorConfig,
}

impl ParameterConfig {
    /// Build a parameter from this definition
    pub fn build(
        &self,
        name: &str,
        printer: Option<Arc<dyn Printer>>,
    ) -> std::result::Result<Parameter, ParameterError> {
        let mut builder = Parameter::builder(name)
            .log(self.log)
            .derived_keys(self.derived_keys.iter().cloned())
            .prior(self.prior.build()?);

        if let Some(min) = self.min_value {
            builder = builder.min_value(min);
        }
        if let Some(max) = self.max_value {
            builder = builder.max_value(max);
        }
        if let Some(value) = self.value {
            builder = builder.value(value);
        }
        if let Some(latex) = &self.latex {
            builder = builder.latex(latex);
        }
        if let Some(printer) = printer {
            builder = builder.printer(printer);
        }

        builder.build()
    }
}

impl Parameters {
    /// Build a collection from `(name, definition)` pairs, in order
    pub fn from_configs<'a, I>(configs: I, printer: Option<Arc<dyn Printer>>) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a ParameterConfig)>,
    {
        let mut params = Parameters::new();
        for (name, config) in configs {
            params.add(config.build(name, printer.clone())?)?;
        }
        Ok(params)
    }

    /// Load parameters from a JSON object of `name → definition`
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::parameters::Parameters;
    ///
    /// let json = r#"{
    ///   "vejecta": {"min_value": 1.0e3, "max_value": 3.0e4},
    ///   "redshift": {"value": 0.05}
    /// }"#;
    ///
    /// let params = Parameters::from_json(json).unwrap();
    /// assert_eq!(params.len(), 2);
    /// assert_eq!(params.free_names(), vec!["vejecta"]);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let configs: serde_json::Map<String, serde_json::Value> = serde_json::from_str(json)?;

        let mut params = Parameters::new();
        for (name, value) in configs {
            let config: ParameterConfig = serde_json::from_value(value)?;
            params.add(config.build(&name, None)?)?;
        }
        Ok(params)
    }
}
