//! Parameter definition and implementation
//!
//! This module provides the Parameter struct, which turns one coordinate of a
//! sampler's unit hypercube into a physical value. A parameter is either free
//! (it has a sampling range, optionally in log space) or fixed (it always
//! yields the same value). It can also carry a reference value delivered by
//! another component, which it republishes as `reference_<name>`.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use thiserror::Error;

use crate::parameters::bounds::{Bounds, BoundsError};
use crate::parameters::outputs::Outputs;
use crate::parameters::prior::{Prior, PriorError, Uniform};
use crate::printer::{default_printer, Message, Printer};

/// Prefix of the key under which a received reference value is published
pub const REFERENCE_PREFIX: &str = "reference_";

/// Errors that can occur when working with parameters
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Parameter '{name}' with log prior cannot have range values <= 0 (got [{min}, {max}])")]
    NonPositiveLogBounds { name: String, min: f64, max: f64 },

    #[error("Bounds error: {0}")]
    BoundsError(#[from] BoundsError),

    #[error("Prior error: {0}")]
    PriorError(#[from] PriorError),

    #[error("Parameter '{name}' has no sampling range")]
    NotSamplable { name: String },

    #[error("Parameter '{name}' has neither a sampling range nor a fixed value")]
    MissingValue { name: String },

    #[error("Parameter '{name}' requires input '{key}'")]
    MissingInput { name: String, key: String },

    #[error("Parameter '{name}' already exists")]
    DuplicateName { name: String },

    #[error("Parameter '{name}' not found")]
    ParameterNotFound { name: String },

    #[error("Expected {expected} hypercube coordinates, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

/// A model parameter that is either free or fixed
///
/// Free parameters map a fraction in [0, 1] onto `[min_value, max_value]`
/// (in natural-log space when `log` is set). Fixed parameters always return
/// their stored value.
#[derive(Debug)]
pub struct Parameter {
    name: String,

    /// Sampling range in the transformed domain (log space if `log`)
    bounds: Option<Bounds>,

    /// Value used when there is no sampling range
    value: Option<f64>,

    log: bool,

    latex: String,

    /// Keys this parameter emits besides its own name
    derived_keys: Vec<String>,

    /// Last value received from another component
    reference_value: Option<f64>,

    /// Set once a clipping warning has been reported
    clipped_warning: AtomicBool,

    prior: Box<dyn Prior>,

    printer: Arc<dyn Printer>,
}

/// Builder for [`Parameter`]
///
/// # Examples
///
/// ```
/// use lcfit_rs::parameters::Parameter;
///
/// let param = Parameter::builder("mejecta")
///     .min_value(0.01)
///     .max_value(100.0)
///     .log(true)
///     .latex(r"M_{\rm ej}")
///     .build()
///     .unwrap();
///
/// assert!(param.is_free());
/// assert!(param.is_log());
/// assert_eq!(param.derived_keys(), ["reference_mejecta"]);
/// ```
#[derive(Debug)]
pub struct ParameterBuilder {
    name: String,
    min_value: Option<f64>,
    max_value: Option<f64>,
    value: Option<f64>,
    log: bool,
    latex: Option<String>,
    derived_keys: Vec<String>,
    prior: Option<Box<dyn Prior>>,
    printer: Option<Arc<dyn Printer>>,
}

impl ParameterBuilder {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            min_value: None,
            max_value: None,
            value: None,
            log: false,
            latex: None,
            derived_keys: Vec::new(),
            prior: None,
            printer: None,
        }
    }

    pub fn min_value(mut self, min_value: f64) -> Self {
        self.min_value = Some(min_value);
        self
    }

    pub fn max_value(mut self, max_value: f64) -> Self {
        self.max_value = Some(max_value);
        self
    }

    /// Fixed value, used only when the parameter ends up without a range
    pub fn value(mut self, value: f64) -> Self {
        self.value = Some(value);
        self
    }

    pub fn log(mut self, log: bool) -> Self {
        self.log = log;
        self
    }

    pub fn latex(mut self, latex: &str) -> Self {
        self.latex = Some(latex.to_string());
        self
    }

    pub fn derived_keys<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.derived_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn prior(mut self, prior: Box<dyn Prior>) -> Self {
        self.prior = Some(prior);
        self
    }

    pub fn printer(mut self, printer: Arc<dyn Printer>) -> Self {
        self.printer = Some(printer);
        self
    }

    /// Validate the configuration and create the parameter
    ///
    /// # Returns
    ///
    /// The new parameter, or an error if:
    /// - `log` is set and either bound is not strictly positive
    /// - `min_value > max_value`, or a bound is NaN
    /// - the prior cannot be used with the resulting range
    ///
    /// Equal bounds are not an error: the parameter becomes fixed at that value
    /// and a [`Message::MinMaxSame`] warning is reported.
    pub fn build(self) -> Result<Parameter, ParameterError> {
        let printer = self.printer.unwrap_or_else(default_printer);
        let mut value = self.value;

        let mut range = match (self.min_value, self.max_value) {
            (Some(min), Some(max)) => Some((min, max)),
            _ => None,
        };

        if let Some((min, max)) = range {
            if min == max {
                printer.message(Message::MinMaxSame {
                    name: self.name.clone(),
                });
                value = Some(min);
                range = None;
            }
        }

        let bounds = match range {
            Some((min, max)) if self.log => {
                if min <= 0.0 || max <= 0.0 {
                    return Err(ParameterError::NonPositiveLogBounds {
                        name: self.name,
                        min,
                        max,
                    });
                }
                Some(Bounds::new(min, max)?.ln()?)
            }
            Some((min, max)) => Some(Bounds::new(min, max)?),
            None => None,
        };

        let prior = self.prior.unwrap_or_else(|| Box::new(Uniform));
        if let Some(bounds) = &bounds {
            prior.validate(bounds)?;
        }

        let mut derived_keys = self.derived_keys;
        derived_keys.push(format!("{}{}", REFERENCE_PREFIX, self.name));

        Ok(Parameter {
            latex: self.latex.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            bounds,
            value,
            log: self.log,
            derived_keys,
            reference_value: None,
            clipped_warning: AtomicBool::new(false),
            prior,
            printer,
        })
    }
}

impl Parameter {
    /// Start building a parameter with the given name
    pub fn builder(name: &str) -> ParameterBuilder {
        ParameterBuilder::new(name)
    }

    /// Create a fixed parameter
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::parameters::Parameter;
    ///
    /// let param = Parameter::fixed("redshift", 0.05);
    /// assert!(!param.is_free());
    /// assert_eq!(param.fixed_value(), Some(0.05));
    /// ```
    pub fn fixed(name: &str, value: f64) -> Self {
        Self {
            name: name.to_string(),
            bounds: None,
            value: Some(value),
            log: false,
            latex: name.to_string(),
            derived_keys: vec![format!("{}{}", REFERENCE_PREFIX, name)],
            reference_value: None,
            clipped_warning: AtomicBool::new(false),
            prior: Box::new(Uniform),
            printer: default_printer(),
        }
    }

    /// Create a free parameter with a flat prior on `[min, max]`
    pub fn uniform(name: &str, min: f64, max: f64) -> Result<Self, ParameterError> {
        Self::builder(name).min_value(min).max_value(max).build()
    }

    /// Create a free parameter with a flat prior on `[ln min, ln max]`
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::parameters::Parameter;
    ///
    /// assert!(Parameter::log_uniform("bfield", 0.1, 10.0).is_ok());
    /// assert!(Parameter::log_uniform("bfield", -1.0, 5.0).is_err());
    /// ```
    pub fn log_uniform(name: &str, min: f64, max: f64) -> Result<Self, ParameterError> {
        Self::builder(name).min_value(min).max_value(max).log(true).build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return if the parameter is sampled in natural-log space
    pub fn is_log(&self) -> bool {
        self.log
    }

    /// Return the LaTeX representation of the parameter
    pub fn latex(&self) -> &str {
        &self.latex
    }

    /// Keys this parameter may emit besides its own name
    pub fn derived_keys(&self) -> &[String] {
        &self.derived_keys
    }

    /// Key under which the received reference value is published
    pub fn reference_key(&self) -> String {
        format!("{}{}", REFERENCE_PREFIX, self.name)
    }

    /// Whether the parameter has a sampling range
    pub fn is_free(&self) -> bool {
        self.bounds.is_some()
    }

    /// Sampling range in the transformed domain
    pub fn bounds(&self) -> Option<&Bounds> {
        self.bounds.as_ref()
    }

    /// Lower end of the sampling range in physical units
    pub fn min_value(&self) -> Option<f64> {
        self.bounds.map(|b| self.untransform(b.min()))
    }

    /// Upper end of the sampling range in physical units
    pub fn max_value(&self) -> Option<f64> {
        self.bounds.map(|b| self.untransform(b.max()))
    }

    pub fn fixed_value(&self) -> Option<f64> {
        self.value
    }

    pub fn reference_value(&self) -> Option<f64> {
        self.reference_value
    }

    pub fn prior(&self) -> &dyn Prior {
        self.prior.as_ref()
    }

    /// Fix the value of the parameter, dropping its sampling range
    pub fn fix_value(&mut self, value: f64) {
        self.bounds = None;
        self.value = Some(value);
    }

    fn transform(&self, value: f64) -> f64 {
        if self.log {
            value.ln()
        } else {
            value
        }
    }

    fn untransform(&self, value: f64) -> f64 {
        if self.log {
            value.exp()
        } else {
            value
        }
    }

    fn sampling_bounds(&self) -> Result<Bounds, ParameterError> {
        self.bounds.ok_or_else(|| ParameterError::NotSamplable {
            name: self.name.clone(),
        })
    }

    /// Return the value of the parameter in the parameter's units
    ///
    /// # Arguments
    ///
    /// * `fraction` - Hypercube coordinate, nominally in [0, 1]
    ///
    /// # Returns
    ///
    /// `clip(fraction * (max - min) + min, min, max)`, exponentiated for log
    /// parameters, or an error if the parameter has no sampling range
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::parameters::Parameter;
    ///
    /// let param = Parameter::uniform("vejecta", 1.0e3, 3.0e4).unwrap();
    /// assert_eq!(param.value(0.0).unwrap(), 1.0e3);
    /// assert_eq!(param.value(1.0).unwrap(), 3.0e4);
    /// ```
    pub fn value(&self, fraction: f64) -> Result<f64, ParameterError> {
        let bounds = self.sampling_bounds()?;
        Ok(self.untransform(bounds.lerp(fraction)))
    }

    /// Return the fraction given a parameter's value
    ///
    /// # Arguments
    ///
    /// * `value` - Value in the parameter's units
    /// * `clip` - Whether to clip the result to [0, 1]
    ///
    /// The first time clipping changes the result a [`Message::ParameterClipped`]
    /// warning is reported; later clips stay silent.
    pub fn fraction(&self, value: f64, clip: bool) -> Result<f64, ParameterError> {
        let bounds = self.sampling_bounds()?;
        let f = bounds.unlerp(self.transform(value));
        if !clip {
            return Ok(f);
        }

        let clipped = f.clamp(0.0, 1.0);
        // NaN compares unequal to itself and is reported as well
        if clipped != f && !self.clipped_warning.swap(true, Ordering::Relaxed) {
            self.printer.message(Message::ParameterClipped {
                name: self.name.clone(),
            });
        }
        Ok(clipped)
    }

    /// Evaluate the natural log of the prior density at a physical value
    pub fn lnprior_pdf(&self, x: f64) -> f64 {
        self.prior.ln_density(self.transform(x))
    }

    /// Map a uniform variate to a hypercube fraction following the prior
    ///
    /// For the flat prior this is the identity.
    pub fn prior_cdf(&self, u: f64) -> f64 {
        match &self.bounds {
            Some(bounds) => self.prior.prior_fraction(u, bounds).clamp(0.0, 1.0),
            None => u,
        }
    }

    /// Resolve the parameter for the current iteration
    ///
    /// # Arguments
    ///
    /// * `resolved` - Values already supplied by other components
    /// * `fraction` - Hypercube coordinate for this parameter, if it is free
    ///
    /// # Returns
    ///
    /// - an empty map if `resolved` already holds this parameter's name
    /// - otherwise `{name: value}`, followed by `{reference_<name>: reference}`
    ///   when a reference value has been received
    pub fn process(
        &self,
        resolved: &Outputs,
        fraction: Option<f64>,
    ) -> Result<Outputs, ParameterError> {
        if resolved.contains_key(&self.name) {
            return Ok(Outputs::new());
        }

        let value = match self.bounds {
            None => self.value.ok_or_else(|| ParameterError::MissingValue {
                name: self.name.clone(),
            })?,
            Some(_) => {
                let fraction = fraction.ok_or_else(|| ParameterError::MissingInput {
                    name: self.name.clone(),
                    key: "fraction".to_string(),
                })?;
                self.value(fraction)?
            }
        };

        let mut output = Outputs::with_capacity(2);
        output.insert(self.name.clone(), value);
        if let Some(reference) = self.reference_value {
            output.insert(self.reference_key(), reference);
        }

        Ok(output)
    }

    /// Store a reference value delivered by another component
    pub fn receive(&mut self, value: f64) {
        self.reference_value = Some(value);
    }

    /// Receive requests from other components
    ///
    /// Only the first entry is kept; an empty request set leaves the current
    /// reference value untouched.
    pub fn receive_requests<K, I>(&mut self, requests: I)
    where
        I: IntoIterator<Item = (K, f64)>,
    {
        if let Some((_, value)) = requests.into_iter().next() {
            self.receive(value);
        }
    }

    pub fn clear_reference(&mut self) {
        self.reference_value = None;
    }
}
