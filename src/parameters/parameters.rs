//! Parameters collection implementation
//!
//! This module provides the Parameters struct, an ordered collection of
//! Parameter objects that together define a model's parameter space. Each free
//! parameter owns one dimension of the sampler's unit hypercube, in insertion
//! order; fixed parameters own none.

use rand::Rng;
use rand_distr::{Distribution, Uniform};

use crate::parameters::outputs::Outputs;
use crate::parameters::parameter::{Parameter, ParameterError};

/// An ordered collection of model parameters
#[derive(Debug, Default)]
pub struct Parameters {
    params: Vec<Parameter>,
}

impl Parameters {
    /// Create a new empty parameters collection
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::parameters::Parameters;
    ///
    /// let params = Parameters::new();
    /// assert_eq!(params.len(), 0);
    /// assert_eq!(params.ndim(), 0);
    /// ```
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a parameter to the collection
    ///
    /// # Returns
    ///
    /// `Ok(())` if the parameter was added successfully, or an error if a parameter
    /// with the same name already exists
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::parameters::{Parameter, Parameters};
    ///
    /// let mut params = Parameters::new();
    /// params.add(Parameter::uniform("vejecta", 1.0e3, 3.0e4).unwrap()).unwrap();
    /// params.add(Parameter::fixed("redshift", 0.02)).unwrap();
    /// assert_eq!(params.len(), 2);
    /// assert_eq!(params.ndim(), 1);
    /// assert!(params.add(Parameter::fixed("redshift", 0.0)).is_err());
    /// ```
    pub fn add(&mut self, param: Parameter) -> Result<(), ParameterError> {
        if self.contains(param.name()) {
            return Err(ParameterError::DuplicateName {
                name: param.name().to_string(),
            });
        }

        self.params.push(param);
        Ok(())
    }

    /// Get a parameter by name
    pub fn get(&self, name: &str) -> Option<&Parameter> {
        self.params.iter().find(|p| p.name() == name)
    }

    /// Get a mutable reference to a parameter by name
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Parameter> {
        self.params.iter_mut().find(|p| p.name() == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Iterate over all parameters in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter()
    }

    /// Iterate over the free parameters in hypercube order
    pub fn free_parameters(&self) -> impl Iterator<Item = &Parameter> {
        self.params.iter().filter(|p| p.is_free())
    }

    /// Names of the free parameters in hypercube order
    pub fn free_names(&self) -> Vec<&str> {
        self.free_parameters().map(|p| p.name()).collect()
    }

    /// Number of hypercube dimensions
    pub fn ndim(&self) -> usize {
        self.free_parameters().count()
    }

    fn check_dimension(&self, actual: usize) -> Result<(), ParameterError> {
        let expected = self.ndim();
        if expected != actual {
            return Err(ParameterError::DimensionMismatch { expected, actual });
        }
        Ok(())
    }

    /// Deliver a reference value to the named parameter
    ///
    /// # Returns
    ///
    /// `Ok(())` if the value was delivered, or an error if no such parameter exists
    pub fn send_reference(&mut self, name: &str, value: f64) -> Result<(), ParameterError> {
        let param = self
            .get_mut(name)
            .ok_or_else(|| ParameterError::ParameterNotFound {
                name: name.to_string(),
            })?;
        param.receive(value);
        Ok(())
    }

    /// Map a hypercube point to physical parameter values
    ///
    /// # Arguments
    ///
    /// * `hypercube` - One fraction per free parameter, in hypercube order
    ///
    /// # Returns
    ///
    /// The resolved values of every parameter (and any published reference
    /// values) in insertion order, or an error if the dimensions disagree
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::parameters::{Parameter, Parameters};
    ///
    /// let mut params = Parameters::new();
    /// params.add(Parameter::uniform("a", 0.0, 10.0).unwrap()).unwrap();
    /// params.add(Parameter::fixed("b", 2.0)).unwrap();
    /// params.add(Parameter::log_uniform("c", 1.0, 100.0).unwrap()).unwrap();
    ///
    /// let resolved = params.process(&[0.5, 0.5]).unwrap();
    /// assert_eq!(resolved.get("a"), Some(5.0));
    /// assert_eq!(resolved.get("b"), Some(2.0));
    /// assert!((resolved.get("c").unwrap() - 10.0).abs() < 1e-10);
    /// ```
    pub fn process(&self, hypercube: &[f64]) -> Result<Outputs, ParameterError> {
        self.process_with_resolved(Outputs::new(), hypercube)
    }

    /// Map a hypercube point on top of externally supplied values
    ///
    /// Parameters whose names are already in `resolved` keep the supplied value.
    /// They still consume their hypercube coordinate so that dimensions stay aligned.
    pub fn process_with_resolved(
        &self,
        mut resolved: Outputs,
        hypercube: &[f64],
    ) -> Result<Outputs, ParameterError> {
        self.check_dimension(hypercube.len())?;

        let mut coordinates = hypercube.iter().copied();
        for param in &self.params {
            let fraction = if param.is_free() {
                coordinates.next()
            } else {
                None
            };
            let output = param.process(&resolved, fraction)?;
            resolved.extend(output);
        }

        Ok(resolved)
    }

    /// Map uniform variates to hypercube fractions following each prior
    pub fn prior_transform(&self, u: &[f64]) -> Result<Vec<f64>, ParameterError> {
        self.check_dimension(u.len())?;

        Ok(self
            .free_parameters()
            .zip(u)
            .map(|(param, &u)| param.prior_cdf(u))
            .collect())
    }

    /// Sum of the log prior densities of the free parameters
    ///
    /// # Arguments
    ///
    /// * `resolved` - Physical values, e.g. the output of [`Parameters::process`]
    pub fn ln_prior(&self, resolved: &Outputs) -> Result<f64, ParameterError> {
        self.free_parameters().try_fold(0.0, |acc, param| {
            let value = resolved
                .get(param.name())
                .ok_or_else(|| ParameterError::MissingInput {
                    name: param.name().to_string(),
                    key: param.name().to_string(),
                })?;
            Ok(acc + param.lnprior_pdf(value))
        })
    }

    /// Draw a uniformly distributed hypercube point
    pub fn random_fractions<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<f64> {
        let unit = Uniform::new(0.0, 1.0);
        (0..self.ndim()).map(|_| unit.sample(rng)).collect()
    }

    /// Hypercube fractions of the given physical values, clipped to [0, 1]
    pub fn fractions(&self, resolved: &Outputs) -> Result<Vec<f64>, ParameterError> {
        self.free_parameters()
            .map(|param| {
                let value = resolved
                    .get(param.name())
                    .ok_or_else(|| ParameterError::MissingInput {
                        name: param.name().to_string(),
                        key: param.name().to_string(),
                    })?;
                param.fraction(value, true)
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a Parameters {
    type Item = &'a Parameter;
    type IntoIter = std::slice::Iter<'a, Parameter>;

    fn into_iter(self) -> Self::IntoIter {
        self.params.iter()
    }
}
