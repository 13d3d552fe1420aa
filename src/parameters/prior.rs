//! Prior distributions for free parameters
//!
//! A [`Prior`] describes how a free parameter is distributed between its
//! bounds. Priors live in the parameter's transformed domain: for a
//! log-scaled parameter every method receives and returns natural-log values.
//!
//! The transform a sampler uses is `u -> fraction`, where `u` is uniform on
//! [0, 1] and `fraction` is the hypercube coordinate that
//! [`Parameter::value`](crate::parameters::Parameter::value) consumes. For the
//! flat prior this map is the identity.

use std::fmt;

use statrs::distribution::{Continuous, ContinuousCDF, Normal};
use thiserror::Error;

use crate::parameters::bounds::Bounds;

/// Errors that can occur when constructing a prior
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PriorError {
    #[error("Gaussian prior requires a finite, positive sigma, got {sigma}")]
    InvalidSigma { sigma: f64 },

    #[error("Gaussian prior requires a finite mean, got {mu}")]
    InvalidMean { mu: f64 },

    #[error("Power-law prior requires a finite exponent, got {alpha}")]
    InvalidExponent { alpha: f64 },

    #[error("Power-law prior requires strictly positive bounds, got min {min}")]
    NonPositiveSupport { min: f64 },
}

/// Probability distribution of a free parameter inside its bounds.
pub trait Prior: fmt::Debug + Send + Sync {
    /// Natural log of the (possibly unnormalised) density at `x`.
    fn ln_density(&self, x: f64) -> f64;

    /// Fraction of the prior mass inside `[bounds.min(), x]`.
    fn cdf(&self, x: f64, bounds: &Bounds) -> f64;

    /// Point below which a fraction `u` of the prior mass lies.
    fn inverse_cdf(&self, u: f64, bounds: &Bounds) -> f64;

    /// Map a uniform variate to the hypercube fraction of the matching point.
    fn prior_fraction(&self, u: f64, bounds: &Bounds) -> f64 {
        bounds.unlerp(self.inverse_cdf(u, bounds))
    }

    /// Check that this prior can be used with the given bounds.
    fn validate(&self, _bounds: &Bounds) -> Result<(), PriorError> {
        Ok(())
    }
}

/// Flat prior: every point inside the bounds is equally likely.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Uniform;

impl Prior for Uniform {
    fn ln_density(&self, _x: f64) -> f64 {
        0.0
    }

    fn cdf(&self, x: f64, bounds: &Bounds) -> f64 {
        bounds.unlerp(x).clamp(0.0, 1.0)
    }

    fn inverse_cdf(&self, u: f64, bounds: &Bounds) -> f64 {
        bounds.lerp(u)
    }

    fn prior_fraction(&self, u: f64, _bounds: &Bounds) -> f64 {
        u
    }
}

/// Normal prior truncated to the parameter bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gaussian {
    mu: f64,
    sigma: f64,
    normal: Normal,
}

impl Gaussian {
    /// Create a Gaussian prior with mean `mu` and standard deviation `sigma`.
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::parameters::prior::Gaussian;
    ///
    /// assert!(Gaussian::new(0.0, 1.0).is_ok());
    /// assert!(Gaussian::new(0.0, 0.0).is_err());
    /// ```
    pub fn new(mu: f64, sigma: f64) -> Result<Self, PriorError> {
        if !mu.is_finite() {
            return Err(PriorError::InvalidMean { mu });
        }
        if !sigma.is_finite() || sigma <= 0.0 {
            return Err(PriorError::InvalidSigma { sigma });
        }
        let normal = Normal::new(mu, sigma).map_err(|_| PriorError::InvalidSigma { sigma })?;

        Ok(Self { mu, sigma, normal })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    fn mass(&self, bounds: &Bounds) -> (f64, f64) {
        let lo = self.normal.cdf(bounds.min());
        let hi = self.normal.cdf(bounds.max());
        (lo, hi - lo)
    }
}

impl Prior for Gaussian {
    fn ln_density(&self, x: f64) -> f64 {
        self.normal.ln_pdf(x)
    }

    fn cdf(&self, x: f64, bounds: &Bounds) -> f64 {
        let (lo, mass) = self.mass(bounds);
        if mass <= 0.0 || !mass.is_finite() {
            return Uniform.cdf(x, bounds);
        }
        ((self.normal.cdf(x) - lo) / mass).clamp(0.0, 1.0)
    }

    fn inverse_cdf(&self, u: f64, bounds: &Bounds) -> f64 {
        if u.is_nan() {
            return f64::NAN;
        }
        let (lo, mass) = self.mass(bounds);
        // All of the mass sits in an unresolvable tail; fall back to flat.
        if mass <= 0.0 || !mass.is_finite() {
            return bounds.lerp(u);
        }
        let p = (lo + u.clamp(0.0, 1.0) * mass).clamp(0.0, 1.0);
        bounds.clamp(self.normal.inverse_cdf(p))
    }
}

/// Power-law prior with density proportional to `x^alpha` inside the bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerLaw {
    alpha: f64,
}

impl PowerLaw {
    pub fn new(alpha: f64) -> Result<Self, PriorError> {
        if !alpha.is_finite() {
            return Err(PriorError::InvalidExponent { alpha });
        }
        Ok(Self { alpha })
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    fn is_logarithmic(&self) -> bool {
        (self.alpha + 1.0).abs() < f64::EPSILON
    }
}

impl Prior for PowerLaw {
    fn ln_density(&self, x: f64) -> f64 {
        if x <= 0.0 {
            return f64::NEG_INFINITY;
        }
        self.alpha * x.ln()
    }

    fn cdf(&self, x: f64, bounds: &Bounds) -> f64 {
        let (a, b) = (bounds.min(), bounds.max());
        let x = bounds.clamp(x);
        let f = if self.is_logarithmic() {
            (x / a).ln() / (b / a).ln()
        } else {
            let k = self.alpha + 1.0;
            (x.powf(k) - a.powf(k)) / (b.powf(k) - a.powf(k))
        };
        f.clamp(0.0, 1.0)
    }

    fn inverse_cdf(&self, u: f64, bounds: &Bounds) -> f64 {
        let (a, b) = (bounds.min(), bounds.max());
        let u = u.clamp(0.0, 1.0);
        let x = if self.is_logarithmic() {
            a * (b / a).powf(u)
        } else {
            let k = self.alpha + 1.0;
            (a.powf(k) + u * (b.powf(k) - a.powf(k))).powf(1.0 / k)
        };
        bounds.clamp(x)
    }

    fn validate(&self, bounds: &Bounds) -> Result<(), PriorError> {
        if bounds.min() <= 0.0 {
            return Err(PriorError::NonPositiveSupport { min: bounds.min() });
        }
        Ok(())
    }
}
