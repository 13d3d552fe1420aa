//! Parameter bounds implementation
//!
//! A [`Bounds`] value is the closed interval a free parameter is sampled from.
//! It provides the linear map between a unit-interval fraction and the
//! interval itself, which is the core of turning a hypercube sample into a
//! parameter value.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur when working with parameter bounds
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BoundsError {
    #[error("Invalid bounds: min ({min}) must not exceed max ({max})")]
    InvalidBounds { min: f64, max: f64 },
}

/// A closed, finite-or-infinite interval `[min, max]` with `min <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBounds")]
pub struct Bounds {
    min: f64,
    max: f64,
}

#[derive(Deserialize)]
struct RawBounds {
    min: f64,
    max: f64,
}

impl TryFrom<RawBounds> for Bounds {
    type Error = BoundsError;

    fn try_from(raw: RawBounds) -> Result<Self, Self::Error> {
        Bounds::new(raw.min, raw.max)
    }
}

impl Bounds {
    /// Create a new interval
    ///
    /// # Arguments
    ///
    /// * `min` - Lower end of the interval
    /// * `max` - Upper end of the interval
    ///
    /// # Returns
    ///
    /// A new `Bounds` object if `min <= max` and neither end is NaN, or an error otherwise
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::parameters::bounds::Bounds;
    ///
    /// let bounds = Bounds::new(0.0, 10.0).unwrap();
    /// assert_eq!(bounds.min(), 0.0);
    /// assert_eq!(bounds.max(), 10.0);
    /// assert!(Bounds::new(10.0, 0.0).is_err());
    /// ```
    pub fn new(min: f64, max: f64) -> Result<Self, BoundsError> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(BoundsError::InvalidBounds { min, max });
        }

        Ok(Self { min, max })
    }

    /// Lower end of the interval
    pub fn min(&self) -> f64 {
        self.min
    }

    /// Upper end of the interval
    pub fn max(&self) -> f64 {
        self.max
    }

    /// Width of the interval
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Whether the interval has zero width
    pub fn is_degenerate(&self) -> bool {
        self.min == self.max
    }

    /// Check if a value lies inside the interval
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp a value to the interval
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    /// Map a fraction in [0, 1] onto the interval
    ///
    /// The result is clamped so that floating-point overshoot at exactly 0 or 1
    /// (or a sampler proposing slightly outside the cube) never escapes the interval.
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::parameters::bounds::Bounds;
    ///
    /// let bounds = Bounds::new(2.0, 4.0).unwrap();
    /// assert_eq!(bounds.lerp(0.5), 3.0);
    /// assert_eq!(bounds.lerp(1.5), 4.0);
    /// ```
    pub fn lerp(&self, fraction: f64) -> f64 {
        self.clamp(fraction * (self.max - self.min) + self.min)
    }

    /// Inverse of [`Bounds::lerp`], without clamping
    pub fn unlerp(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// The same interval in natural-log space
    ///
    /// Callers must make sure both ends are strictly positive.
    pub fn ln(&self) -> Result<Self, BoundsError> {
        Self::new(self.min.ln(), self.max.ln())
    }
}
