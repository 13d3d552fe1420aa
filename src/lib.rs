//! # lcfit-rs
//!
//! `lcfit-rs` provides building blocks for Bayesian fitting of transient light curves.
//!
//! The library provides:
//! - A parameter system that maps unit-hypercube samples onto physical values,
//!   with log-uniform sampling, clipping, fixed values and reference values
//! - Priors for free parameters (flat, truncated Gaussian and power law)
//! - A blackbody spectral energy distribution evaluated per epoch on band
//!   wavelength grids or at single frequencies
//! - Dense time grids for components that integrate over time
//!
//! ## Basic Usage
//!
//! ```
//! use std::sync::Arc;
//!
//! use lcfit_rs::parameters::{Parameter, Parameters};
//! use lcfit_rs::seds::{Band, Blackbody, Sed, SedInputs};
//! use ndarray::Array1;
//!
//! let mut params = Parameters::new();
//! params.add(Parameter::log_uniform("temperature", 3.0e3, 3.0e4).unwrap()).unwrap();
//! params.add(Parameter::fixed("radius", 1.0e15)).unwrap();
//!
//! let resolved = params.process(&[0.5]).unwrap();
//! let temperature = resolved.get("temperature").unwrap();
//! let radius = resolved.get("radius").unwrap();
//!
//! let bands: Arc<[Band]> = vec![Band::new("V", Array1::linspace(5000.0, 6000.0, 11))].into();
//! let luminosity = Blackbody::luminosity(radius, temperature);
//! let inputs = SedInputs {
//!     luminosities: &[luminosity],
//!     radius_phot: &[radius],
//!     temperature_phot: &[temperature],
//!     redshift: 0.0,
//!     bands: &bands,
//!     band_indices: &[0],
//!     frequencies: &[0.0],
//!     existing_seds: None,
//! };
//!
//! let output = Blackbody::new().process(&inputs).unwrap();
//! assert_eq!(output.seds[0].len(), 11);
//! assert!(output.seds[0].iter().all(|f| *f > 0.0));
//! ```

// Public modules
pub mod error;

// Physical constants in CGS units
pub mod constants;

// Warning sink shared by components
pub mod printer;

// Parameter system
pub mod parameters;

// Spectral energy distributions
pub mod seds;

// Evaluation grids
pub mod arrays;

mod utils;

// Re-exports for convenience
pub use error::{FitError, Result};
pub use parameters::{Outputs, Parameter, Parameters};
pub use printer::{Message, Printer};
pub use seds::{Blackbody, Sed};

/// Version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
