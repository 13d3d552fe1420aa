//! # Parameter System
//!
//! This module maps samples from a unit hypercube onto physical model parameters.
//! It is the bridge between a sampler, which only knows about points in `[0, 1]^d`,
//! and the physical components of a model, which need values in physical units.
//!
//! ## Key Features
//!
//! - **Free and fixed parameters**: A parameter with a range is sampled; without one it yields a fixed value
//! - **Log-uniform sampling**: Ranges can be sampled in natural-log space
//! - **Clipping**: Out-of-range fractions are clipped, with a one-shot warning
//! - **Reference values**: A parameter can republish a value received from another component
//! - **Priors**: Flat, truncated Gaussian and power-law priors, held by composition
//! - **Serialization Support**: Build parameter collections from JSON definitions
//!
//! ## Core Components
//!
//! - [`Parameter`]: A single free or fixed parameter
//! - [`Parameters`]: An ordered collection mapping a whole hypercube point
//! - [`Bounds`]: The sampling interval of a free parameter
//! - [`Prior`]: Distribution of a free parameter inside its bounds
//! - [`Outputs`]: Insertion-ordered name → value map
//!
//! ## Example Usage
//!
//! ```rust
//! use lcfit_rs::parameters::{Parameter, Parameters};
//!
//! let mut params = Parameters::new();
//! params.add(Parameter::uniform("texplosion", -20.0, 0.0).unwrap()).unwrap();
//! params.add(Parameter::log_uniform("mejecta", 0.1, 10.0).unwrap()).unwrap();
//! params.add(Parameter::fixed("redshift", 0.03)).unwrap();
//!
//! // One coordinate per free parameter
//! let resolved = params.process(&[0.5, 0.5]).unwrap();
//! assert_eq!(resolved.get("texplosion"), Some(-10.0));
//! assert!((resolved.get("mejecta").unwrap() - 1.0).abs() < 1e-12);
//! assert_eq!(resolved.get("redshift"), Some(0.03));
//! ```

pub mod bounds;
pub mod config;
pub mod outputs;
pub mod parameter;
pub mod parameters;
pub mod prior;


// Re-export key types
pub use bounds::{Bounds, BoundsError};
pub use config::{ParameterConfig, PriorConfig};
pub use outputs::Outputs;
pub use parameter::{Parameter, ParameterBuilder, ParameterError, REFERENCE_PREFIX};
pub use parameters::Parameters;
pub use prior::{Gaussian, PowerLaw, Prior, PriorError, Uniform};
