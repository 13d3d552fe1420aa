//! Spectral energy distributions.
//!
//! An SED component turns per-epoch physical quantities (luminosity,
//! photospheric radius and temperature) into per-epoch flux-density arrays.
//! Each epoch is evaluated either on the sample wavelength grid of a
//! photometric band or at a single frequency.
//!
//! Spectra from several emission components are additive: a component sums
//! its fresh spectra into any spectra handed to it by earlier components
//! (see [`add_to_existing_seds`]).

use std::sync::Arc;

use ndarray::Array1;
use thiserror::Error;

mod blackbody;

pub use blackbody::{Blackbody, BlackbodyConfig};

/// Errors that can occur during SED evaluation
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SedError {
    #[error("Input '{field}' has {actual} entries, expected {expected} (one per epoch)")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Epoch {epoch} refers to band index {index}, but only {n_bands} bands are defined")]
    BandIndexOutOfRange {
        epoch: usize,
        index: i64,
        n_bands: usize,
    },

    #[error("Redshift must be greater than -1, got {redshift}")]
    InvalidRedshift { redshift: f64 },

    #[error("Existing SED for epoch {epoch} has {actual} samples, new SED has {expected}")]
    ShapeMismatch {
        epoch: usize,
        expected: usize,
        actual: usize,
    },
}

/// A photometric band with its observed-frame sample wavelengths
#[derive(Debug, Clone, PartialEq)]
pub struct Band {
    pub name: String,

    /// Sample wavelengths in Ångström
    pub wavelengths: Array1<f64>,
}

impl Band {
    pub fn new(name: &str, wavelengths: Array1<f64>) -> Self {
        Self {
            name: name.to_string(),
            wavelengths,
        }
    }

    pub fn len(&self) -> usize {
        self.wavelengths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.wavelengths.is_empty()
    }
}

/// Where an epoch's spectrum is evaluated
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Channel {
    /// On the sample wavelength grid of the band with this index
    Band(usize),

    /// At a single observed-frame frequency [Hz]
    Frequency(f64),
}

impl Channel {
    /// Decode a band index, where a negative index selects the epoch's frequency
    pub fn from_index(index: i64, frequency: f64) -> Self {
        if index < 0 {
            Channel::Frequency(frequency)
        } else {
            Channel::Band(index as usize)
        }
    }
}

/// Per-epoch inputs of an SED component
///
/// All per-epoch slices must have the same length.
#[derive(Debug, Clone, Copy)]
pub struct SedInputs<'a> {
    /// Bolometric luminosity per epoch [erg s⁻¹]
    pub luminosities: &'a [f64],

    /// Photospheric radius per epoch [cm]
    pub radius_phot: &'a [f64],

    /// Photospheric temperature per epoch [K]
    pub temperature_phot: &'a [f64],

    pub redshift: f64,

    /// Bands with their sample wavelength grids
    pub bands: &'a Arc<[Band]>,

    /// Band index per epoch; negative selects `frequencies`
    pub band_indices: &'a [i64],

    /// Observed-frame frequency per epoch [Hz], used by frequency-indexed epochs
    pub frequencies: &'a [f64],

    /// Spectra from other emission components to add onto, one per epoch
    pub existing_seds: Option<&'a [Array1<f64>]>,
}

impl<'a> SedInputs<'a> {
    pub fn n_epochs(&self) -> usize {
        self.luminosities.len()
    }

    /// Check per-epoch lengths and decode each epoch's channel
    pub fn channels(&self) -> Result<Vec<Channel>, SedError> {
        let expected = self.n_epochs();
        let fields: [(&'static str, usize); 4] = [
            ("radius_phot", self.radius_phot.len()),
            ("temperature_phot", self.temperature_phot.len()),
            ("band_indices", self.band_indices.len()),
            ("frequencies", self.frequencies.len()),
        ];
        for (field, actual) in fields {
            if actual != expected {
                return Err(SedError::LengthMismatch {
                    field,
                    expected,
                    actual,
                });
            }
        }
        if let Some(existing) = self.existing_seds {
            if existing.len() != expected {
                return Err(SedError::LengthMismatch {
                    field: "existing_seds",
                    expected,
                    actual: existing.len(),
                });
            }
        }
        if self.redshift.is_nan() || self.redshift <= -1.0 {
            return Err(SedError::InvalidRedshift {
                redshift: self.redshift,
            });
        }

        self.band_indices
            .iter()
            .zip(self.frequencies)
            .enumerate()
            .map(|(epoch, (&index, &frequency))| {
                let channel = Channel::from_index(index, frequency);
                match channel {
                    Channel::Band(bi) if bi >= self.bands.len() => {
                        Err(SedError::BandIndexOutOfRange {
                            epoch,
                            index,
                            n_bands: self.bands.len(),
                        })
                    }
                    _ => Ok(channel),
                }
            })
            .collect()
    }
}

/// Output of an SED component
#[derive(Debug, Clone)]
pub struct SedOutput {
    /// The bands the spectra were sampled on, shared with the inputs
    pub bands: Arc<[Band]>,

    /// One spectrum per epoch, in input order
    pub seds: Vec<Array1<f64>>,
}

/// A component that produces per-epoch spectra
pub trait Sed {
    /// Evaluate one batch of epochs
    fn process(&self, inputs: &SedInputs<'_>) -> Result<SedOutput, SedError>;
}

/// Sum freshly computed spectra into spectra from other components, epoch by epoch
///
/// # Arguments
///
/// * `seds` - Spectra computed by the current component
/// * `existing` - Spectra from earlier components, if any
///
/// # Returns
///
/// The summed spectra, or an error if an epoch's arrays differ in length
pub fn add_to_existing_seds(
    mut seds: Vec<Array1<f64>>,
    existing: Option<&[Array1<f64>]>,
) -> Result<Vec<Array1<f64>>, SedError> {
    let Some(existing) = existing else {
        return Ok(seds);
    };

    if existing.len() != seds.len() {
        return Err(SedError::LengthMismatch {
            field: "existing_seds",
            expected: seds.len(),
            actual: existing.len(),
        });
    }

    for (epoch, (sed, old)) in seds.iter_mut().zip(existing).enumerate() {
        if sed.len() != old.len() {
            return Err(SedError::ShapeMismatch {
                epoch,
                expected: sed.len(),
                actual: old.len(),
            });
        }
        *sed += old;
    }

    Ok(seds)
}
