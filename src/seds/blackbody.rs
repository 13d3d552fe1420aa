//! Blackbody spectral energy distribution for a given temperature and radius.
//!
//! Each epoch's spectrum is the Planck law at the photospheric temperature,
//! scaled by the photospheric surface area:
//!
//! F_λ = 4π · 2πhc² · R² / λ⁵ / (exp(hc / λkT) − 1)
//!
//! expressed per Ångström at the photosphere. Distance dilution is left to
//! the observable layer.

use std::f64::consts::PI;
use std::sync::Arc;

use ndarray::{array, Array1};
use serde::{Deserialize, Serialize};

use crate::constants::{ANGSTROM_CGS, C_CGS, FOUR_PI, H_CGS, K_B_CGS, SIGMA_SB_CGS};
use crate::seds::{add_to_existing_seds, Channel, Sed, SedError, SedInputs, SedOutput};
use crate::utils::map_ordered;

/// Configuration options for the blackbody SED.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlackbodyConfig {
    /// Evaluate epochs on the Rayon thread pool. Default: true
    pub parallel: bool,
}

impl Default for BlackbodyConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

/// Blackbody SED component.
#[derive(Debug, Clone, Default)]
pub struct Blackbody {
    config: BlackbodyConfig,
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

impl Blackbody {
    pub const C_CONST: f64 = C_CGS;

    /// 4π · 2πhc², per Ångström
    pub const FLUX_CONST: f64 = FOUR_PI * 2.0 * H_CGS * C_CGS * C_CGS * PI * ANGSTROM_CGS;

    /// hc / k_B [cm K]
    pub const X_CONST: f64 = H_CGS * C_CGS / K_B_CGS;

    /// 4πσ_SB
    pub const STEF_CONST: f64 = FOUR_PI * SIGMA_SB_CGS;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: BlackbodyConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &BlackbodyConfig {
        &self.config
    }

    /// Effective temperature of a photosphere with the given luminosity and radius
    pub fn temperature(luminosity: f64, radius: f64) -> f64 {
        (luminosity / (Self::STEF_CONST * radius * radius)).powf(0.25)
    }

    /// Luminosity of a photosphere with the given radius and temperature
    pub fn luminosity(radius: f64, temperature: f64) -> f64 {
        Self::STEF_CONST * radius * radius * temperature.powi(4)
    }
}

impl Sed for Blackbody {
    fn process(&self, inputs: &SedInputs<'_>) -> Result<SedOutput, SedError> {
        let channels = inputs.channels()?;
        let n_epochs = inputs.n_epochs();
        let bands = inputs.bands;
        let zp1 = 1.0 + inputs.redshift;

        tracing::debug!(
            epochs = n_epochs,
            bands = bands.len(),
            parallel = self.config.parallel,
            "evaluating blackbody SEDs"
        );

        // Bound once per batch, re-evaluated for every epoch
        let (fc, xc, cc) = (Self::FLUX_CONST, Self::X_CONST, Self::C_CONST);
        let planck = move |radius: f64, temperature: f64, rest_wav: f64| -> f64 {
            fc * radius * radius / rest_wav.powi(5) / (xc / rest_wav / temperature).exp_m1()
        };

        let seds = map_ordered(n_epochs, self.config.parallel, |li| {
            let luminosity = inputs.luminosities[li];
            let radius = inputs.radius_phot[li];
            let temperature = inputs.temperature_phot[li];

            match channels[li] {
                Channel::Band(bi) => {
                    let wavelengths = &bands[bi].wavelengths;
                    if luminosity == 0.0 {
                        return Array1::zeros(wavelengths.len());
                    }
                    wavelengths.mapv(|w| {
                        finite_or_zero(planck(radius, temperature, w * ANGSTROM_CGS / zp1))
                    })
                }
                Channel::Frequency(frequency) => {
                    if luminosity == 0.0 {
                        return array![0.0];
                    }
                    let rest_wav = cc / (frequency * zp1);
                    let flux = finite_or_zero(planck(radius, temperature, rest_wav));
                    // Per-wavelength to per-frequency
                    array![finite_or_zero(flux * rest_wav * rest_wav / cc)]
                }
            }
        });

        let seds = add_to_existing_seds(seds, inputs.existing_seds)?;

        Ok(SedOutput {
            bands: Arc::clone(bands),
            seds,
        })
    }
}
