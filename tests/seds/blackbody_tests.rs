//! Integration tests for the blackbody SED

use std::sync::Arc;

use approx::assert_relative_eq;
use lcfit_rs::constants::{C_CGS, DAY_CGS};
use lcfit_rs::seds::{add_to_existing_seds, Band, Blackbody, BlackbodyConfig, Sed, SedError, SedInputs};
use ndarray::{array, Array1};

use crate::test_helpers::{array_rel_eq, optical_bands};

/// A cooling, expanding photosphere observed in B, V, R and at 5 GHz
struct LightCurve {
    luminosities: Vec<f64>,
    radius_phot: Vec<f64>,
    temperature_phot: Vec<f64>,
    band_indices: Vec<i64>,
    frequencies: Vec<f64>,
}

impl LightCurve {
    fn new(n_epochs: usize) -> Self {
        let times: Vec<f64> = (0..n_epochs).map(|i| (1.0 + i as f64) * DAY_CGS).collect();
        let radius_phot: Vec<f64> = times.iter().map(|t| 1.0e9 * t).collect();
        let temperature_phot: Vec<f64> = (0..n_epochs)
            .map(|i| 1.5e4 * (1.0 + i as f64).powf(-0.5))
            .collect();
        let luminosities = radius_phot
            .iter()
            .zip(&temperature_phot)
            .map(|(&r, &t)| Blackbody::luminosity(r, t))
            .collect();
        let band_indices = (0..n_epochs)
            .map(|i| if i % 4 == 3 { -1 } else { (i % 4) as i64 })
            .collect();

        Self {
            luminosities,
            radius_phot,
            temperature_phot,
            band_indices,
            frequencies: vec![5.0e9; n_epochs],
        }
    }

    fn inputs<'a>(&'a self, bands: &'a Arc<[Band]>, redshift: f64) -> SedInputs<'a> {
        SedInputs {
            luminosities: &self.luminosities,
            radius_phot: &self.radius_phot,
            temperature_phot: &self.temperature_phot,
            redshift,
            bands,
            band_indices: &self.band_indices,
            frequencies: &self.frequencies,
            existing_seds: None,
        }
    }
}

#[test]
fn test_one_spectrum_per_epoch() {
    let bands = optical_bands();
    let curve = LightCurve::new(12);
    let output = Blackbody::new().process(&curve.inputs(&bands, 0.0)).unwrap();

    assert_eq!(output.seds.len(), 12);
    assert!(Arc::ptr_eq(&output.bands, &bands));
    for (sed, &index) in output.seds.iter().zip(&curve.band_indices) {
        let expected = if index < 0 {
            1
        } else {
            bands[index as usize].len()
        };
        assert_eq!(sed.len(), expected);
        assert!(sed.iter().all(|f| f.is_finite() && *f > 0.0));
    }
}

#[test]
fn test_sequential_matches_parallel() {
    let bands = optical_bands();
    let curve = LightCurve::new(40);
    let inputs = curve.inputs(&bands, 0.2);

    let sequential = Blackbody::with_config(BlackbodyConfig { parallel: false })
        .process(&inputs)
        .unwrap();
    let parallel = Blackbody::with_config(BlackbodyConfig { parallel: true })
        .process(&inputs)
        .unwrap();

    assert_eq!(sequential.seds, parallel.seds);
}

#[test]
fn test_spectrum_matches_planck_law() {
    let bands: Arc<[Band]> = vec![Band::new("grid", array![2000.0, 5000.0, 2.0e4])].into();
    let (radius, temperature) = (1.0e15, 8000.0);
    let inputs = SedInputs {
        luminosities: &[Blackbody::luminosity(radius, temperature)],
        radius_phot: &[radius],
        temperature_phot: &[temperature],
        redshift: 0.0,
        bands: &bands,
        band_indices: &[0],
        frequencies: &[0.0],
        existing_seds: None,
    };
    let output = Blackbody::new().process(&inputs).unwrap();

    // 4πR² · πB_λ(T), per Ångström
    let expected = bands[0].wavelengths.mapv(|w| {
        let lam = w * 1.0e-8;
        let b_lambda = 2.0 * 6.62607015e-27 * C_CGS * C_CGS
            / lam.powi(5)
            / ((6.62607015e-27 * C_CGS / (lam * 1.380649e-16 * temperature)).exp() - 1.0);
        4.0 * std::f64::consts::PI * radius * radius * std::f64::consts::PI * b_lambda * 1.0e-8
    });
    assert!(array_rel_eq(&output.seds[0], &expected, 1e-10));
}

#[test]
fn test_hotter_is_bluer() {
    let bands: Arc<[Band]> = vec![Band::new("UI", array![3500.0, 8500.0])].into();
    let ratio = |temperature: f64| {
        let inputs = SedInputs {
            luminosities: &[1.0],
            radius_phot: &[1.0e14],
            temperature_phot: &[temperature],
            redshift: 0.0,
            bands: &bands,
            band_indices: &[0],
            frequencies: &[0.0],
            existing_seds: None,
        };
        let sed = Blackbody::new().process(&inputs).unwrap().seds.remove(0);
        sed[0] / sed[1]
    };

    assert!(ratio(2.0e4) > ratio(1.0e4));
    assert!(ratio(1.0e4) > ratio(5.0e3));
}

#[test]
fn test_components_stack() {
    let bands = optical_bands();
    let curve = LightCurve::new(8);
    let first = Blackbody::new().process(&curve.inputs(&bands, 0.0)).unwrap();

    // A second, cooler component on top of the first
    let cooler: Vec<f64> = curve.temperature_phot.iter().map(|t| 0.5 * t).collect();
    let second_inputs = SedInputs {
        temperature_phot: &cooler,
        existing_seds: Some(first.seds.as_slice()),
        ..curve.inputs(&bands, 0.0)
    };
    let stacked = Blackbody::new().process(&second_inputs).unwrap();

    let alone = Blackbody::new()
        .process(&SedInputs {
            existing_seds: None,
            ..second_inputs
        })
        .unwrap();
    let summed = add_to_existing_seds(alone.seds, Some(first.seds.as_slice())).unwrap();
    assert_eq!(stacked.seds, summed);
    for (total, part) in stacked.seds.iter().zip(&first.seds) {
        assert!(total.iter().zip(part).all(|(t, p)| t > p));
    }
}

#[test]
fn test_mismatched_existing_seds() {
    let bands = optical_bands();
    let curve = LightCurve::new(4);
    let existing = vec![Array1::zeros(1); 4];
    let inputs = SedInputs {
        existing_seds: Some(existing.as_slice()),
        ..curve.inputs(&bands, 0.0)
    };

    // Epoch 0 is sampled on B, which has more than one wavelength
    assert!(matches!(
        Blackbody::new().process(&inputs),
        Err(SedError::ShapeMismatch { epoch: 0, .. })
    ));
}

#[test]
fn test_invalid_inputs_are_rejected() {
    let bands = optical_bands();
    let curve = LightCurve::new(4);

    let inputs = SedInputs {
        band_indices: &[0, 1, 2, 3],
        ..curve.inputs(&bands, 0.0)
    };
    assert!(matches!(
        Blackbody::new().process(&inputs),
        Err(SedError::BandIndexOutOfRange { epoch: 3, .. })
    ));

    assert!(matches!(
        Blackbody::new().process(&curve.inputs(&bands, -1.5)),
        Err(SedError::InvalidRedshift { .. })
    ));
}

#[test]
fn test_temperature_from_luminosity() {
    let radius = 3.0e14;
    for temperature in [3.0e3, 6.0e3, 1.2e4, 5.0e4] {
        let luminosity = Blackbody::luminosity(radius, temperature);
        assert_relative_eq!(
            Blackbody::temperature(luminosity, radius),
            temperature,
            max_relative = 1e-12
        );
    }
}
