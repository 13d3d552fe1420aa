//! Physical constants in CGS units.
//!
//! Values follow CODATA 2018 as tabulated by astropy.

use std::f64::consts::PI;

/// 4π
pub const FOUR_PI: f64 = 4.0 * PI;

/// Speed of light [cm s⁻¹]
pub const C_CGS: f64 = 2.997_924_58e10;

/// Planck constant [erg s]
pub const H_CGS: f64 = 6.626_070_15e-27;

/// Boltzmann constant [erg K⁻¹]
pub const K_B_CGS: f64 = 1.380_649e-16;

/// Stefan-Boltzmann constant [erg cm⁻² s⁻¹ K⁻⁴]
pub const SIGMA_SB_CGS: f64 = 5.670_374_419e-5;

/// One Ångström in centimetres
pub const ANGSTROM_CGS: f64 = 1.0e-8;

/// One day in seconds
pub const DAY_CGS: f64 = 86_400.0;
