//! Dense time sampling between explosion and the last observation.
//!
//! Many transients have irregular cadence, but the physical components that
//! integrate over time (e.g. diffusion) need an evenly sampled grid. This
//! module builds a grid that is log-spaced in time since explosion and also
//! contains every observed epoch.

use ndarray::Array1;
use thiserror::Error;

/// Errors that can occur when building a dense time grid
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DenseTimesError {
    #[error("At least one observation time is required")]
    EmptyTimes,

    #[error("Dense grid needs at least one sample")]
    NoSamples,

    #[error("Cannot log-space a span of {span} days")]
    InvalidSpan { span: f64 },
}

/// Builds dense, log-spaced evaluation times
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DenseTimes {
    n_times: usize,
}

impl Default for DenseTimes {
    fn default() -> Self {
        Self {
            n_times: Self::N_TIMES,
        }
    }
}

impl DenseTimes {
    /// Default number of log-spaced samples
    pub const N_TIMES: usize = 100;

    /// Earliest sampled time after explosion [days]
    pub const L_T_MIN: f64 = 1.0e-3;

    /// Create a grid builder with `n_times` log-spaced samples
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::arrays::DenseTimes;
    ///
    /// assert!(DenseTimes::new(50).is_ok());
    /// assert!(DenseTimes::new(0).is_err());
    /// ```
    pub fn new(n_times: usize) -> Result<Self, DenseTimesError> {
        if n_times == 0 {
            return Err(DenseTimesError::NoSamples);
        }
        Ok(Self { n_times })
    }

    pub fn n_times(&self) -> usize {
        self.n_times
    }

    /// Build the dense grid
    ///
    /// # Arguments
    ///
    /// * `times` - Observation times [days]
    /// * `t_explosion` - Explosion time [days]
    ///
    /// # Returns
    ///
    /// If the last observation is after the explosion, the sorted, deduplicated
    /// union of `0.0`, `t_explosion + geomspace(L_T_MIN, max(times) - t_explosion)`
    /// and `times`. Otherwise `times` unchanged.
    ///
    /// # Examples
    ///
    /// ```
    /// use lcfit_rs::arrays::DenseTimes;
    ///
    /// let dense = DenseTimes::new(10).unwrap();
    /// let grid = dense.process(&[5.0, 20.0], 1.0).unwrap();
    /// assert_eq!(grid[0], 0.0);
    /// assert!(grid.contains(&5.0) && grid.contains(&20.0));
    /// assert!(grid.windows(2).all(|w| w[0] < w[1]));
    /// ```
    pub fn process(&self, times: &[f64], t_explosion: f64) -> Result<Vec<f64>, DenseTimesError> {
        if times.is_empty() {
            return Err(DenseTimesError::EmptyTimes);
        }

        let max_time = times.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max_time <= t_explosion {
            return Ok(times.to_vec());
        }

        let span = max_time - t_explosion;
        let offsets = Array1::geomspace(Self::L_T_MIN, span, self.n_times)
            .ok_or(DenseTimesError::InvalidSpan { span })?;

        let mut grid = Vec::with_capacity(1 + self.n_times + times.len());
        grid.push(0.0);
        grid.extend(offsets.iter().map(|dt| dt + t_explosion));
        grid.extend_from_slice(times);

        grid.sort_by(f64::total_cmp);
        grid.dedup();

        Ok(grid)
    }
}
