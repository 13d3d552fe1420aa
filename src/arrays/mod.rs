//! Helpers that build the arrays other components evaluate on.

mod dense_times;

pub use dense_times::{DenseTimes, DenseTimesError};
