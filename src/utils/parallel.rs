//! Parallel processing utilities for batch evaluation.
//!
//! Batches of epochs are independent of each other, so they can be evaluated
//! across threads. Results always come back in index order.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Evaluate `f` for every index in `0..n`, returning results in index order.
///
/// When `parallel` is set and the crate is built with the `parallel` feature,
/// indices are distributed over the Rayon thread pool. Otherwise they are
/// evaluated sequentially on the calling thread.
///
/// # Arguments
///
/// * `n` - Number of items to evaluate
/// * `parallel` - Whether to use the thread pool
/// * `f` - Function evaluating a single item
///
/// # Returns
///
/// * `Vec<T>` - One result per index, in order
pub fn map_ordered<T, F>(n: usize, parallel: bool, f: F) -> Vec<T>
where
    T: Send,
    F: Fn(usize) -> T + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        if parallel {
            return (0..n).into_par_iter().map(f).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = parallel;

    (0..n).map(f).collect()
}
