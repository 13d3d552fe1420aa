//! Utility functions and helpers for the lcfit-rs library.

pub mod parallel;

pub use parallel::map_ordered;
