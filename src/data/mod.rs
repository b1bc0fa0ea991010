//! Synthetic data generation for demos and testing.

pub mod sample;

pub use sample::*;
