//! Terminal plotting for the daily temperature series.

pub mod ascii;

pub use ascii::*;
