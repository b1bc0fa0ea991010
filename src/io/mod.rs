//! Input/output helpers.
//!
//! - weather log ingest + validation (`ingest`)
//! - summary text file and CSV exports (`export`)
//! - summary JSON read/write (`summary`)

pub mod export;
pub mod ingest;
pub mod summary;

pub use export::*;
pub use ingest::*;
pub use summary::*;
