//! Synthetic column augmentation for delimited text files.
//!
//! This crate loads a delimited text file, appends four synthetic columns
//! (boolean, float, integer, timestamp) to every record, and writes the
//! result to a destination file with CRLF terminators, echoing each produced
//! line as it goes.

pub mod checks;
pub mod engine;
pub mod errors;
pub mod loader;
pub mod model;
pub mod output;
pub mod synthetic;

pub use engine::AugmentEngine;
pub use errors::AugmentError;
pub use model::{AugmentOptions, AugmentReport, TimeZoneSpec};
