//! Domain models for the sample tracker.

mod draft;
mod sample;

pub use draft::*;
pub use sample::*;
