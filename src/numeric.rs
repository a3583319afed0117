//! Basic numerical concepts used throughout the crate

#![allow(missing_docs)]

// Floating-point precision is configured here
#[cfg(feature = "f32")]
pub type Float = f32;
#[cfg(feature = "f32")]
pub use std::f32 as floats;
#[cfg(not(feature = "f32"))]
pub type Float = f64;
#[cfg(not(feature = "f32"))]
pub use std::f64 as floats;

/// Energy units
///
/// Momenta and energies are expressed in MeV, following the convention of the
/// simulation framework that produces truth records. Thresholds are usually
/// more readable when written as a multiple of `GEV`.
///
pub mod units {
    use super::Float;

    pub const MEV: Float = 1.;
    pub const GEV: Float = 1000. * MEV;
}
