//! Thickness profiles: fixed-resolution sampling and display smoothing.

pub mod sampling;
pub mod smoothing;

pub use sampling::*;
pub use smoothing::*;
