//! Predictor and thickness models.
//!
//! Models are small, pure functions over `Copy` inputs so that front-ends can
//! call them once per sample without any shared state.

pub mod coefficients;
pub mod predictor;
pub mod thickness;

pub use coefficients::*;
pub use predictor::*;
pub use thickness::*;
