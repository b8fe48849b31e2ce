//! `dsp-simulator` library crate.
//!
//! The numerical core is two pure functions:
//!
//! - [`models::predict`]: five clamped linear-regression metrics from the
//!   weighted upper/lower pressures
//! - [`models::thickness`]: wafer thickness vs. radius for a convex, flat or
//!   concave reference shape
//!
//! The binary (`dsp`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - rendering code only ever calls into the models, never the reverse

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod math;
pub mod models;
pub mod plot;
pub mod profile;
pub mod report;
