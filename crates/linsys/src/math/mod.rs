//! Dense `f64` containers used throughout the crate.
//!
//! `Vector` and `Matrix` own a single contiguous buffer each. Copies are deep,
//! arithmetic returns fresh values, and shape problems come back as
//! `LinAlgError` instead of panicking.
pub mod matrix;
pub mod vector;

pub use matrix::{Matrix, PSEUDO_INVERSE_RIDGE, SINGULARITY_TOLERANCE};
pub use vector::Vector;
