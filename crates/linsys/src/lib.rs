//! linsys: a small dense linear-algebra kernel.
//!
//! This crate provides owned `Matrix`/`Vector` containers with checked
//! arithmetic, a cofactor determinant, adjugate inverse and least-squares
//! pseudo-inverse, plus two solvers for square systems: Gaussian elimination
//! with partial pivoting and conjugate gradient for symmetric positive-definite
//! matrices. `solvers::build_solver` picks between them from a `SolverConfig`.
//!
//! Every fallible operation returns `error::Result`; nothing is modified in
//! place when an operation fails.
pub mod config;
pub mod error;
pub mod math;
pub mod regression;
pub mod solvers;

pub use error::{LinAlgError, Result};
pub use math::{Matrix, Vector};
pub use solvers::{build_solver, LinearSystem, PosSymLinSystem, Solver};
