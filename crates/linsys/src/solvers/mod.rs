//! Linear-system solvers and the strategy selection between them.
pub mod conjugate_gradient;
pub mod direct;

pub use conjugate_gradient::{PosSymLinSystem, SYMMETRY_TOLERANCE};
pub use direct::LinearSystem;

use crate::config::{SolverConfig, SolverKind};
use crate::error::Result;
use crate::math::{Matrix, Vector};

/// A linear system bound to one solution strategy.
#[derive(Debug, Clone, Copy)]
pub enum Solver<'a> {
    Direct(LinearSystem<'a>),
    ConjugateGradient(PosSymLinSystem<'a>),
}

impl<'a> Solver<'a> {
    pub fn solve(&self) -> Result<Vector> {
        match self {
            Solver::Direct(system) => system.solve(),
            Solver::ConjugateGradient(system) => system.solve(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Solver::Direct(_) => SolverKind::Direct.as_str(),
            Solver::ConjugateGradient(_) => SolverKind::ConjugateGradient.as_str(),
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Solver::Direct(system) => system.size(),
            Solver::ConjugateGradient(system) => system.size(),
        }
    }
}

impl<'a> From<LinearSystem<'a>> for Solver<'a> {
    fn from(system: LinearSystem<'a>) -> Self {
        Solver::Direct(system)
    }
}

impl<'a> From<PosSymLinSystem<'a>> for Solver<'a> {
    fn from(system: PosSymLinSystem<'a>) -> Self {
        Solver::ConjugateGradient(system)
    }
}

/// Symmetric with a strictly positive diagonal. Not a proof of positive
/// definiteness, only a cheap necessary condition for it.
fn looks_positive_definite(a: &Matrix) -> bool {
    a.is_symmetric(SYMMETRY_TOLERANCE) && (0..a.nrows()).all(|i| a.entry(i, i) > 0.0)
}

/// Build the solver requested by `config` for `A x = b`.
pub fn build_solver<'a>(config: &SolverConfig, a: &'a Matrix, b: &'a Vector) -> Result<Solver<'a>> {
    let kind = match config.kind {
        SolverKind::Auto if looks_positive_definite(a) => SolverKind::ConjugateGradient,
        SolverKind::Auto => SolverKind::Direct,
        kind => kind,
    };
    log::debug!("using {} solver (requested {})", kind, config.kind);

    match kind {
        SolverKind::ConjugateGradient => Ok(Solver::ConjugateGradient(
            PosSymLinSystem::with_options(a, b, config.max_iterations, config.tolerance)?,
        )),
        _ => Ok(Solver::Direct(LinearSystem::new(a, b)?)),
    }
}
