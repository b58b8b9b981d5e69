use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Convergence threshold on the residual norm used by conjugate gradient.
pub const DEFAULT_CG_TOLERANCE: f64 = 1e-10;

/// Solver configuration consumed by [`crate::solvers::build_solver`].
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct SolverConfig {
    pub kind: SolverKind,

    /// Iteration cap for conjugate gradient; `None` means the system size.
    pub max_iterations: Option<usize>,

    /// Residual-norm threshold for conjugate gradient early exit.
    pub tolerance: f64,
}

/// Which solution strategy to use.
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SolverKind {
    /// Gaussian elimination with partial pivoting.
    #[default]
    Direct,
    /// Conjugate gradient; requires a symmetric positive-definite matrix.
    ConjugateGradient,
    /// Pick conjugate gradient for symmetric matrices with a positive
    /// diagonal, elimination otherwise.
    Auto,
}

impl SolverKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SolverKind::Direct => "direct",
            SolverKind::ConjugateGradient => "conjugate_gradient",
            SolverKind::Auto => "auto",
        }
    }
}

impl fmt::Display for SolverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SolverKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" | "gauss" | "gaussian" => Ok(SolverKind::Direct),
            "conjugate_gradient" | "conjugate-gradient" | "cg" => {
                Ok(SolverKind::ConjugateGradient)
            }
            "auto" => Ok(SolverKind::Auto),
            _ => Err(format!(
                "Unknown solver kind: {}. Expected one of: direct, conjugate_gradient, auto",
                s
            )),
        }
    }
}

impl SolverConfig {
    pub fn new(kind: SolverKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            kind: SolverKind::Direct,
            max_iterations: None,
            tolerance: DEFAULT_CG_TOLERANCE,
        }
    }
}
