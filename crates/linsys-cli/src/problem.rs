//! JSON problem files accepted by the `solve` and `fit` subcommands.
use std::path::Path;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use linsys::config::SolverConfig;
use linsys::math::{Matrix, Vector};
use linsys::regression::DEFAULT_TRAIN_FRACTION;

/// A square system `A x = b` plus the solver to use on it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveProblem {
    /// Rows of `A`.
    pub matrix: Vec<Vec<f64>>,
    /// Right-hand side `b`.
    pub rhs: Vec<f64>,
    #[serde(default)]
    pub solver: SolverConfig,
}

impl SolveProblem {
    pub fn system(&self) -> Result<(Matrix, Vector)> {
        let a = Matrix::from_rows(&self.matrix).context("Invalid matrix in problem file")?;
        Ok((a, Vector::from_vec(self.rhs.clone())))
    }
}

impl Default for SolveProblem {
    fn default() -> Self {
        Self {
            matrix: vec![vec![2.0, 1.0], vec![1.0, 3.0]],
            rhs: vec![3.0, 5.0],
            solver: SolverConfig::default(),
        }
    }
}

/// Design matrix rows, observed targets and split parameters for a
/// least-squares fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FitProblem {
    pub features: Vec<Vec<f64>>,
    pub targets: Vec<f64>,
    pub train_fraction: f64,
    /// Seed for the row shuffle; a random seed is drawn when absent.
    pub seed: Option<u64>,
}

impl FitProblem {
    pub fn design(&self) -> Result<(Matrix, Vector)> {
        if self.features.len() != self.targets.len() {
            anyhow::bail!(
                "Problem has {} feature rows but {} targets",
                self.features.len(),
                self.targets.len()
            );
        }
        let x = Matrix::from_rows(&self.features).context("Invalid feature rows in problem file")?;
        Ok((x, Vector::from_vec(self.targets.clone())))
    }
}

impl Default for FitProblem {
    fn default() -> Self {
        Self {
            features: Vec::new(),
            targets: Vec::new(),
            train_fraction: DEFAULT_TRAIN_FRACTION,
            seed: None,
        }
    }
}

fn load_json<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<T> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read problem: {}", path.as_ref().display()))?;
    let problem = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse problem: {}", path.as_ref().display()))?;
    Ok(problem)
}

pub fn load_solve_problem<P: AsRef<Path>>(path: P) -> Result<SolveProblem> {
    load_json(path)
}

pub fn load_fit_problem<P: AsRef<Path>>(path: P) -> Result<FitProblem> {
    load_json(path)
}
