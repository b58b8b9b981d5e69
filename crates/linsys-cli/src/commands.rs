//! Subcommand bodies, kept out of `main` so they can be tested directly.
use std::fmt;

use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::SeedableRng;

use linsys::math::Vector;
use linsys::regression::{rmse, train_test_split, LeastSquares};
use linsys::solvers::build_solver;

use crate::problem::{FitProblem, SolveProblem};

#[derive(Debug, Clone)]
pub struct SolveReport {
    pub solver: &'static str,
    pub solution: Vector,
}

pub fn run_solve(problem: &SolveProblem) -> Result<SolveReport> {
    let (a, b) = problem.system()?;
    let solver = build_solver(&problem.solver, &a, &b).context("Failed to set up linear system")?;
    log::info!(
        "[linsys::solve] Solving {}x{} system with the {} solver",
        solver.size(),
        solver.size(),
        solver.name()
    );
    let solution = solver.solve().context("Solve failed")?;
    Ok(SolveReport {
        solver: solver.name(),
        solution,
    })
}

#[derive(Debug, Clone)]
pub struct FitReport {
    pub train_size: usize,
    pub test_size: usize,
    pub rmse: f64,
    pub coefficients: Vector,
}

pub fn run_fit(problem: &FitProblem) -> Result<FitReport> {
    let (x, y) = problem.design()?;
    let mut rng = match problem.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let split = train_test_split(&x, &y, problem.train_fraction, &mut rng)
        .context("Failed to split rows into train and test sets")?;
    log::info!(
        "[linsys::fit] {} rows: {} train / {} test",
        x.nrows(),
        split.x_train.nrows(),
        split.x_test.nrows()
    );

    let model = LeastSquares::fit(&split.x_train, &split.y_train)
        .context("Least-squares fit failed")?;
    let predicted = model.predict(&split.x_test)?;
    let error = rmse(&predicted, &split.y_test)?;

    Ok(FitReport {
        train_size: split.x_train.nrows(),
        test_size: split.x_test.nrows(),
        rmse: error,
        coefficients: model.coefficients().clone(),
    })
}

fn write_coefficients(f: &mut fmt::Formatter<'_>, values: &Vector) -> fmt::Result {
    for (i, value) in values.iter().enumerate() {
        writeln!(f, "x{}: {}", i + 1, value)?;
    }
    Ok(())
}

impl fmt::Display for SolveReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solver: {}", self.solver)?;
        write_coefficients(f, &self.solution)
    }
}

impl fmt::Display for FitReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Train size: {}", self.train_size)?;
        writeln!(f, "Test size: {}", self.test_size)?;
        writeln!(f, "RMSE on test set: {}", self.rmse)?;
        let names: Vec<String> = (1..=self.coefficients.len())
            .map(|i| format!("x{}", i))
            .collect();
        writeln!(f, "Model parameters ({}):", names.join(", "))?;
        write_coefficients(f, &self.coefficients)
    }
}
