use crate::config::DEFAULT_CG_TOLERANCE;
use crate::error::{LinAlgError, Result};
use crate::math::{Matrix, Vector};
use crate::solvers::direct::LinearSystem;

/// Largest off-diagonal asymmetry accepted at construction.
pub const SYMMETRY_TOLERANCE: f64 = 1e-10;

/// Symmetric system `A x = b` solved by conjugate gradient.
///
/// Symmetry is checked when the system is built. Positive-definiteness is not:
/// the caller must guarantee it for the iteration to converge.
#[derive(Debug, Clone, Copy)]
pub struct PosSymLinSystem<'a> {
    system: LinearSystem<'a>,
    max_iterations: Option<usize>,
    tolerance: f64,
}

impl<'a> PosSymLinSystem<'a> {
    pub fn new(a: &'a Matrix, b: &'a Vector) -> Result<Self> {
        Self::with_options(a, b, None, DEFAULT_CG_TOLERANCE)
    }

    /// `max_iterations` defaults to the system size when `None`.
    pub fn with_options(
        a: &'a Matrix,
        b: &'a Vector,
        max_iterations: Option<usize>,
        tolerance: f64,
    ) -> Result<Self> {
        let system = LinearSystem::new(a, b)?;
        if let Some((row, col, difference)) = a.symmetry_violation(SYMMETRY_TOLERANCE) {
            return Err(LinAlgError::NotSymmetric {
                row: row + 1,
                col: col + 1,
                difference,
            });
        }
        Ok(Self {
            system,
            max_iterations,
            tolerance,
        })
    }

    pub fn size(&self) -> usize {
        self.system.size()
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations.unwrap_or_else(|| self.size())
    }

    pub fn solve(&self) -> Result<Vector> {
        let a = self.system.matrix();
        let b = self.system.rhs();
        let n = self.size();

        // x0 = 0, so r0 = b - A x0 = b.
        let mut x = Vector::zeros(n);
        let mut r = b.clone();
        let mut p = r.clone();
        let mut rs_old = r.dot(&r)?;
        // b = 0 has the exact answer x0; iterating would divide 0 by 0.
        if rs_old == 0.0 {
            return Ok(x);
        }

        for iteration in 0..self.max_iterations() {
            let ap = a.mul_vector(&p)?;
            let curvature = p.dot(&ap)?;
            if curvature == 0.0 {
                return Err(LinAlgError::Breakdown { iteration });
            }
            let alpha = rs_old / curvature;
            x = x.try_add(&(alpha * &p))?;
            r = r.try_sub(&(alpha * &ap))?;
            let rs_new = r.dot(&r)?;
            log::trace!(
                "cg iteration {}: residual norm {:e}",
                iteration,
                rs_new.sqrt()
            );
            if rs_new.sqrt() < self.tolerance {
                log::debug!("conjugate gradient converged after {} iterations", iteration + 1);
                return Ok(x);
            }
            p = r.try_add(&((rs_new / rs_old) * &p))?;
            rs_old = rs_new;
        }

        log::debug!(
            "conjugate gradient stopped at the {} iteration cap",
            self.max_iterations()
        );
        Ok(x)
    }
}
