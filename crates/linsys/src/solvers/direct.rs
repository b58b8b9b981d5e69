use crate::error::{LinAlgError, Result};
use crate::math::{Matrix, Vector, SINGULARITY_TOLERANCE};

/// Square system `A x = b` solved by Gaussian elimination with partial
/// pivoting.
///
/// The system only borrows `A` and `b`. Each call to [`LinearSystem::solve`]
/// works on private copies, so the caller's values are never modified.
#[derive(Debug, Clone, Copy)]
pub struct LinearSystem<'a> {
    a: &'a Matrix,
    b: &'a Vector,
}

impl<'a> LinearSystem<'a> {
    /// Fails with `ShapeMismatch` unless `a` is square and `b.len() == a.nrows()`.
    pub fn new(a: &'a Matrix, b: &'a Vector) -> Result<Self> {
        if !a.is_square() || b.len() != a.nrows() {
            return Err(LinAlgError::ShapeMismatch {
                op: "linear system",
                left: a.shape(),
                right: (b.len(), 1),
            });
        }
        Ok(Self { a, b })
    }

    pub fn size(&self) -> usize {
        self.a.nrows()
    }

    pub fn matrix(&self) -> &'a Matrix {
        self.a
    }

    pub fn rhs(&self) -> &'a Vector {
        self.b
    }

    pub fn solve(&self) -> Result<Vector> {
        let n = self.size();
        let mut a = self.a.clone();
        let mut b = self.b.clone();

        for k in 0..n.saturating_sub(1) {
            let (pivot_row, pivot_mag) = (k..n)
                .map(|row| (row, a.entry(row, k).abs()))
                .fold((k, f64::NEG_INFINITY), |best, cand| {
                    if cand.1 > best.1 {
                        cand
                    } else {
                        best
                    }
                });
            if pivot_mag < SINGULARITY_TOLERANCE {
                return Err(LinAlgError::Singular {
                    magnitude: pivot_mag,
                });
            }

            if pivot_row != k {
                log::trace!("pivot column {}: swapping rows {} and {}", k, k, pivot_row);
                a.swap_rows(k, pivot_row);
                b.as_mut_slice().swap(k, pivot_row);
            }

            let pivot = a.entry(k, k);
            let b_pivot = b[k];
            for i in (k + 1)..n {
                let factor = a.entry(i, k) / pivot;
                if factor == 0.0 {
                    continue;
                }
                for j in k..n {
                    let delta = factor * a.entry(k, j);
                    *a.entry_mut(i, j) -= delta;
                }
                b[i] -= factor * b_pivot;
            }
        }

        // Elimination never inspects the final diagonal entry.
        let last = a.entry(n - 1, n - 1).abs();
        if last < SINGULARITY_TOLERANCE {
            return Err(LinAlgError::Singular { magnitude: last });
        }

        let mut x = Vector::zeros(n);
        for i in (0..n).rev() {
            let sum: f64 = ((i + 1)..n).map(|j| a.entry(i, j) * x[j]).sum();
            x[i] = (b[i] - sum) / a.entry(i, i);
        }
        log::debug!("direct solve of {}x{} system complete", n, n);
        Ok(x)
    }
}
