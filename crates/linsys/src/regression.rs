//! Least-squares regression on top of [`Matrix::pseudo_inverse`].
//!
//! Rows of the design matrix are samples and columns are features. These
//! helpers take already-built `Matrix`/`Vector` values; reading them from
//! disk is left to the caller.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{LinAlgError, Result};
use crate::math::{Matrix, Vector};

/// Default share of rows assigned to the training side of a split.
pub const DEFAULT_TRAIN_FRACTION: f64 = 0.8;

/// Train/test partition of a design matrix and its targets.
#[derive(Debug, Clone)]
pub struct Split {
    pub x_train: Matrix,
    pub y_train: Vector,
    pub x_test: Matrix,
    pub y_test: Vector,
}

/// Shuffle the row order and cut it at `floor(train_fraction * n)`.
///
/// Both sides must end up with at least one row.
pub fn train_test_split<R: Rng + ?Sized>(
    x: &Matrix,
    y: &Vector,
    train_fraction: f64,
    rng: &mut R,
) -> Result<Split> {
    let n = x.nrows();
    if y.len() != n {
        return Err(LinAlgError::ShapeMismatch {
            op: "train/test split",
            left: x.shape(),
            right: (y.len(), 1),
        });
    }

    let n_train = if train_fraction > 0.0 && train_fraction < 1.0 {
        (train_fraction * n as f64) as usize
    } else {
        0
    };
    if n_train == 0 || n_train == n {
        return Err(LinAlgError::InvalidShape {
            rows: n_train,
            cols: x.ncols(),
            len: n,
        });
    }

    let mut indices: Vec<usize> = (0..n).collect();
    indices.shuffle(rng);
    let (train_idx, test_idx) = indices.split_at(n_train);
    log::debug!(
        "split {} rows into {} train / {} test",
        n,
        train_idx.len(),
        test_idx.len()
    );

    Ok(Split {
        x_train: x.select_rows(train_idx)?,
        y_train: train_idx.iter().map(|&i| y[i]).collect(),
        x_test: x.select_rows(test_idx)?,
        y_test: test_idx.iter().map(|&i| y[i]).collect(),
    })
}

/// Linear model `y ≈ X β` fitted by the pseudo-inverse.
#[derive(Debug, Clone, PartialEq)]
pub struct LeastSquares {
    coefficients: Vector,
}

impl LeastSquares {
    pub fn fit(x: &Matrix, y: &Vector) -> Result<Self> {
        if y.len() != x.nrows() {
            return Err(LinAlgError::ShapeMismatch {
                op: "least squares fit",
                left: x.shape(),
                right: (y.len(), 1),
            });
        }
        let coefficients = x.pseudo_inverse()?.mul_vector(y)?;
        Ok(Self { coefficients })
    }

    pub fn coefficients(&self) -> &Vector {
        &self.coefficients
    }

    pub fn predict(&self, x: &Matrix) -> Result<Vector> {
        x.mul_vector(&self.coefficients)
    }
}

/// Root mean squared error between predictions and observed values.
pub fn rmse(predicted: &Vector, actual: &Vector) -> Result<f64> {
    if predicted.is_empty() {
        return Err(LinAlgError::InvalidShape {
            rows: 0,
            cols: 1,
            len: actual.len(),
        });
    }
    let residual = predicted.try_sub(actual)?;
    Ok((residual.dot(&residual)? / residual.len() as f64).sqrt())
}
