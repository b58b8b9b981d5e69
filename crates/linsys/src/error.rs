use std::error::Error;
use std::fmt;

/// Indexing convention used by an accessor that failed its bounds check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexBase {
    Zero,
    One,
}

impl fmt::Display for IndexBase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndexBase::Zero => write!(f, "0-based"),
            IndexBase::One => write!(f, "1-based"),
        }
    }
}

/// Errors raised by the matrix/vector arithmetic and the solvers.
#[derive(Debug, Clone, PartialEq)]
pub enum LinAlgError {
    /// Operand shapes are incompatible for `op`. Vectors report `(len, 1)`.
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// A buffer or row list cannot form a `rows x cols` matrix.
    InvalidShape { rows: usize, cols: usize, len: usize },
    IndexOutOfRange {
        index: usize,
        len: usize,
        base: IndexBase,
    },
    /// Pivot or determinant magnitude fell below the singularity tolerance.
    Singular { magnitude: f64 },
    NotSymmetric {
        row: usize,
        col: usize,
        difference: f64,
    },
    /// Conjugate gradient hit a search direction with zero curvature.
    Breakdown { iteration: usize },
}

impl fmt::Display for LinAlgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinAlgError::ShapeMismatch { op, left, right } => write!(
                f,
                "shape mismatch in {}: {}x{} vs {}x{}",
                op, left.0, left.1, right.0, right.1
            ),
            LinAlgError::InvalidShape { rows, cols, len } => write!(
                f,
                "invalid shape ({}, {}) for buffer of length {}",
                rows, cols, len
            ),
            LinAlgError::IndexOutOfRange { index, len, base } => write!(
                f,
                "index {} out of range ({}) for dimension of length {}",
                index, base, len
            ),
            LinAlgError::Singular { magnitude } => {
                write!(f, "matrix is singular (magnitude {:e})", magnitude)
            }
            LinAlgError::NotSymmetric {
                row,
                col,
                difference,
            } => write!(
                f,
                "matrix is not symmetric: entries ({}, {}) and ({}, {}) differ by {:e}",
                row, col, col, row, difference
            ),
            LinAlgError::Breakdown { iteration } => write!(
                f,
                "conjugate gradient breakdown at iteration {}: zero curvature direction",
                iteration
            ),
        }
    }
}

impl Error for LinAlgError {}

pub type Result<T> = std::result::Result<T, LinAlgError>;
