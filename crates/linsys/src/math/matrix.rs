use std::fmt;
use std::ops::{Mul, Neg};

use crate::error::{IndexBase, LinAlgError, Result};
use crate::math::vector::Vector;

/// Magnitude below which a pivot or determinant is treated as zero.
pub const SINGULARITY_TOLERANCE: f64 = 1e-10;

/// Tikhonov term added to `AᵗA` when the pseudo-inverse has to regularize.
pub const PSEUDO_INVERSE_RIDGE: f64 = 1e-4;

/// Dense row-major matrix of `f64` with at least one row and one column.
///
/// Element access through the public API is 1-based and bounds-checked.
#[derive(Clone, Debug, PartialEq)]
pub struct Matrix {
    data: Vec<f64>,
    rows: usize,
    cols: usize,
}

impl Matrix {
    /// Zero-filled `rows x cols` matrix.
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        Self::from_shape_vec((rows, cols), vec![0.0; rows * cols])
    }

    pub fn zeros(rows: usize, cols: usize) -> Result<Self> {
        Self::new(rows, cols)
    }

    pub fn from_shape_vec(shape: (usize, usize), data: Vec<f64>) -> Result<Self> {
        let (rows, cols) = shape;
        if rows == 0 || cols == 0 || data.len() != rows * cols {
            return Err(LinAlgError::InvalidShape {
                rows,
                cols,
                len: data.len(),
            });
        }
        Ok(Self { data, rows, cols })
    }

    /// Build from a list of rows; ragged input is rejected.
    pub fn from_rows<R>(rows: &[R]) -> Result<Self>
    where
        R: AsRef<[f64]>,
    {
        let nrows = rows.len();
        let ncols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        let mut data = Vec::with_capacity(nrows * ncols);
        for row in rows {
            let row = row.as_ref();
            if row.len() != ncols {
                return Err(LinAlgError::InvalidShape {
                    rows: nrows,
                    cols: ncols,
                    len: row.len(),
                });
            }
            data.extend_from_slice(row);
        }
        Self::from_shape_vec((nrows, ncols), data)
    }

    pub fn identity(n: usize) -> Result<Self> {
        let mut m = Self::new(n, n)?;
        for i in 0..n {
            *m.entry_mut(i, i) = 1.0;
        }
        Ok(m)
    }

    /// Internal constructor for shapes already known to be non-empty.
    fn filled(rows: usize, cols: usize) -> Self {
        Self {
            data: vec![0.0; rows * cols],
            rows,
            cols,
        }
    }

    pub fn nrows(&self) -> usize {
        self.rows
    }

    pub fn ncols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    #[inline]
    fn offset(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    /// 0-based read for loops whose indices are already in range.
    #[inline]
    pub(crate) fn entry(&self, row: usize, col: usize) -> f64 {
        self.data[self.offset(row, col)]
    }

    #[inline]
    pub(crate) fn entry_mut(&mut self, row: usize, col: usize) -> &mut f64 {
        let offset = self.offset(row, col);
        &mut self.data[offset]
    }

    pub(crate) fn swap_rows(&mut self, a: usize, b: usize) {
        if a == b {
            return;
        }
        for col in 0..self.cols {
            let (ia, ib) = (self.offset(a, col), self.offset(b, col));
            self.data.swap(ia, ib);
        }
    }

    fn row_slice(&self, row: usize) -> &[f64] {
        let start = self.offset(row, 0);
        &self.data[start..start + self.cols]
    }

    fn check_index(index: usize, len: usize) -> Result<usize> {
        if index >= 1 && index <= len {
            Ok(index - 1)
        } else {
            Err(LinAlgError::IndexOutOfRange {
                index,
                len,
                base: IndexBase::One,
            })
        }
    }

    /// 1-based element read: `get(1, 1)` is the top-left entry.
    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        let r = Self::check_index(row, self.rows)?;
        let c = Self::check_index(col, self.cols)?;
        Ok(self.entry(r, c))
    }

    pub fn get_mut(&mut self, row: usize, col: usize) -> Result<&mut f64> {
        let r = Self::check_index(row, self.rows)?;
        let c = Self::check_index(col, self.cols)?;
        Ok(self.entry_mut(r, c))
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        *self.get_mut(row, col)? = value;
        Ok(())
    }

    /// 1-based row view.
    pub fn row(&self, row: usize) -> Result<&[f64]> {
        let r = Self::check_index(row, self.rows)?;
        Ok(self.row_slice(r))
    }

    /// 1-based column copy.
    pub fn column(&self, col: usize) -> Result<Vector> {
        let c = Self::check_index(col, self.cols)?;
        Ok((0..self.rows).map(|r| self.entry(r, c)).collect())
    }

    /// Copy of the rows at the given 0-based positions, in that order.
    pub fn select_rows(&self, indices: &[usize]) -> Result<Matrix> {
        let mut data = Vec::with_capacity(indices.len() * self.cols);
        for &row in indices {
            if row >= self.rows {
                return Err(LinAlgError::IndexOutOfRange {
                    index: row,
                    len: self.rows,
                    base: IndexBase::Zero,
                });
            }
            data.extend_from_slice(self.row_slice(row));
        }
        Matrix::from_shape_vec((indices.len(), self.cols), data)
    }

    pub fn mapv<F>(&self, mut f: F) -> Matrix
    where
        F: FnMut(f64) -> f64,
    {
        Matrix {
            data: self.data.iter().map(|&v| f(v)).collect(),
            rows: self.rows,
            cols: self.cols,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }

    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::filled(self.cols, self.rows);
        for r in 0..self.rows {
            for c in 0..self.cols {
                *out.entry_mut(c, r) = self.entry(r, c);
            }
        }
        out
    }

    /// First off-diagonal pair `(i, j)`, `i < j`, differing by more than `tol`.
    pub(crate) fn symmetry_violation(&self, tol: f64) -> Option<(usize, usize, f64)> {
        if !self.is_square() {
            return None;
        }
        for i in 0..self.rows {
            for j in (i + 1)..self.cols {
                let diff = (self.entry(i, j) - self.entry(j, i)).abs();
                if diff > tol {
                    return Some((i, j, diff));
                }
            }
        }
        None
    }

    pub fn is_symmetric(&self, tol: f64) -> bool {
        self.is_square() && self.symmetry_violation(tol).is_none()
    }

    fn check_same_shape(&self, other: &Matrix, op: &'static str) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(LinAlgError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        Ok(())
    }

    pub fn try_add(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other, "matrix addition")?;
        Ok(Matrix {
            data: self.data.iter().zip(&other.data).map(|(a, b)| a + b).collect(),
            rows: self.rows,
            cols: self.cols,
        })
    }

    pub fn try_sub(&self, other: &Matrix) -> Result<Matrix> {
        self.check_same_shape(other, "matrix subtraction")?;
        Ok(Matrix {
            data: self.data.iter().zip(&other.data).map(|(a, b)| a - b).collect(),
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Matrix-matrix product; `self.ncols()` must equal `other.nrows()`.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(LinAlgError::ShapeMismatch {
                op: "matrix product",
                left: self.shape(),
                right: other.shape(),
            });
        }
        let mut out = Matrix::filled(self.rows, other.cols);
        for i in 0..self.rows {
            for k in 0..self.cols {
                let lhs = self.entry(i, k);
                for j in 0..other.cols {
                    *out.entry_mut(i, j) += lhs * other.entry(k, j);
                }
            }
        }
        Ok(out)
    }

    /// Matrix-vector product; `self.ncols()` must equal `vector.len()`.
    pub fn mul_vector(&self, vector: &Vector) -> Result<Vector> {
        if self.cols != vector.len() {
            return Err(LinAlgError::ShapeMismatch {
                op: "matrix-vector product",
                left: self.shape(),
                right: (vector.len(), 1),
            });
        }
        Ok((0..self.rows)
            .map(|r| {
                self.row_slice(r)
                    .iter()
                    .zip(vector.iter())
                    .map(|(a, x)| a * x)
                    .sum::<f64>()
            })
            .collect())
    }

    /// Copy with 0-based row `skip_row` and column `skip_col` removed.
    /// Callers guarantee at least two rows and columns.
    fn minor(&self, skip_row: usize, skip_col: usize) -> Matrix {
        let mut out = Matrix::filled(self.rows - 1, self.cols - 1);
        let mut idx = 0;
        for r in (0..self.rows).filter(|&r| r != skip_row) {
            for c in (0..self.cols).filter(|&c| c != skip_col) {
                out.data[idx] = self.entry(r, c);
                idx += 1;
            }
        }
        out
    }

    fn require_square(&self, op: &'static str) -> Result<()> {
        if !self.is_square() {
            return Err(LinAlgError::ShapeMismatch {
                op,
                left: self.shape(),
                right: (self.cols, self.rows),
            });
        }
        Ok(())
    }

    /// Determinant by cofactor expansion along the first row.
    ///
    /// The recursion visits every minor, so the cost grows as O(n!). Only use
    /// it on the small systems this crate is meant for.
    pub fn determinant(&self) -> Result<f64> {
        self.require_square("determinant")?;
        Ok(self.cofactor_determinant())
    }

    fn cofactor_determinant(&self) -> f64 {
        match self.rows {
            1 => self.data[0],
            2 => self.data[0] * self.data[3] - self.data[1] * self.data[2],
            n => (0..n)
                .map(|j| {
                    let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
                    sign * self.entry(0, j) * self.minor(0, j).cofactor_determinant()
                })
                .sum(),
        }
    }

    /// Inverse through the adjugate: `inv[j][i] = (-1)^(i+j) det(M_ij) / det`.
    pub fn inverse(&self) -> Result<Matrix> {
        self.require_square("inverse")?;
        let det = self.cofactor_determinant();
        if det.abs() < SINGULARITY_TOLERANCE {
            return Err(LinAlgError::Singular {
                magnitude: det.abs(),
            });
        }
        Ok(self.adjugate_inverse(det))
    }

    /// Adjugate divided by `det`, with no singularity gate. `det` must be
    /// the non-zero determinant of this square matrix.
    fn adjugate_inverse(&self, det: f64) -> Matrix {
        let n = self.rows;
        if n == 1 {
            return Matrix {
                data: vec![1.0 / det],
                rows: 1,
                cols: 1,
            };
        }
        let mut out = Matrix::filled(n, n);
        for i in 0..n {
            for j in 0..n {
                let sign = if (i + j) % 2 == 0 { 1.0 } else { -1.0 };
                *out.entry_mut(j, i) = sign * self.minor(i, j).cofactor_determinant() / det;
            }
        }
        out
    }

    /// Least-squares pseudo-inverse `(AᵗA)⁻¹Aᵗ`.
    ///
    /// When `AᵗA` is singular the inverse is retried on `AᵗA + λI` with
    /// `λ = PSEUDO_INVERSE_RIDGE`. That matrix is positive definite, so its
    /// determinant may be tiny (down to `λ^ncols`) but never zero, and the
    /// retry skips the tolerance check. The result is always `ncols x nrows`.
    pub fn pseudo_inverse(&self) -> Result<Matrix> {
        let at = self.transpose();
        let ata = at.matmul(self)?;
        match ata.inverse() {
            Ok(ata_inv) => ata_inv.matmul(&at),
            Err(LinAlgError::Singular { magnitude }) => {
                log::warn!(
                    "AᵗA is singular (|det| = {:e}); regularizing with λ = {:e}",
                    magnitude,
                    PSEUDO_INVERSE_RIDGE
                );
                let ridge = Matrix::identity(ata.nrows())? * PSEUDO_INVERSE_RIDGE;
                let regularized = ata.try_add(&ridge)?;
                let det = regularized.cofactor_determinant();
                if det == 0.0 || !det.is_finite() {
                    // Only reachable through underflow or non-finite input.
                    return Err(LinAlgError::Singular {
                        magnitude: det.abs(),
                    });
                }
                regularized.adjugate_inverse(det).matmul(&at)
            }
            Err(e) => Err(e),
        }
    }
}

impl Neg for &Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        self.mapv(|v| -v)
    }
}

impl Neg for Matrix {
    type Output = Matrix;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Mul<f64> for &Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Self::Output {
        self.mapv(|v| v * scalar)
    }
}

impl Mul<f64> for Matrix {
    type Output = Matrix;

    fn mul(self, scalar: f64) -> Self::Output {
        &self * scalar
    }
}

impl Mul<&Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, matrix: &Matrix) -> Self::Output {
        matrix * self
    }
}

impl Mul<Matrix> for f64 {
    type Output = Matrix;

    fn mul(self, matrix: Matrix) -> Self::Output {
        &matrix * self
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            write!(f, "[")?;
            for (idx, value) in self.row_slice(r).iter().enumerate() {
                write!(f, "{}", value)?;
                if idx + 1 != self.cols {
                    write!(f, ", ")?;
                }
            }
            writeln!(f, "]")?;
        }
        Ok(())
    }
}
