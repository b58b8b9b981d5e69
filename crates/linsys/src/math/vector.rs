use std::fmt;
use std::iter::FromIterator;
use std::ops::{Index, IndexMut, Mul, Neg};
use std::slice::Iter;

use crate::error::{IndexBase, LinAlgError, Result};

/// Dense, exclusively owned vector of `f64`.
///
/// The length is fixed at construction. Arithmetic never works in place: every
/// operation allocates its result, so a failed operation leaves both operands
/// untouched.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Vector {
    data: Vec<f64>,
}

impl Vector {
    pub fn from_vec(data: Vec<f64>) -> Self {
        Self { data }
    }

    pub fn zeros(len: usize) -> Self {
        Self::from_vec(vec![0.0; len])
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn iter(&self) -> Iter<'_, f64> {
        self.data.iter()
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [f64] {
        &mut self.data
    }

    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    pub fn mapv<F>(&self, mut f: F) -> Vector
    where
        F: FnMut(f64) -> f64,
    {
        self.data.iter().map(|&v| f(v)).collect()
    }

    fn check_zero_based(&self, index: usize) -> Result<()> {
        if index < self.len() {
            Ok(())
        } else {
            Err(LinAlgError::IndexOutOfRange {
                index,
                len: self.len(),
                base: IndexBase::Zero,
            })
        }
    }

    fn check_one_based(&self, index: usize) -> Result<usize> {
        if index >= 1 && index <= self.len() {
            Ok(index - 1)
        } else {
            Err(LinAlgError::IndexOutOfRange {
                index,
                len: self.len(),
                base: IndexBase::One,
            })
        }
    }

    /// Raw 0-based read.
    pub fn get(&self, index: usize) -> Result<f64> {
        self.check_zero_based(index)?;
        Ok(self.data[index])
    }

    pub fn get_mut(&mut self, index: usize) -> Result<&mut f64> {
        self.check_zero_based(index)?;
        Ok(&mut self.data[index])
    }

    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        *self.get_mut(index)? = value;
        Ok(())
    }

    /// Mathematical 1-based read: `at(1)` is the first element.
    pub fn at(&self, index: usize) -> Result<f64> {
        let offset = self.check_one_based(index)?;
        Ok(self.data[offset])
    }

    pub fn at_mut(&mut self, index: usize) -> Result<&mut f64> {
        let offset = self.check_one_based(index)?;
        Ok(&mut self.data[offset])
    }

    pub fn set_at(&mut self, index: usize, value: f64) -> Result<()> {
        *self.at_mut(index)? = value;
        Ok(())
    }

    fn check_same_len(&self, other: &Vector, op: &'static str) -> Result<()> {
        if self.len() != other.len() {
            return Err(LinAlgError::ShapeMismatch {
                op,
                left: (self.len(), 1),
                right: (other.len(), 1),
            });
        }
        Ok(())
    }

    fn zip_with<F>(&self, other: &Vector, op: &'static str, f: F) -> Result<Vector>
    where
        F: Fn(f64, f64) -> f64,
    {
        self.check_same_len(other, op)?;
        Ok(self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect())
    }

    pub fn try_add(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, "vector addition", |a, b| a + b)
    }

    pub fn try_sub(&self, other: &Vector) -> Result<Vector> {
        self.zip_with(other, "vector subtraction", |a, b| a - b)
    }

    pub fn dot(&self, other: &Vector) -> Result<f64> {
        self.check_same_len(other, "dot product")?;
        Ok(dot_scalar_f64(self.as_slice(), other.as_slice()))
    }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        dot_scalar_f64(self.as_slice(), self.as_slice()).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.data.iter().all(|v| v.is_finite())
    }
}

fn dot_scalar_f64(lhs: &[f64], rhs: &[f64]) -> f64 {
    lhs.iter().zip(rhs.iter()).map(|(a, b)| a * b).sum()
}

impl From<Vec<f64>> for Vector {
    fn from(value: Vec<f64>) -> Self {
        Vector::from_vec(value)
    }
}

impl From<Vector> for Vec<f64> {
    fn from(value: Vector) -> Self {
        value.data
    }
}

impl FromIterator<f64> for Vector {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        Vector::from_vec(iter.into_iter().collect())
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}

impl IndexMut<usize> for Vector {
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        &mut self.data[index]
    }
}

impl Neg for &Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        self.mapv(|v| -v)
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Self::Output {
        -&self
    }
}

impl Mul<f64> for &Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Self::Output {
        self.mapv(|v| v * scalar)
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, scalar: f64) -> Self::Output {
        &self * scalar
    }
}

impl Mul<&Vector> for f64 {
    type Output = Vector;

    fn mul(self, vector: &Vector) -> Self::Output {
        vector * self
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, vector: Vector) -> Self::Output {
        &vector * self
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (idx, value) in self.data.iter().enumerate() {
            write!(f, "{}", value)?;
            if idx + 1 != self.data.len() {
                write!(f, ", ")?;
            }
        }
        write!(f, "]")
    }
}
