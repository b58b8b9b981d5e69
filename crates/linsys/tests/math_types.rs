//! Integration tests for the Vector and Matrix containers.

use linsys::error::{IndexBase, LinAlgError};
use linsys::math::{Matrix, Vector};

fn assert_close(a: &Matrix, b: &Matrix, tol: f64) {
    assert_eq!(a.shape(), b.shape());
    for (x, y) in a.as_slice().iter().zip(b.as_slice()) {
        assert!((x - y).abs() < tol, "{} vs {} (tol {})", x, y, tol);
    }
}

fn sample_3x3() -> Matrix {
    Matrix::from_rows(&[[4.0, 7.0, 2.0], [3.0, 6.0, 1.0], [2.0, 5.0, 3.0]]).unwrap()
}

// ---------------------------------------------------------------------------
// Vector
// ---------------------------------------------------------------------------

#[test]
fn vector_zeros_and_len() {
    let v = Vector::zeros(4);
    assert_eq!(v.len(), 4);
    assert!(v.iter().all(|&x| x == 0.0));
    assert!(Vector::zeros(0).is_empty());
}

#[test]
fn vector_one_based_bounds() {
    let mut v = Vector::from_vec(vec![1.0, 2.0, 3.0]);
    assert_eq!(v.at(1).unwrap(), 1.0);
    assert_eq!(v.at(3).unwrap(), 3.0);
    assert_eq!(
        v.at(0),
        Err(LinAlgError::IndexOutOfRange {
            index: 0,
            len: 3,
            base: IndexBase::One
        })
    );
    assert!(v.at(4).is_err());
    assert!(v.set_at(4, 1.0).is_err());
    assert_eq!(v.to_vec(), vec![1.0, 2.0, 3.0]);
}

#[test]
fn vector_zero_based_bounds() {
    let mut v = Vector::from_vec(vec![1.0, 2.0]);
    assert_eq!(v.get(0).unwrap(), 1.0);
    assert!(v.get(2).is_err());
    v.set(1, 9.0).unwrap();
    assert_eq!(v.at(2).unwrap(), 9.0);
}

#[test]
fn vector_arithmetic() {
    let v = Vector::from_vec(vec![1.0, 2.0, 3.0]);
    let w = Vector::from_vec(vec![4.0, 5.0, 6.0]);
    assert_eq!(v.try_add(&w).unwrap().to_vec(), vec![5.0, 7.0, 9.0]);
    assert_eq!(w.try_sub(&v).unwrap().to_vec(), vec![3.0, 3.0, 3.0]);
    assert_eq!((-&v).to_vec(), vec![-1.0, -2.0, -3.0]);
    assert_eq!((2.0 * &v).to_vec(), (&v * 2.0).to_vec());
    assert_eq!(v.dot(&w).unwrap(), 32.0);
}

#[test]
fn vector_dot_is_symmetric() {
    let v = Vector::from_vec(vec![0.5, -1.25, 3.0, 7.0]);
    let w = Vector::from_vec(vec![2.0, 4.0, -0.5, 1.5]);
    assert_eq!(v.dot(&w).unwrap(), w.dot(&v).unwrap());
}

#[test]
fn vector_length_mismatch_errors() {
    let v = Vector::zeros(2);
    let w = Vector::zeros(3);
    let expected = LinAlgError::ShapeMismatch {
        op: "vector addition",
        left: (2, 1),
        right: (3, 1),
    };
    assert_eq!(v.try_add(&w), Err(expected));
    assert!(v.try_sub(&w).is_err());
    assert!(v.dot(&w).is_err());
}

#[test]
fn vector_clone_is_deep() {
    let v = Vector::from_vec(vec![1.0, 2.0]);
    let mut copy = v.clone();
    copy.set_at(1, 100.0).unwrap();
    assert_eq!(v.at(1).unwrap(), 1.0);
}

// ---------------------------------------------------------------------------
// Matrix construction & access
// ---------------------------------------------------------------------------

#[test]
fn matrix_rejects_empty_and_ragged() {
    assert!(matches!(
        Matrix::new(0, 3),
        Err(LinAlgError::InvalidShape { .. })
    ));
    assert!(Matrix::from_shape_vec((2, 2), vec![1.0; 3]).is_err());
    let ragged = vec![vec![1.0, 2.0], vec![3.0]];
    assert!(matches!(
        Matrix::from_rows(&ragged),
        Err(LinAlgError::InvalidShape { .. })
    ));
}

#[test]
fn matrix_one_based_access() {
    let mut m = Matrix::new(2, 3).unwrap();
    m.set(1, 1, 1.5).unwrap();
    m.set(2, 3, -4.0).unwrap();
    assert_eq!(m.get(1, 1).unwrap(), 1.5);
    assert_eq!(m.get(2, 3).unwrap(), -4.0);
    assert_eq!(m.row(2).unwrap(), &[0.0, 0.0, -4.0]);
    assert_eq!(m.column(3).unwrap().to_vec(), vec![0.0, -4.0]);
}

#[test]
fn matrix_out_of_range_access() {
    let mut m = Matrix::new(2, 3).unwrap();
    assert!(m.get(0, 1).is_err());
    assert!(m.get(1, 0).is_err());
    assert!(m.get(3, 1).is_err());
    assert_eq!(
        m.get(1, 4),
        Err(LinAlgError::IndexOutOfRange {
            index: 4,
            len: 3,
            base: IndexBase::One
        })
    );
    assert!(m.set(3, 3, 1.0).is_err());
    assert!(m.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn matrix_clone_is_deep() {
    let m = sample_3x3();
    let mut copy = m.clone();
    copy.set(1, 1, 0.0).unwrap();
    assert_eq!(m.get(1, 1).unwrap(), 4.0);
}

// ---------------------------------------------------------------------------
// Matrix arithmetic
// ---------------------------------------------------------------------------

#[test]
fn matrix_addition_is_associative_and_commutative() {
    let a = sample_3x3();
    let b = Matrix::from_rows(&[[0.1, -2.0, 3.3], [1.0, 0.0, -1.0], [5.5, 2.25, 0.5]]).unwrap();
    let c = Matrix::from_rows(&[[1e3, 1e-3, 7.0], [-2.0, 8.0, 0.0], [0.0, 1.0, 1.0]]).unwrap();

    let left = a.try_add(&b).unwrap().try_add(&c).unwrap();
    let right = a.try_add(&b.try_add(&c).unwrap()).unwrap();
    assert_close(&left, &right, 1e-9);

    assert_close(&a.try_add(&b).unwrap(), &b.try_add(&a).unwrap(), 1e-12);
}

#[test]
fn matrix_sub_neg_and_scalar() {
    let a = sample_3x3();
    let zero = a.try_sub(&a).unwrap();
    assert!(zero.as_slice().iter().all(|&x| x == 0.0));
    assert_eq!(-&a, &a * -1.0);
    assert_eq!(2.0 * &a, &a * 2.0);
}

#[test]
fn matrix_shape_mismatches() {
    let a = Matrix::new(2, 3).unwrap();
    let b = Matrix::new(3, 2).unwrap();
    assert!(matches!(
        a.try_add(&b),
        Err(LinAlgError::ShapeMismatch { .. })
    ));
    assert!(a.try_sub(&b).is_err());
    assert!(a.matmul(&a).is_err());
    assert!(a.mul_vector(&Vector::zeros(2)).is_err());
}

#[test]
fn matrix_products() {
    let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    let b = Matrix::from_rows(&[[7.0, 8.0], [9.0, 10.0], [11.0, 12.0]]).unwrap();
    let ab = a.matmul(&b).unwrap();
    assert_eq!(ab.shape(), (2, 2));
    assert_eq!(ab.as_slice(), &[58.0, 64.0, 139.0, 154.0]);

    let v = Vector::from_vec(vec![1.0, 0.0, -1.0]);
    assert_eq!(a.mul_vector(&v).unwrap().to_vec(), vec![-2.0, -2.0]);
}

#[test]
fn matrix_transpose() {
    let a = Matrix::from_rows(&[[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]]).unwrap();
    let t = a.transpose();
    assert_eq!(t.shape(), (3, 2));
    assert_eq!(t.get(3, 1).unwrap(), 3.0);
    assert_eq!(t.transpose(), a);
}

// ---------------------------------------------------------------------------
// Determinant, inverse, pseudo-inverse
// ---------------------------------------------------------------------------

#[test]
fn determinant_of_identity_is_one() {
    for n in 1..=6 {
        let det = Matrix::identity(n).unwrap().determinant().unwrap();
        assert!((det - 1.0).abs() < 1e-12, "n = {}", n);
    }
}

#[test]
fn determinant_with_zero_row_is_zero() {
    let m = Matrix::from_rows(&[
        [1.0, 2.0, 3.0, 4.0],
        [0.0, 0.0, 0.0, 0.0],
        [5.0, 6.0, 7.0, 8.0],
        [2.0, 1.0, 0.0, 1.0],
    ])
    .unwrap();
    assert_eq!(m.determinant().unwrap(), 0.0);
}

#[test]
fn determinant_small_cases() {
    assert_eq!(Matrix::from_rows(&[[-3.5]]).unwrap().determinant().unwrap(), -3.5);
    let m = Matrix::from_rows(&[[1.0, 2.0], [3.0, 4.0]]).unwrap();
    assert_eq!(m.determinant().unwrap(), -2.0);
    assert!((sample_3x3().determinant().unwrap() - 9.0).abs() < 1e-12);
}

#[test]
fn determinant_requires_square() {
    let m = Matrix::new(2, 3).unwrap();
    assert!(matches!(
        m.determinant(),
        Err(LinAlgError::ShapeMismatch { .. })
    ));
}

#[test]
fn inverse_times_matrix_is_identity() {
    let a = sample_3x3();
    let inv = a.inverse().unwrap();
    assert_close(&a.matmul(&inv).unwrap(), &Matrix::identity(3).unwrap(), 1e-9);
    assert_close(&inv.matmul(&a).unwrap(), &Matrix::identity(3).unwrap(), 1e-9);
}

#[test]
fn inverse_of_inverse_recovers_matrix() {
    let a = Matrix::from_rows(&[
        [5.0, 1.0, 0.0, 2.0],
        [1.0, 4.0, 1.0, 0.0],
        [0.0, 1.0, 3.0, 1.0],
        [2.0, 0.0, 1.0, 6.0],
    ])
    .unwrap();
    let back = a.inverse().unwrap().inverse().unwrap();
    assert_close(&back, &a, 1e-9);
}

#[test]
fn inverse_of_singular_matrix_fails() {
    let a = Matrix::from_rows(&[[1.0, 2.0], [2.0, 4.0]]).unwrap();
    assert!(matches!(a.inverse(), Err(LinAlgError::Singular { .. })));
    assert!(Matrix::new(2, 3).unwrap().inverse().is_err());
}

#[test]
fn pseudo_inverse_full_column_rank() {
    let a = Matrix::from_rows(&[[1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]).unwrap();
    let pinv = a.pseudo_inverse().unwrap();
    assert_eq!(pinv.shape(), (2, 3));
    assert_close(&pinv.matmul(&a).unwrap(), &Matrix::identity(2).unwrap(), 1e-9);
}

#[test]
fn pseudo_inverse_square_matches_inverse() {
    let a = sample_3x3();
    assert_close(&a.pseudo_inverse().unwrap(), &a.inverse().unwrap(), 1e-6);
}

#[test]
fn pseudo_inverse_rank_deficient_falls_back() {
    // Duplicate columns make AᵗA singular.
    let a = Matrix::from_rows(&[[1.0, 1.0], [2.0, 2.0], [3.0, 3.0]]).unwrap();
    assert!(a.transpose().matmul(&a).unwrap().inverse().is_err());

    let pinv = a.pseudo_inverse().unwrap();
    assert_eq!(pinv.shape(), (2, 3));
    assert!(pinv.is_finite());
    // The ridge splits the weight evenly across the duplicated columns.
    assert!((pinv.get(1, 1).unwrap() - pinv.get(2, 1).unwrap()).abs() < 1e-9);
}

#[test]
fn pseudo_inverse_of_zero_matrix_is_zero() {
    // AᵗA = 0 is missing all three ranks, so det(AᵗA + λI) = λ³.
    let a = Matrix::new(4, 3).unwrap();
    let pinv = a.pseudo_inverse().unwrap();
    assert_eq!(pinv.shape(), (3, 4));
    assert!(pinv.as_slice().iter().all(|&x| x == 0.0));
}

#[test]
fn pseudo_inverse_wide_matrix_is_finite() {
    // Two rows, four columns: AᵗA has rank at most 2.
    let a = Matrix::from_rows(&[[1.0, 2.0, 0.0, 1.0], [0.0, 1.0, 3.0, -1.0]]).unwrap();
    let pinv = a.pseudo_inverse().unwrap();
    assert_eq!(pinv.shape(), (4, 2));
    assert!(pinv.is_finite());
}
