//! Dense Gauss-Jordan elimination with partial pivoting.

use crate::error::{DcNetError, Result};

use super::PIVOT_TOLERANCE;

/// Solve `A x = b` with the default pivot tolerance.
///
/// `a` must be square with `a.len() == b.len()`. Inputs are copied into a
/// private augmented matrix and never modified.
pub fn solve_linear_system(a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>> {
    solve_with_tolerance(a, b, PIVOT_TOLERANCE)
}

/// Solve `A x = b`, treating any pivot with magnitude below `tolerance` as
/// singular.
pub fn solve_with_tolerance(a: &[Vec<f64>], b: &[f64], tolerance: f64) -> Result<Vec<f64>> {
    let n = a.len();
    if b.len() != n {
        return Err(DcNetError::dimension_mismatch(format!(
            "matrix has {} rows but right-hand side has {} entries",
            n,
            b.len()
        )));
    }
    if let Some((row, r)) = a.iter().enumerate().find(|(_, r)| r.len() != n) {
        return Err(DcNetError::dimension_mismatch(format!(
            "row {} has {} columns, expected {}",
            row,
            r.len(),
            n
        )));
    }

    // Augmented matrix [A | b]
    let mut aug: Vec<Vec<f64>> = a
        .iter()
        .zip(b)
        .map(|(row, &rhs)| {
            let mut r = Vec::with_capacity(n + 1);
            r.extend_from_slice(row);
            r.push(rhs);
            r
        })
        .collect();

    for i in 0..n {
        // Find pivot
        let mut max_row = i;
        let mut max_val = aug[i][i].abs();
        for k in (i + 1)..n {
            let val = aug[k][i].abs();
            if val > max_val {
                max_val = val;
                max_row = k;
            }
        }
        aug.swap(i, max_row);

        if max_val < tolerance {
            return Err(DcNetError::SingularMatrix);
        }

        // Make pivot 1
        let pivot = aug[i][i];
        for j in i..=n {
            aug[i][j] /= pivot;
        }

        // Eliminate column i from every other row
        let pivot_row = aug[i].clone();
        for (k, row) in aug.iter_mut().enumerate() {
            if k == i {
                continue;
            }
            let factor = row[i];
            if factor == 0.0 {
                continue;
            }
            for j in i..=n {
                row[j] -= factor * pivot_row[j];
            }
        }
    }

    // Fully reduced: the last column is the solution
    Ok(aug.into_iter().map(|row| row[n]).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn residual(a: &[Vec<f64>], x: &[f64], b: &[f64]) -> f64 {
        a.iter()
            .zip(b)
            .map(|(row, bi)| {
                let ax: f64 = row.iter().zip(x).map(|(aij, xj)| aij * xj).sum();
                (ax - bi).abs()
            })
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_solve_2x2() {
        let a = vec![vec![2.0, 1.0], vec![1.0, 3.0]];
        let b = vec![13.0, 24.0];
        let x = solve_linear_system(&a, &b).unwrap();
        assert_abs_diff_eq!(x[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 7.0, epsilon = 1e-12);
    }

    #[test]
    fn test_needs_pivoting() {
        // Zero on the leading diagonal, solvable only with a row swap
        let a = vec![
            vec![0.0, 2.0, 1.0],
            vec![1.0, -2.0, -3.0],
            vec![-1.0, 1.0, 2.0],
        ];
        let b = vec![-8.0, 0.0, 3.0];
        let x = solve_linear_system(&a, &b).unwrap();
        assert!(residual(&a, &x, &b) < 1e-9);
        assert_abs_diff_eq!(x[0], -4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(x[1], -5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(x[2], 2.0, epsilon = 1e-9);
    }

    #[test]
    fn test_residual_on_dense_system() {
        let n = 6;
        let a: Vec<Vec<f64>> = (0..n)
            .map(|i| {
                (0..n)
                    .map(|j| {
                        if i == j {
                            10.0 + i as f64
                        } else {
                            1.0 / (1.0 + (i as f64 - j as f64).abs())
                        }
                    })
                    .collect()
            })
            .collect();
        let b: Vec<f64> = (0..n).map(|i| (i as f64) - 2.5).collect();
        let x = solve_linear_system(&a, &b).unwrap();
        assert_eq!(x.len(), n);
        assert!(residual(&a, &x, &b) < 1e-9);
    }

    #[test]
    fn test_empty_system() {
        let x = solve_linear_system(&[], &[]).unwrap();
        assert!(x.is_empty());
    }

    #[test]
    fn test_zero_row_is_singular() {
        let a = vec![vec![1.0, 2.0], vec![0.0, 0.0]];
        let err = solve_linear_system(&a, &[1.0, 0.0]).unwrap_err();
        assert!(matches!(err, DcNetError::SingularMatrix));
    }

    #[test]
    fn test_identical_rows_are_singular() {
        let a = vec![
            vec![1.0, 2.0, 3.0],
            vec![4.0, 5.0, 6.0],
            vec![1.0, 2.0, 3.0],
        ];
        let err = solve_linear_system(&a, &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(err, DcNetError::SingularMatrix));
    }

    #[test]
    fn test_inputs_untouched() {
        let a = vec![vec![0.0, 1.0], vec![1.0, 0.0]];
        let b = vec![2.0, 3.0];
        let x = solve_linear_system(&a, &b).unwrap();
        assert_eq!(x, vec![3.0, 2.0]);
        assert_eq!(a, vec![vec![0.0, 1.0], vec![1.0, 0.0]]);
        assert_eq!(b, vec![2.0, 3.0]);
    }

    #[test]
    fn test_dimension_mismatch() {
        let a = vec![vec![1.0, 0.0], vec![0.0, 1.0]];
        assert!(matches!(
            solve_linear_system(&a, &[1.0]),
            Err(DcNetError::DimensionMismatch { .. })
        ));
        let ragged = vec![vec![1.0, 0.0], vec![0.0]];
        assert!(matches!(
            solve_linear_system(&ragged, &[1.0, 1.0]),
            Err(DcNetError::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_custom_tolerance() {
        let a = vec![vec![1e-10, 0.0], vec![0.0, 1.0]];
        assert!(solve_with_tolerance(&a, &[1.0, 1.0], 1e-12).is_ok());
        assert!(solve_with_tolerance(&a, &[1.0, 1.0], 1e-9).is_err());
    }
}
