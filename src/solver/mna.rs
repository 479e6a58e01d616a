//! MNA matrix assembly.

use crate::error::Result;

use super::gauss;

/// MNA matrix system Ax = z.
#[derive(Debug, Clone, PartialEq)]
pub struct MnaMatrix {
    /// System matrix A, one `Vec` per row
    pub a: Vec<Vec<f64>>,
    /// Source vector z
    pub z: Vec<f64>,
}

impl MnaMatrix {
    /// Create a zeroed system of the given dimension.
    pub fn new(size: usize) -> Self {
        Self {
            a: vec![vec![0.0; size]; size],
            z: vec![0.0; size],
        }
    }

    /// Get matrix element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.a[row][col]
    }

    /// Set matrix element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.a[row][col] = value;
    }

    /// Add to matrix element at (row, col).
    pub fn add(&mut self, row: usize, col: usize, value: f64) {
        self.a[row][col] += value;
    }

    /// Stamp a conductance between two nodes.
    /// For a conductance G between nodes n1 and n2:
    ///   A[n1,n1] += G
    ///   A[n2,n2] += G
    ///   A[n1,n2] -= G
    ///   A[n2,n1] -= G
    /// A `None` node is ground and gets no row or column.
    pub fn stamp_conductance(&mut self, n1: Option<usize>, n2: Option<usize>, g: f64) {
        if let Some(i) = n1 {
            self.add(i, i, g);
        }
        if let Some(j) = n2 {
            self.add(j, j, g);
        }
        if let (Some(i), Some(j)) = (n1, n2) {
            self.add(i, j, -g);
            self.add(j, i, -g);
        }
    }

    /// Stamp a voltage source between two nodes with branch current at index br.
    /// V[n+] - V[n-] = E
    pub fn stamp_voltage_source(
        &mut self,
        n_pos: Option<usize>,
        n_neg: Option<usize>,
        br: usize,
        voltage: f64,
    ) {
        if let Some(i) = n_pos {
            self.set(br, i, 1.0);
            self.set(i, br, 1.0);
        }
        if let Some(j) = n_neg {
            self.set(br, j, -1.0);
            self.set(j, br, -1.0);
        }
        self.z[br] = voltage;
    }

    /// Solve the assembled system, returning the solution vector.
    pub fn solve(&self, tolerance: f64) -> Result<Vec<f64>> {
        gauss::solve_with_tolerance(&self.a, &self.z, tolerance)
    }
}

/// Value of `x` at a node index, with ground (`None`) at 0 V.
pub fn voltage(x: &[f64], node: Option<usize>) -> f64 {
    match node {
        Some(i) => x[i],
        None => 0.0,
    }
}
