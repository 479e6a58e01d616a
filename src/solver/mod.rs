//! MNA (Modified Nodal Analysis) solver.
//!
//! This module provides the numerical engine for DC network analysis.
//!
//! ## Modified Nodal Analysis
//!
//! MNA assembles a system of equations Ax = z where:
//! - x contains node voltages and voltage source branch currents
//! - A is the conductance/coefficient matrix
//! - z is the source vector
//!
//! The matrix structure is:
//! ```text
//! [ G   B ] [ v ]   [ 0 ]
//! [ C   0 ] [ j ] = [ e ]
//! ```
//!
//! where:
//! - G is the conductance matrix (KCL at each non-ground node)
//! - B, C = B^T connect voltage sources to their terminal nodes
//! - v is the vector of node voltages
//! - j is the vector of voltage source currents
//! - e is the vector of voltage source values
//!
//! The system is solved with dense Gauss-Jordan elimination; there is no
//! sparse path.

mod analyzer;
mod gauss;
mod mna;

pub use analyzer::{
    analyze, analyze_with_config, AnalysisConfig, AnalysisResult, BranchResult, NodeVoltage,
};
pub use gauss::{solve_linear_system, solve_with_tolerance};
pub use mna::MnaMatrix;

/// Pivot magnitude below which a system is treated as singular.
pub const PIVOT_TOLERANCE: f64 = 1e-12;
