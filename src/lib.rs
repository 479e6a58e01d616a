//! # DCNet Core
//!
//! A DC network analyzer for circuits built from resistors, ideal voltage
//! sources and switches.
//!
//! This library provides:
//! - Modified Nodal Analysis (MNA) assembly of an arbitrary component graph
//! - A dense Gauss-Jordan solver with partial pivoting
//! - Node voltages, branch currents, power dissipation and thermal-overload
//!   warnings for every component
//! - A line-oriented netlist format and a JSON interchange format
//!
//! ## Architecture
//!
//! - [`circuit`] - Circuit snapshot, per-call node/source indexing, validation
//! - [`components`] - Component models (resistor, voltage source, switch)
//! - [`solver`] - Linear solver, MNA assembly and the analyzer
//! - [`dsl`] - Parser for the netlist format
//! - [`report`] - Text rendering of circuits and results
//!
//! ## Usage
//!
//! ```
//! use dcnet_core::components::{Component, PowerRating, Resistor, VoltageSource};
//! use dcnet_core::analyze;
//!
//! let components = vec![
//!     Component::VoltageSource(VoltageSource::new("V1", "1", "0", 9.0)),
//!     Component::Resistor(Resistor::new("R1", "1", "0", 1000.0, PowerRating::QuarterWatt)),
//! ];
//! let result = analyze(&components, "0").unwrap();
//! assert!((result.voltage("1").unwrap() - 9.0).abs() < 1e-9);
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! dcnet divider.dcn
//! dcnet circuit.json --ground 0 --json
//! ```
//!
//! ## Analysis Method
//!
//! 1. Index every non-ground node and every voltage source
//! 2. Stamp conductances (resistors, switches) and source constraints into A, z
//! 3. Solve Ax = z for node voltages and source currents
//! 4. Derive current and power per branch and check resistor ratings
//!
//! Analysis is a pure function of its inputs and keeps no state between
//! calls.

pub mod circuit;
pub mod components;
pub mod dsl;
pub mod error;
pub mod report;
pub mod solver;

// Re-export main types for convenience
pub use circuit::Circuit;
pub use components::Component;
pub use error::{DcNetError, Result};
pub use solver::{analyze, analyze_with_config, AnalysisConfig, AnalysisResult};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;

#[cfg(feature = "wasm")]
pub use wasm::{analyze_json, analyze_netlist};

/// Load a circuit from a netlist file, or a JSON document if the path ends
/// in `.json`.
pub fn load_circuit(path: &std::path::Path) -> Result<Circuit> {
    let is_json = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if is_json {
        let content = std::fs::read_to_string(path).map_err(|e| DcNetError::FileReadError {
            path: path.display().to_string(),
            source: e,
        })?;
        Circuit::from_json(&content)
    } else {
        Circuit::from_ast(dsl::parse_file(path)?)
    }
}
