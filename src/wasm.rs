//! WASM bindings for DCNet Core.
//!
//! This module exposes the analyzer to a browser front end. Circuits and
//! results cross the boundary as JSON strings in the same shape the
//! front end already uses for its component list and result panel.
//!
//! ## Usage (JavaScript)
//!
//! ```javascript
//! import init, { analyze_json } from 'dcnet_core';
//!
//! await init();
//!
//! const circuit = {
//!   ground: '0',
//!   components: [
//!     { id: 'v1', type: 'Voltage Source', startNode: '1', endNode: '0', voltage: 9 },
//!     { id: 'r1', type: 'Resistor', startNode: '1', endNode: '0', resistance: 1000, powerRating: '1/4W' },
//!   ],
//! };
//!
//! try {
//!   const result = JSON.parse(analyze_json(JSON.stringify(circuit)));
//!   console.log(result.nodeVoltages, result.branchResults);
//! } catch (message) {
//!   // e.g. 'Ground node "5" not found in circuit.'
//! }
//! ```

use wasm_bindgen::prelude::*;

use crate::circuit::Circuit;
use crate::dsl;
use crate::error::DcNetError;

fn to_js(e: DcNetError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

/// Initialize panic hook for better error messages in browser console.
#[wasm_bindgen(start)]
pub fn init_panic_hook() {
    console_error_panic_hook::set_once();
}

/// Analyze a circuit document.
///
/// # Arguments
/// * `circuit_json` - `{"ground": ..., "components": [...]}`
///
/// # Returns
/// The analysis result as JSON, or the error message as a thrown string.
#[wasm_bindgen]
pub fn analyze_json(circuit_json: &str) -> Result<String, JsValue> {
    let circuit = Circuit::from_json(circuit_json).map_err(to_js)?;
    let result = circuit.analyze_checked().map_err(to_js)?;
    result.to_json().map_err(to_js)
}

/// Analyze a circuit written in the netlist format.
#[wasm_bindgen]
pub fn analyze_netlist(netlist: &str) -> Result<String, JsValue> {
    let ast = dsl::parse(netlist).map_err(to_js)?;
    let circuit = Circuit::from_ast(ast).map_err(to_js)?;
    let result = circuit.analyze_checked().map_err(to_js)?;
    result.to_json().map_err(to_js)
}

/// Get the library version.
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
