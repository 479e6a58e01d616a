//! Circuit representation and validation.
//!
//! This module holds the snapshot handed to the analyzer ([`Circuit`]), the
//! per-call index assignment used to lay out the MNA system ([`Topology`]),
//! and the checks input collaborators run before analysis.

mod graph;
mod types;
mod validate;

pub use graph::{Circuit, Topology, DEFAULT_GROUND};
pub use types::*;
pub use validate::validate_circuit;
