//! Switches.

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, NodeId};

/// Resistance of an open switch in ohms.
pub const SWITCH_OPEN_RESISTANCE: f64 = 1e9;

/// Resistance of a closed switch in ohms.
pub const SWITCH_CLOSED_RESISTANCE: f64 = 1e-3;

/// A switch component.
///
/// Modeled as a resistance so it stamps like any other conductance:
/// - Closed: 1 milliohm
/// - Open: 1 gigaohm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Switch {
    pub id: ComponentId,
    pub start_node: NodeId,
    pub end_node: NodeId,
    pub is_open: bool,
}

impl Switch {
    /// Create a new switch.
    pub fn new(
        id: impl Into<ComponentId>,
        start_node: impl Into<NodeId>,
        end_node: impl Into<NodeId>,
        is_open: bool,
    ) -> Self {
        Self {
            id: id.into(),
            start_node: start_node.into(),
            end_node: end_node.into(),
            is_open,
        }
    }
}
