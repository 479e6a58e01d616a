//! Ideal DC voltage sources.

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, NodeId};

/// A voltage source component.
///
/// Voltage sources require an extra row/column in the MNA matrix for the
/// branch current. The source enforces: V(start) - V(end) = voltage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoltageSource {
    pub id: ComponentId,
    /// Positive terminal
    pub start_node: NodeId,
    /// Negative terminal
    pub end_node: NodeId,
    /// Source voltage in volts (may be negative)
    pub voltage: f64,
}

impl VoltageSource {
    /// Create a new voltage source.
    pub fn new(
        id: impl Into<ComponentId>,
        start_node: impl Into<NodeId>,
        end_node: impl Into<NodeId>,
        voltage: f64,
    ) -> Self {
        Self {
            id: id.into(),
            start_node: start_node.into(),
            end_node: end_node.into(),
            voltage,
        }
    }
}
