//! DC network analysis.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::circuit::{ComponentId, NodeId, Topology};
use crate::components::{Component, Switch, SWITCH_CLOSED_RESISTANCE, SWITCH_OPEN_RESISTANCE};
use crate::error::{DcNetError, Result};

use super::mna::{voltage, MnaMatrix};
use super::PIVOT_TOLERANCE;

/// Configuration for the analyzer.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Pivots smaller than this mark the system as singular.
    pub pivot_tolerance: f64,
    /// Resistance of an open switch (ohms).
    pub switch_open_resistance: f64,
    /// Resistance of a closed switch (ohms).
    pub switch_closed_resistance: f64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            pivot_tolerance: PIVOT_TOLERANCE,
            switch_open_resistance: SWITCH_OPEN_RESISTANCE,
            switch_closed_resistance: SWITCH_CLOSED_RESISTANCE,
        }
    }
}

impl AnalysisConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the singular-pivot threshold.
    pub fn with_pivot_tolerance(mut self, tolerance: f64) -> Self {
        self.pivot_tolerance = tolerance;
        self
    }

    /// Set the resistance used for open switches.
    pub fn with_switch_open_resistance(mut self, ohms: f64) -> Self {
        self.switch_open_resistance = ohms;
        self
    }

    /// Set the resistance used for closed switches.
    pub fn with_switch_closed_resistance(mut self, ohms: f64) -> Self {
        self.switch_closed_resistance = ohms;
        self
    }

    /// Effective resistance of a switch in its current state.
    pub fn switch_resistance(&self, switch: &Switch) -> f64 {
        if switch.is_open {
            self.switch_open_resistance
        } else {
            self.switch_closed_resistance
        }
    }
}

/// Solved voltage of one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeVoltage {
    pub node_id: NodeId,
    pub voltage: f64,
}

/// Electrical quantities of one component.
///
/// `current` is signed, positive when flowing from start node to end node
/// through the component. Voltage sources report no power.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BranchResult {
    pub component_id: ComponentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub power: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Outcome of a successful analysis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Ground first, then every other node in index order
    pub node_voltages: Vec<NodeVoltage>,
    /// One entry per component, in component order
    pub branch_results: Vec<BranchResult>,
}

impl AnalysisResult {
    /// Voltage of a node, if it is part of the circuit.
    pub fn voltage(&self, node: &str) -> Option<f64> {
        self.node_voltages
            .iter()
            .find(|nv| nv.node_id.as_str() == node)
            .map(|nv| nv.voltage)
    }

    /// Result for a component id.
    pub fn branch(&self, component: &str) -> Option<&BranchResult> {
        self.branch_results
            .iter()
            .find(|b| b.component_id.as_str() == component)
    }

    /// All thermal overload warnings.
    pub fn warnings(&self) -> impl Iterator<Item = (&ComponentId, &str)> {
        self.branch_results
            .iter()
            .filter_map(|b| b.warning.as_deref().map(|w| (&b.component_id, w)))
    }

    /// Check whether any branch carries a warning.
    pub fn has_warnings(&self) -> bool {
        self.warnings().next().is_some()
    }

    /// Serialize to pretty JSON in the front-end result shape.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Analyze a DC network with the default configuration.
///
/// `ground` names the 0 V reference node and must be an endpoint of some
/// component. An empty component list is a trivially solved circuit.
pub fn analyze(components: &[Component], ground: &str) -> Result<AnalysisResult> {
    analyze_with_config(components, ground, &AnalysisConfig::default())
}

/// Analyze a DC network.
///
/// 1. Index nodes and voltage sources ([`Topology`])
/// 2. Stamp conductances and source constraints into the MNA system
/// 3. Solve with Gauss-Jordan elimination
/// 4. Decode node voltages, then derive per-branch current, power and
///    thermal warnings
pub fn analyze_with_config(
    components: &[Component],
    ground: &str,
    config: &AnalysisConfig,
) -> Result<AnalysisResult> {
    if components.is_empty() {
        debug!("empty circuit, nothing to solve");
        return Ok(AnalysisResult::default());
    }

    let topology = Topology::build(components, ground)?;
    let size = topology.matrix_size();
    debug!(
        nodes = topology.num_free_nodes() + 1,
        sources = topology.num_sources(),
        size,
        "assembling MNA system"
    );

    let mut matrix = MnaMatrix::new(size);
    for (pos, component) in components.iter().enumerate() {
        let n1 = topology.node_index(component.start_node());
        let n2 = topology.node_index(component.end_node());

        match component {
            Component::Resistor(r) => {
                if r.resistance > 0.0 {
                    trace!(id = %r.id, g = r.conductance(), "stamp resistor");
                    matrix.stamp_conductance(n1, n2, r.conductance());
                } else {
                    debug!(id = %r.id, resistance = r.resistance, "resistor without positive resistance not stamped");
                }
            }

            Component::Switch(s) => {
                let g = 1.0 / config.switch_resistance(s);
                trace!(id = %s.id, open = s.is_open, g, "stamp switch");
                matrix.stamp_conductance(n1, n2, g);
            }

            Component::VoltageSource(v) => {
                if let Some(branch) = topology.branch(pos) {
                    let br = topology.branch_index(branch);
                    trace!(id = %v.id, row = br, voltage = v.voltage, "stamp voltage source");
                    matrix.stamp_voltage_source(n1, n2, br, v.voltage);
                }
            }
        }
    }

    let x = match matrix.solve(config.pivot_tolerance) {
        Ok(x) => x,
        Err(DcNetError::SingularMatrix) => {
            debug!("MNA matrix is singular");
            return Err(DcNetError::UnsolvableCircuit);
        }
        Err(e) => return Err(e),
    };

    let mut node_voltages = Vec::with_capacity(topology.num_free_nodes() + 1);
    node_voltages.push(NodeVoltage {
        node_id: NodeId::new(topology.ground()),
        voltage: 0.0,
    });
    node_voltages.extend(
        topology
            .free_nodes()
            .iter()
            .enumerate()
            .map(|(i, &node)| NodeVoltage {
                node_id: node.clone(),
                voltage: x[i],
            }),
    );

    let branch_results = components
        .iter()
        .enumerate()
        .map(|(pos, component)| {
            let v_start = voltage(&x, topology.node_index(component.start_node()));
            let v_end = voltage(&x, topology.node_index(component.end_node()));
            let mut result = BranchResult {
                component_id: component.id().clone(),
                current: None,
                power: None,
                warning: None,
            };

            match component {
                Component::Resistor(r) => {
                    let (current, power) = dissipation(v_start, v_end, r.resistance);
                    result.current = Some(current);
                    result.power = Some(power);
                    result.warning = r.overload_warning(power);
                    if let Some(ref message) = result.warning {
                        warn!(id = %r.id, power, rating = r.power_rating.watts(), "{}", message);
                    }
                }
                Component::Switch(s) => {
                    let (current, power) = dissipation(v_start, v_end, config.switch_resistance(s));
                    result.current = Some(current);
                    result.power = Some(power);
                }
                Component::VoltageSource(_) => {
                    result.current = topology
                        .branch(pos)
                        .map(|branch| x[topology.branch_index(branch)]);
                }
            }

            result
        })
        .collect();

    Ok(AnalysisResult {
        node_voltages,
        branch_results,
    })
}

/// Current through and power dissipated in a resistance.
fn dissipation(v_start: f64, v_end: f64, resistance: f64) -> (f64, f64) {
    let current = (v_start - v_end) / resistance;
    (current, current * current * resistance)
}
