//! Human-readable rendering of circuits and analysis results.
//!
//! Voltages are printed in volts with three decimals; branch currents and
//! powers in milliamps and milliwatts with two decimals.

use crate::circuit::Circuit;
use crate::components::Component;
use crate::solver::{AnalysisResult, BranchResult};

/// One sentence describing a component.
pub fn describe_component(component: &Component) -> String {
    match component {
        Component::Resistor(r) => format!(
            "A {} Ohm resistor (rated for {}) between node {} and {}.",
            r.resistance, r.power_rating, r.start_node, r.end_node
        ),
        Component::VoltageSource(v) => format!(
            "A {}V DC source between node {} (+) and {} (-).",
            v.voltage, v.start_node, v.end_node
        ),
        Component::Switch(s) => format!(
            "A switch between node {} and {}, which is currently {}.",
            s.start_node,
            s.end_node,
            if s.is_open { "OPEN" } else { "CLOSED" }
        ),
    }
}

/// Describe every component of a circuit, one per line.
pub fn describe_circuit(circuit: &Circuit) -> String {
    let mut lines: Vec<String> = circuit.components.iter().map(describe_component).collect();
    lines.push(format!("Node {} is the 0 V reference.", circuit.ground));
    lines.join("\n")
}

/// Format one branch line, e.g. `Resistor R1 (1->2): I = 4.85 mA, P = 23.49 mW`.
pub fn format_branch(component: Option<&Component>, branch: &BranchResult) -> String {
    let mut line = match component {
        Some(c) => format!(
            "{} {} ({}->{}):",
            c.kind(),
            branch.component_id,
            c.start_node(),
            c.end_node()
        ),
        None => format!("{}:", branch.component_id),
    };

    let mut quantities = Vec::new();
    if let Some(current) = branch.current {
        quantities.push(format!("I = {:.2} mA", current * 1000.0));
    }
    if let Some(power) = branch.power {
        quantities.push(format!("P = {:.2} mW", power * 1000.0));
    }
    if !quantities.is_empty() {
        line.push(' ');
        line.push_str(&quantities.join(", "));
    }
    if let Some(ref warning) = branch.warning {
        line.push_str("  WARNING: ");
        line.push_str(warning);
    }
    line
}

/// Render a full text report of an analysis.
pub fn render_text(circuit: &Circuit, result: &AnalysisResult) -> String {
    let mut lines = Vec::new();

    lines.push("Node Voltages:".to_string());
    if result.node_voltages.is_empty() {
        lines.push("  (none)".to_string());
    }
    for nv in &result.node_voltages {
        lines.push(format!("  Node {}: {:.3} V", nv.node_id, nv.voltage));
    }

    lines.push(String::new());
    lines.push("Branch Analysis:".to_string());
    if result.branch_results.is_empty() {
        lines.push("  (none)".to_string());
    }
    for branch in &result.branch_results {
        let component = circuit.find_component(branch.component_id.as_str());
        lines.push(format!("  {}", format_branch(component, branch)));
    }

    let overloads = result.warnings().count();
    if overloads > 0 {
        lines.push(String::new());
        lines.push(format!("{} thermal overload warning(s)", overloads));
    }

    lines.join("\n")
}
