//! Circuit validation.
//!
//! These checks belong to whoever builds a circuit (netlist loader, JSON
//! import, CLI). The analyzer itself accepts anything and only reports what
//! the solvability check catches.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::components::Component;
use crate::error::{DcNetError, Result};

use super::Circuit;

/// Validate a circuit before analysis.
///
/// Checks:
/// - Component ids are unique and non-empty
/// - Node ids are non-empty and each component joins two distinct nodes
/// - Resistor values are positive and finite
/// - Source voltages are finite
/// - The ground node is non-empty
/// - Every node has a path to ground
pub fn validate_circuit(circuit: &Circuit) -> Result<()> {
    if circuit.ground.as_str().is_empty() {
        return Err(DcNetError::InvalidTopology {
            message: "ground node id is empty".to_string(),
        });
    }

    let mut ids = HashSet::new();
    for component in &circuit.components {
        let id = component.id().as_str();
        if id.is_empty() {
            return Err(DcNetError::InvalidTopology {
                message: format!("{} with an empty id", component.kind()),
            });
        }
        if !ids.insert(id) {
            return Err(DcNetError::DuplicateComponent { id: id.to_string() });
        }

        let [start, end] = component.nodes();
        if start.as_str().is_empty() || end.as_str().is_empty() {
            return Err(DcNetError::InvalidTopology {
                message: format!("component '{}' has an empty node id", id),
            });
        }
        if start == end {
            return Err(DcNetError::InvalidTopology {
                message: format!(
                    "component '{}' connects node '{}' to itself",
                    id, start
                ),
            });
        }

        match component {
            Component::Resistor(r) => {
                if !(r.resistance.is_finite() && r.resistance > 0.0) {
                    return Err(DcNetError::InvalidTopology {
                        message: format!(
                            "resistor '{}' must have a positive resistance, got {}",
                            id, r.resistance
                        ),
                    });
                }
            }
            Component::VoltageSource(v) => {
                if !v.voltage.is_finite() {
                    return Err(DcNetError::InvalidTopology {
                        message: format!("voltage source '{}' has a non-finite voltage", id),
                    });
                }
            }
            Component::Switch(_) => {}
        }
    }

    check_path_to_ground(circuit)
}

/// Every node must reach the ground through some component. Open switches
/// count as a path.
fn check_path_to_ground(circuit: &Circuit) -> Result<()> {
    let ground = circuit.ground.as_str();
    let mut order = Vec::new();
    let mut adjacency: HashMap<&str, Vec<&str>> = HashMap::new();
    for component in &circuit.components {
        let [start, end] = component.nodes();
        for (a, b) in [(start.as_str(), end.as_str()), (end.as_str(), start.as_str())] {
            adjacency
                .entry(a)
                .or_insert_with(|| {
                    order.push(a);
                    Vec::new()
                })
                .push(b);
        }
    }

    // Unknown ground is reported by the analyzer
    if !adjacency.contains_key(ground) {
        return Ok(());
    }

    let mut reached = HashSet::from([ground]);
    let mut queue = VecDeque::from([ground]);
    while let Some(node) = queue.pop_front() {
        for &next in adjacency.get(node).into_iter().flatten() {
            if reached.insert(next) {
                queue.push_back(next);
            }
        }
    }

    match order.into_iter().find(|node| !reached.contains(node)) {
        Some(node) => Err(DcNetError::InvalidTopology {
            message: format!("node '{}' has no path to ground node '{}'", node, ground),
        }),
        None => Ok(()),
    }
}
