//! Circuit graph structure.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::types::{BranchId, NodeId};
use super::validate::validate_circuit;
use crate::components::Component;
use crate::dsl::CircuitAst;
use crate::error::{DcNetError, Result};
use crate::solver::{self, AnalysisResult};

/// Reference node used when a netlist or JSON document names none.
pub const DEFAULT_GROUND: &str = "0";

fn default_ground() -> NodeId {
    NodeId::new(DEFAULT_GROUND)
}

/// A component list together with its chosen reference node.
///
/// This is the snapshot handed to the analyzer. The JSON form is
/// `{"ground": "0", "components": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circuit {
    /// Node held at 0 V
    #[serde(default = "default_ground")]
    pub ground: NodeId,

    /// All components, in the order results are reported
    #[serde(default)]
    pub components: Vec<Component>,
}

impl Circuit {
    /// Create a circuit from components and a ground node.
    pub fn new(components: Vec<Component>, ground: impl Into<NodeId>) -> Self {
        Self {
            ground: ground.into(),
            components,
        }
    }

    /// Build a circuit from a parsed netlist.
    pub fn from_ast(ast: CircuitAst) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut components = Vec::with_capacity(ast.components.len());

        for def in &ast.components {
            if !seen.insert(def.name.as_str()) {
                return Err(DcNetError::DuplicateComponent {
                    id: def.name.clone(),
                });
            }
            components.push(Component::from_def(def)?);
        }

        let ground = ast
            .ground_node
            .map(NodeId::from)
            .unwrap_or_else(default_ground);

        Ok(Self { ground, components })
    }

    /// Parse a circuit document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the circuit document to pretty JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a component by id.
    pub fn find_component(&self, id: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.id().as_str() == id)
    }

    /// Run a DC analysis of this snapshot.
    pub fn analyze(&self) -> Result<AnalysisResult> {
        solver::analyze(&self.components, self.ground.as_str())
    }

    /// Validate, then analyze. Entry point for circuits from outside the crate.
    pub fn analyze_checked(&self) -> Result<AnalysisResult> {
        validate_circuit(self)?;
        self.analyze()
    }
}

/// Index assignment for one analysis call.
///
/// Maps every non-ground node to a matrix row and every voltage source to
/// a branch current unknown. Built once and shared by matrix assembly and
/// solution decoding so both agree on the layout.
#[derive(Debug)]
pub struct Topology<'a> {
    ground: &'a str,
    /// Non-ground nodes, in row order
    nodes: Vec<&'a NodeId>,
    node_map: HashMap<&'a str, usize>,
    /// Branch of each component, `Some` only for voltage sources
    branches: Vec<Option<BranchId>>,
    num_sources: usize,
}

impl<'a> Topology<'a> {
    /// Index the nodes and sources of `components`.
    ///
    /// Fails if `ground` is not an endpoint of any component.
    pub fn build(components: &'a [Component], ground: &'a str) -> Result<Self> {
        let mut ground_seen = false;
        let mut nodes = Vec::new();
        let mut node_map = HashMap::new();

        for node in components.iter().flat_map(|c| c.nodes()) {
            if node.as_str() == ground {
                ground_seen = true;
            } else if !node_map.contains_key(node.as_str()) {
                node_map.insert(node.as_str(), nodes.len());
                nodes.push(node);
            }
        }

        if !ground_seen {
            return Err(DcNetError::GroundNodeNotFound {
                node: ground.to_string(),
            });
        }

        let mut num_sources = 0usize;
        let branches: Vec<Option<BranchId>> = components
            .iter()
            .map(|c| {
                c.is_voltage_source().then(|| {
                    let branch = BranchId(num_sources);
                    num_sources += 1;
                    branch
                })
            })
            .collect();

        Ok(Self {
            ground,
            nodes,
            node_map,
            branches,
            num_sources,
        })
    }

    /// The reference node.
    pub fn ground(&self) -> &'a str {
        self.ground
    }

    /// Non-ground nodes, in matrix row order.
    pub fn free_nodes(&self) -> &[&'a NodeId] {
        &self.nodes
    }

    /// Number of non-ground nodes.
    pub fn num_free_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of voltage sources.
    pub fn num_sources(&self) -> usize {
        self.num_sources
    }

    /// Get the total size of the MNA system.
    pub fn matrix_size(&self) -> usize {
        self.num_free_nodes() + self.num_sources
    }

    /// Get the matrix index for a node voltage.
    /// Returns None for ground.
    pub fn node_index(&self, node: &NodeId) -> Option<usize> {
        self.node_map.get(node.as_str()).copied()
    }

    /// Branch of the component at position `component`, if it is a source.
    pub fn branch(&self, component: usize) -> Option<BranchId> {
        self.branches.get(component).copied().flatten()
    }

    /// Get the matrix index for a branch current.
    pub fn branch_index(&self, branch: BranchId) -> usize {
        self.num_free_nodes() + branch.0
    }
}
