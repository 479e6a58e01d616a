//! Abstract Syntax Tree types for the netlist format.

use std::collections::HashMap;

/// Complete AST representation of a parsed netlist.
#[derive(Debug, Clone, Default)]
pub struct CircuitAst {
    /// All component instances, in file order
    pub components: Vec<ComponentDef>,
    /// Reference node from `.ground`, if given
    pub ground_node: Option<String>,
}

impl CircuitAst {
    /// Create a new empty circuit AST.
    pub fn new() -> Self {
        Self::default()
    }
}

/// A component definition from the netlist.
#[derive(Debug, Clone)]
pub struct ComponentDef {
    /// Component type (R, V, SW)
    pub component_type: ComponentType,
    /// Unique component name, used as the component id
    pub name: String,
    /// Connected node names
    pub nodes: Vec<String>,
    /// Component value (resistance or voltage)
    pub value: Option<f64>,
    /// Bare word after the nodes, e.g. `open` / `closed` for switches
    pub state: Option<String>,
    /// `key=value` parameters, keys lowercased
    pub params: HashMap<String, f64>,
    /// Source line number for error reporting
    pub line: usize,
}

/// Component types supported by the netlist format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentType {
    /// Resistor
    Resistor,
    /// Voltage Source
    VoltageSource,
    /// Switch
    Switch,
}

impl ComponentType {
    /// Parse a component type from its netlist prefix.
    pub fn from_prefix(prefix: char) -> Option<Self> {
        match prefix.to_ascii_uppercase() {
            'R' => Some(Self::Resistor),
            'V' => Some(Self::VoltageSource),
            _ => None,
        }
    }

    /// Parse a component type from a keyword.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword.to_ascii_uppercase().as_str() {
            "SW" | "SWITCH" => Some(Self::Switch),
            "RES" | "RESISTOR" => Some(Self::Resistor),
            "VSRC" => Some(Self::VoltageSource),
            _ => None,
        }
    }

    /// Get the expected number of nodes for this component type.
    pub fn expected_node_count(&self) -> usize {
        match self {
            Self::Resistor | Self::VoltageSource | Self::Switch => 2,
        }
    }
}
