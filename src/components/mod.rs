//! Component models for DC network analysis.
//!
//! This module provides the three supported two-terminal components:
//! - [`Resistor`] with a standard [`PowerRating`]
//! - [`VoltageSource`], an ideal DC source
//! - [`Switch`], modeled as a very large or very small resistance
//!
//! The [`Component`] enum is the tagged union the analyzer works on. Its JSON
//! form carries a `type` field (`"Resistor"`, `"Voltage Source"`, `"Switch"`).

mod controls;
mod linear;
mod sources;

pub use controls::{Switch, SWITCH_CLOSED_RESISTANCE, SWITCH_OPEN_RESISTANCE};
pub use linear::{PowerRating, Resistor, POWER_RATINGS};
pub use sources::VoltageSource;

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, NodeId};
use crate::dsl::{ComponentDef, ComponentType};
use crate::error::{DcNetError, Result};

/// A circuit component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Component {
    Resistor(Resistor),
    #[serde(rename = "Voltage Source")]
    VoltageSource(VoltageSource),
    Switch(Switch),
}

impl Component {
    /// Create a component from a netlist definition.
    pub fn from_def(def: &ComponentDef) -> Result<Self> {
        let [start, end] = match def.nodes.as_slice() {
            [start, end, ..] => [start.as_str(), end.as_str()],
            _ => {
                return Err(DcNetError::invalid_component(
                    &def.name,
                    def.line,
                    format!("expected 2 nodes, got {}", def.nodes.len()),
                ))
            }
        };

        reject_unused(def)?;

        match def.component_type {
            ComponentType::Resistor => {
                let resistance = def.value.ok_or_else(|| {
                    DcNetError::invalid_component(&def.name, def.line, "resistor requires a value")
                })?;

                let power_rating = match def.params.get("rating") {
                    Some(&watts) => PowerRating::from_watts(watts).ok_or_else(|| {
                        DcNetError::invalid_component(
                            &def.name,
                            def.line,
                            format!(
                                "rating {}W is not one of 0.125, 0.25, 0.5, 1, 2",
                                watts
                            ),
                        )
                    })?,
                    None => PowerRating::default(),
                };

                Ok(Component::Resistor(Resistor::new(
                    def.name.as_str(),
                    start,
                    end,
                    resistance,
                    power_rating,
                )))
            }

            ComponentType::VoltageSource => {
                let voltage = def.value.ok_or_else(|| {
                    DcNetError::invalid_component(&def.name, def.line, "voltage source requires a value")
                })?;
                Ok(Component::VoltageSource(VoltageSource::new(
                    def.name.as_str(),
                    start,
                    end,
                    voltage,
                )))
            }

            ComponentType::Switch => {
                let is_open = match def.state.as_deref().map(str::to_ascii_lowercase).as_deref() {
                    Some("open") | Some("off") => true,
                    Some("closed") | Some("close") | Some("on") => false,
                    Some(other) => {
                        return Err(DcNetError::invalid_component(
                            &def.name,
                            def.line,
                            format!("unknown switch state '{}' (use open or closed)", other),
                        ))
                    }
                    None => {
                        return Err(DcNetError::invalid_component(
                            &def.name,
                            def.line,
                            "switch requires a state (open or closed)",
                        ))
                    }
                };
                Ok(Component::Switch(Switch::new(def.name.as_str(), start, end, is_open)))
            }
        }
    }

    /// Get the component id.
    pub fn id(&self) -> &ComponentId {
        match self {
            Component::Resistor(r) => &r.id,
            Component::VoltageSource(v) => &v.id,
            Component::Switch(s) => &s.id,
        }
    }

    /// Start node (positive terminal for sources).
    pub fn start_node(&self) -> &NodeId {
        match self {
            Component::Resistor(r) => &r.start_node,
            Component::VoltageSource(v) => &v.start_node,
            Component::Switch(s) => &s.start_node,
        }
    }

    /// End node (negative terminal for sources).
    pub fn end_node(&self) -> &NodeId {
        match self {
            Component::Resistor(r) => &r.end_node,
            Component::VoltageSource(v) => &v.end_node,
            Component::Switch(s) => &s.end_node,
        }
    }

    /// Both terminals as `[start, end]`.
    pub fn nodes(&self) -> [&NodeId; 2] {
        [self.start_node(), self.end_node()]
    }

    /// Human-readable kind, matching the JSON `type` tag.
    pub fn kind(&self) -> &'static str {
        match self {
            Component::Resistor(_) => "Resistor",
            Component::VoltageSource(_) => "Voltage Source",
            Component::Switch(_) => "Switch",
        }
    }

    /// Check if this is a voltage source.
    pub fn is_voltage_source(&self) -> bool {
        matches!(self, Component::VoltageSource(_))
    }
}

/// Fail on netlist fields the component type has no use for.
fn reject_unused(def: &ComponentDef) -> Result<()> {
    let allowed_params: &[&str] = match def.component_type {
        ComponentType::Resistor => &["rating"],
        ComponentType::VoltageSource | ComponentType::Switch => &[],
    };
    let mut unknown: Vec<&str> = def
        .params
        .keys()
        .map(String::as_str)
        .filter(|key| !allowed_params.contains(key))
        .collect();
    if !unknown.is_empty() {
        unknown.sort_unstable();
        return Err(DcNetError::invalid_component(
            &def.name,
            def.line,
            format!("unknown parameter '{}'", unknown.join("', '")),
        ));
    }

    match def.component_type {
        ComponentType::Resistor | ComponentType::VoltageSource => match &def.state {
            Some(word) => Err(DcNetError::invalid_component(
                &def.name,
                def.line,
                format!("unexpected word '{}'", word),
            )),
            None => Ok(()),
        },
        ComponentType::Switch => match def.value {
            Some(v) => Err(DcNetError::invalid_component(
                &def.name,
                def.line,
                format!("switch takes no value, got {}", v),
            )),
            None => Ok(()),
        },
    }
}
