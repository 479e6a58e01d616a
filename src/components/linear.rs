//! Resistors and their power ratings.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::circuit::{ComponentId, NodeId};

/// Standard resistor power ratings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PowerRating {
    #[serde(rename = "1/8W")]
    EighthWatt,
    #[default]
    #[serde(rename = "1/4W")]
    QuarterWatt,
    #[serde(rename = "1/2W")]
    HalfWatt,
    #[serde(rename = "1W")]
    OneWatt,
    #[serde(rename = "2W")]
    TwoWatt,
}

/// Rating label and rated dissipation in watts.
pub static POWER_RATINGS: [(PowerRating, &str, f64); 5] = [
    (PowerRating::EighthWatt, "1/8W", 0.125),
    (PowerRating::QuarterWatt, "1/4W", 0.25),
    (PowerRating::HalfWatt, "1/2W", 0.5),
    (PowerRating::OneWatt, "1W", 1.0),
    (PowerRating::TwoWatt, "2W", 2.0),
];

impl PowerRating {
    fn entry(&self) -> &'static (PowerRating, &'static str, f64) {
        match self {
            Self::EighthWatt => &POWER_RATINGS[0],
            Self::QuarterWatt => &POWER_RATINGS[1],
            Self::HalfWatt => &POWER_RATINGS[2],
            Self::OneWatt => &POWER_RATINGS[3],
            Self::TwoWatt => &POWER_RATINGS[4],
        }
    }

    /// Maximum continuous dissipation in watts.
    pub fn watts(&self) -> f64 {
        self.entry().2
    }

    /// Label as printed on a parts list, e.g. `"1/4W"`.
    pub fn label(&self) -> &'static str {
        self.entry().1
    }

    /// Find the rating with exactly this wattage.
    pub fn from_watts(watts: f64) -> Option<Self> {
        POWER_RATINGS
            .iter()
            .find(|(_, _, w)| (w - watts).abs() < 1e-9)
            .map(|(rating, _, _)| *rating)
    }
}

impl fmt::Display for PowerRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PowerRating {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        POWER_RATINGS
            .iter()
            .find(|(_, label, _)| label.eq_ignore_ascii_case(s))
            .map(|(rating, _, _)| *rating)
            .ok_or_else(|| format!("unknown power rating '{}'", s))
    }
}

/// A resistor component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Resistor {
    pub id: ComponentId,
    pub start_node: NodeId,
    pub end_node: NodeId,
    /// Resistance in ohms
    pub resistance: f64,
    #[serde(default)]
    pub power_rating: PowerRating,
}

impl Resistor {
    /// Create a new resistor.
    pub fn new(
        id: impl Into<ComponentId>,
        start_node: impl Into<NodeId>,
        end_node: impl Into<NodeId>,
        resistance: f64,
        power_rating: PowerRating,
    ) -> Self {
        Self {
            id: id.into(),
            start_node: start_node.into(),
            end_node: end_node.into(),
            resistance,
            power_rating,
        }
    }

    /// Get the conductance (1/R).
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }

    /// Thermal overload message if `power` exceeds the rating.
    pub fn overload_warning(&self, power: f64) -> Option<String> {
        let rated = self.power_rating.watts();
        (power > rated).then(|| {
            format!(
                "Thermal overload! Power ({:.3}W) > Rating ({}W)",
                power, rated
            )
        })
    }
}
