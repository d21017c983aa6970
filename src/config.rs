//! Mapping configuration.
//!
//! The configuration may be built programmatically, or read from a TOML
//! document such as:
//!
//! ```toml
//! travelCostType = "linkLength"
//! maxWeightDistance = 30.0
//! cutBuffer = 150.0
//!
//! [modeRoutingAssignment]
//! bus = ["bus", "car"]
//! rail = ["rail", "light_rail"]
//! ```
//!
//! When `cutBuffer` is omitted it defaults to five times the
//! `maxWeightDistance`.

use std::collections::BTreeSet;
use std::path::Path;

use rustc_hash::FxHashMap;
use serde::Deserialize;
use strum::{Display, EnumString};

/// Multiplier applied to the maximum weighting distance when no
/// explicit cut buffer is configured.
pub const DEFAULT_CUT_BUFFER_FACTOR: f64 = 5.0;

/// The policy used to derive the base cost of a link.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Display, EnumString)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "camelCase")]
pub enum TravelCostType {
    /// The cost of a link is its length.
    #[default]
    LinkLength,

    /// The cost of a link is its free-flow travel time.
    TravelTime,
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("maximum weighting distance must be positive and finite, got {0}")]
    InvalidMaxWeightDistance(f64),

    #[error("cut buffer must be positive and finite, got {0}")]
    InvalidCutBuffer(f64),

    #[error("could not read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Parameters of the shape-aware mapping run.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingConfig {
    /// Maps the transport mode of a schedule route onto the set
    /// of network link modes it may travel upon.
    #[serde(default)]
    pub mode_routing_assignment: FxHashMap<String, BTreeSet<String>>,

    #[serde(default)]
    pub travel_cost_type: TravelCostType,

    /// Distance to the shape at which a link loses its proximity discount.
    pub max_weight_distance: f64,

    /// Radius around the shape outside which the network is cut away.
    #[serde(default)]
    pub cut_buffer: Option<f64>,
}

impl MappingConfig {
    pub fn new(max_weight_distance: f64) -> Self {
        Self {
            mode_routing_assignment: FxHashMap::default(),
            travel_cost_type: TravelCostType::default(),
            max_weight_distance,
            cut_buffer: None,
        }
    }

    pub fn with_travel_cost_type(mut self, cost_type: TravelCostType) -> Self {
        self.travel_cost_type = cost_type;
        self
    }

    pub fn with_cut_buffer(mut self, cut_buffer: f64) -> Self {
        self.cut_buffer = Some(cut_buffer);
        self
    }

    /// Assigns the network modes a schedule transport mode may use.
    pub fn with_mode_assignment<I, S>(mut self, transport_mode: &str, network_modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.mode_routing_assignment.insert(
            transport_mode.to_string(),
            network_modes.into_iter().map(Into::into).collect(),
        );
        self
    }

    /// The buffer radius, falling back to
    /// [`DEFAULT_CUT_BUFFER_FACTOR`] × `max_weight_distance`.
    #[inline]
    pub fn cut_buffer(&self) -> f64 {
        self.cut_buffer
            .unwrap_or(DEFAULT_CUT_BUFFER_FACTOR * self.max_weight_distance)
    }

    /// The network modes assigned to a schedule transport mode.
    pub fn network_modes(&self, transport_mode: &str) -> Option<&BTreeSet<String>> {
        self.mode_routing_assignment.get(transport_mode)
    }

    /// Rejects configurations under which the cost factor is undefined.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let distance = self.max_weight_distance;
        if !distance.is_finite() || distance <= 0.0 {
            return Err(ConfigError::InvalidMaxWeightDistance(distance));
        }

        let buffer = self.cut_buffer();
        if !buffer.is_finite() || buffer <= 0.0 {
            return Err(ConfigError::InvalidCutBuffer(buffer));
        }

        Ok(())
    }

    /// Parses and validates a TOML configuration document.
    pub fn from_toml_str(document: &str) -> Result<Self, ConfigError> {
        let config: MappingConfig = toml::from_str(document)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let document = std::fs::read_to_string(path)?;
        Self::from_toml_str(&document)
    }
}
