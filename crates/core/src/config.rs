//! Tunable generation constants. Every coefficient the populator uses lives here so
//! balance changes never touch the algorithms.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub grid: GridConfig,
    pub population: PopulationPolicy,
}

impl GeneratorConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(source).map_err(|error| ConfigError::Parse(error.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.validate()?;
        self.population.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: usize,
    pub columns: usize,
    /// Wall thickness, in cells, kept between a partition edge and its room.
    pub wall_offset: usize,
    pub corridor_width: usize,
    /// Partition area at or above which rooms are flooded instead of filled.
    pub irregular_room_threshold: usize,
    /// Per-step multiplier on the flood fill's acceptance probability.
    pub flood_decay: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: 40,
            columns: 60,
            wall_offset: 1,
            corridor_width: 2,
            irregular_room_threshold: 40,
            flood_decay: 0.95,
        }
    }
}

impl GridConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ConfigError::EmptyGrid { rows: self.rows, columns: self.columns });
        }
        if self.corridor_width == 0 {
            return Err(ConfigError::ZeroCorridorWidth);
        }
        unit_range("flood_decay", self.flood_decay)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PopulationPolicy {
    pub trap_coefficient: f32,
    pub patroller_coefficient: f32,
    pub coin_coefficient: f32,
    pub min_traps: usize,
    pub min_patrollers: usize,
    pub min_coins: usize,

    /// Normalized entrance distance above which a tile counts as deep.
    pub deep_threshold: f32,
    /// Manhattan distance to the safe path within which a tile is an ambush spot.
    pub ambush_radius: u32,
    /// Shortest contiguous placeable run that can host a patrolling creature.
    pub min_patrol_run: usize,

    pub coin_near_hazard_fraction: f32,
    pub coin_deep_fraction: f32,
    pub coin_hazard_radius: u32,
    /// Scales the room's reward scalar into the chance of one potion.
    pub potion_chance: f32,

    pub influence: InfluencePolicy,
}

impl Default for PopulationPolicy {
    fn default() -> Self {
        Self {
            trap_coefficient: 0.2,
            patroller_coefficient: 0.15,
            coin_coefficient: 0.25,
            min_traps: 1,
            min_patrollers: 1,
            min_coins: 2,
            deep_threshold: 0.6,
            ambush_radius: 2,
            min_patrol_run: 4,
            coin_near_hazard_fraction: 0.4,
            coin_deep_fraction: 0.3,
            coin_hazard_radius: 2,
            potion_chance: 0.1,
            influence: InfluencePolicy::default(),
        }
    }
}

impl PopulationPolicy {
    fn validate(&self) -> Result<(), ConfigError> {
        non_negative("trap_coefficient", self.trap_coefficient)?;
        non_negative("patroller_coefficient", self.patroller_coefficient)?;
        non_negative("coin_coefficient", self.coin_coefficient)?;
        unit_range("deep_threshold", self.deep_threshold)?;
        unit_range("coin_near_hazard_fraction", self.coin_near_hazard_fraction)?;
        unit_range("coin_deep_fraction", self.coin_deep_fraction)?;
        unit_range("potion_chance", self.potion_chance)?;
        let sum = self.coin_near_hazard_fraction + self.coin_deep_fraction;
        if sum > 1.0 {
            return Err(ConfigError::CoinTiersOverflow { sum });
        }
        self.influence.validate()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InfluencePolicy {
    /// Run the risk-weighted bonus coin pass after regular placement.
    pub enabled: bool,
    /// Every tile starts at `difficulty * base_factor`.
    pub base_factor: f32,
    pub trap_strength: f32,
    pub trap_radius: u32,
    pub hop_decay: f32,
    pub patroller_strength: f32,
    pub perpendicular_spill: f32,
    pub self_weight: f32,
    pub max_iterations: usize,
    pub epsilon: f32,
    pub bonus_coin_factor: f32,
    pub bonus_threshold: f32,
}

impl Default for InfluencePolicy {
    fn default() -> Self {
        Self {
            enabled: true,
            base_factor: 0.1,
            trap_strength: 0.8,
            trap_radius: 3,
            hop_decay: 0.6,
            patroller_strength: 1.0,
            perpendicular_spill: 0.7,
            self_weight: 0.7,
            max_iterations: 50,
            epsilon: 0.01,
            bonus_coin_factor: 5.0,
            bonus_threshold: 0.5,
        }
    }
}

impl InfluencePolicy {
    fn validate(&self) -> Result<(), ConfigError> {
        unit_range("influence.hop_decay", self.hop_decay)?;
        unit_range("influence.perpendicular_spill", self.perpendicular_spill)?;
        unit_range("influence.self_weight", self.self_weight)?;
        non_negative("influence.epsilon", self.epsilon)?;
        non_negative("influence.bonus_coin_factor", self.bonus_coin_factor)
    }
}

fn unit_range(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::OutOfUnitRange { name, value })
    }
}

fn non_negative(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 { Ok(()) } else { Err(ConfigError::Negative { name, value }) }
}
