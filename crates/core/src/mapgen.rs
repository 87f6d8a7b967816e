//! Procedural grid generation: rooms and corridors carved from a partition
//! layout, then populated with hazards and rewards.

pub mod model;

mod carve;
mod contents;
mod generator;
mod grid;
mod populate;
mod room;
mod seed;

pub use contents::RoomContents;
pub use generator::GridGenerator;
pub use grid::Grid;
pub use model::GridDefinition;
pub use populate::{
    DiffusionReport, PopulationSummary, distance_field, populate, populate_with_summary,
    safe_path_network,
};
pub use room::Room;
pub use seed::{index_below, unit_f32};

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::layout::Layout;

pub fn generate_grid(
    seed: u64,
    config: GeneratorConfig,
    layout: &Layout,
) -> Result<GridDefinition, GenerationError> {
    GridGenerator::new(seed, config).generate(layout)
}
