pub mod config;
pub mod error;
pub mod layout;
pub mod mapgen;
pub mod test_support;
pub mod types;

pub use config::{GeneratorConfig, GridConfig, InfluencePolicy, PopulationPolicy};
pub use error::{ConfigError, GenerationError};
pub use layout::{Layout, LayoutCell, RoomRole, RoomType};
pub use mapgen::{GridDefinition, GridGenerator, generate_grid};
pub use types::*;
