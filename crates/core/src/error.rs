//! Error types surfaced by layout validation and configuration loading.

use thiserror::Error;

use crate::types::Direction;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("failed to parse generator config: {0}")]
    Parse(String),
    #[error("grid must be at least 1x1, got {rows}x{columns}")]
    EmptyGrid { rows: usize, columns: usize },
    #[error("corridor width must be at least 1")]
    ZeroCorridorWidth,
    #[error("{name} must lie in [0, 1], got {value}")]
    OutOfUnitRange { name: &'static str, value: f32 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("coin tier fractions sum to {sum}, which exceeds 1")]
    CoinTiersOverflow { sum: f32 },
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum GenerationError {
    #[error("invalid generator config: {0}")]
    Config(#[from] ConfigError),
    #[error("layout has no cells")]
    EmptyLayout,
    #[error("layout row {row} has {found} cells, expected {expected}")]
    RaggedLayout { row: usize, expected: usize, found: usize },
    #[error("layout of {layout_width}x{layout_height} does not fit a {columns}x{rows} grid")]
    LayoutTooLarge { layout_width: usize, layout_height: usize, columns: usize, rows: usize },
    #[error("partition of {width}x{height} leaves no room inside a wall offset of {wall_offset}")]
    PartitionTooSmall { width: usize, height: usize, wall_offset: usize },
    #[error("{name} of cell ({column}, {row}) must lie in [0, 1], got {value}")]
    ScalarOutOfRange { name: &'static str, row: usize, column: usize, value: f32 },
    #[error("cell ({column}, {row}) points {direction:?} at a missing parent partition")]
    OrphanedParent { row: usize, column: usize, direction: Direction },
    #[error("layout has no start partition")]
    MissingStart,
    #[error("layout has no exit partition")]
    MissingExit,
    #[error("layout has more than one start partition")]
    DuplicateStart,
    #[error("layout has more than one exit partition")]
    DuplicateExit,
}
