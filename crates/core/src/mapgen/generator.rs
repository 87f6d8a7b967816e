//! Grid generation orchestration: layout validation followed by the carving
//! and population pipeline.

mod pipeline;

use crate::config::GeneratorConfig;
use crate::error::GenerationError;
use crate::layout::{Layout, RoomRole};

use super::model::GridDefinition;
use pipeline::PartitionSize;

pub struct GridGenerator {
    seed: u64,
    config: GeneratorConfig,
}

impl GridGenerator {
    pub fn new(seed: u64, config: GeneratorConfig) -> Self {
        Self { seed, config }
    }

    pub fn with_defaults(seed: u64) -> Self {
        Self::new(seed, GeneratorConfig::default())
    }

    pub fn generate(&self, layout: &Layout) -> Result<GridDefinition, GenerationError> {
        let size = validate_layout(&self.config, layout)?;
        pipeline::generate_grid(&self.config, self.seed, layout, size)
    }
}

fn validate_layout(
    config: &GeneratorConfig,
    layout: &Layout,
) -> Result<PartitionSize, GenerationError> {
    config.validate()?;
    let grid = &config.grid;

    let width = layout.width();
    let height = layout.height();
    if width == 0 || height == 0 {
        return Err(GenerationError::EmptyLayout);
    }
    for (row, cells) in layout.rows().iter().enumerate() {
        if cells.len() != width {
            return Err(GenerationError::RaggedLayout { row, expected: width, found: cells.len() });
        }
    }
    if width > grid.columns || height > grid.rows {
        return Err(GenerationError::LayoutTooLarge {
            layout_width: width,
            layout_height: height,
            columns: grid.columns,
            rows: grid.rows,
        });
    }

    let size = PartitionSize { width: grid.columns / width, height: grid.rows / height };
    if size.width <= 2 * grid.wall_offset || size.height <= 2 * grid.wall_offset {
        return Err(GenerationError::PartitionTooSmall {
            width: size.width,
            height: size.height,
            wall_offset: grid.wall_offset,
        });
    }

    let mut starts = 0;
    let mut exits = 0;
    for (column, row, cell) in layout.cells() {
        let room_type = cell.room_type;
        for (name, value) in [("difficulty", room_type.difficulty), ("reward", room_type.reward)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(GenerationError::ScalarOutOfRange { name, row, column, value });
            }
        }

        if let Some(direction) = cell.parent {
            let (dx, dy) = direction.delta();
            let parent_column = column.checked_add_signed(dx as isize);
            let parent_row = row.checked_add_signed(dy as isize);
            let parent_exists = match (parent_column, parent_row) {
                (Some(parent_column), Some(parent_row)) => {
                    layout.get(parent_column, parent_row).is_some()
                }
                _ => false,
            };
            if !parent_exists {
                return Err(GenerationError::OrphanedParent { row, column, direction });
            }
        }

        match room_type.role {
            RoomRole::Start => starts += 1,
            RoomRole::Exit => exits += 1,
            RoomRole::Normal => {}
        }
    }

    match (starts, exits) {
        (0, _) => Err(GenerationError::MissingStart),
        (_, 0) => Err(GenerationError::MissingExit),
        (2.., _) => Err(GenerationError::DuplicateStart),
        (_, 2..) => Err(GenerationError::DuplicateExit),
        _ => Ok(size),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeSet, VecDeque};

    use proptest::prelude::*;
    use xxhash_rust::xxh3::xxh3_64;

    use super::*;
    use crate::config::GridConfig;
    use crate::layout::{LayoutCell, RoomType};
    use crate::types::{CellKind, Coord, Direction};

    /// Start in the top-left, rooms along the top row, then down the right
    /// edge to the exit.
    fn hook_layout() -> Layout {
        let mut layout = Layout::empty(3, 3);
        layout.set(0, 0, Some(LayoutCell::new(RoomType::start(), None)));
        layout.set(1, 0, Some(LayoutCell::new(RoomType::new(0.4, 0.6), Some(Direction::Left))));
        layout.set(2, 0, Some(LayoutCell::new(RoomType::new(0.7, 0.3), Some(Direction::Left))));
        layout.set(2, 1, Some(LayoutCell::new(RoomType::new(1.0, 1.0), Some(Direction::Up))));
        layout.set(2, 2, Some(LayoutCell::new(RoomType::exit(), Some(Direction::Up))));
        layout
    }

    fn small_grid_config() -> GeneratorConfig {
        GeneratorConfig {
            grid: GridConfig { rows: 15, columns: 21, ..GridConfig::default() },
            ..GeneratorConfig::default()
        }
    }

    #[test]
    fn start_and_exit_sit_at_their_partition_centres() {
        let generated = GridGenerator::with_defaults(7).generate(&hook_layout()).expect("valid");

        // 20x13 partitions: centres sit half a partition in from each origin
        assert_eq!(generated.player_start, Coord::new(10, 6));
        assert_eq!(generated.exit, Coord::new(50, 32));
        assert_eq!(generated.cell_at(generated.player_start), CellKind::Room);
    }

    #[test]
    fn same_seed_produces_byte_identical_output() {
        let layout = hook_layout();
        let a = GridGenerator::with_defaults(123_456).generate(&layout).expect("valid");
        let b = GridGenerator::with_defaults(123_456).generate(&layout).expect("valid");
        assert_eq!(xxh3_64(&a.canonical_bytes()), xxh3_64(&b.canonical_bytes()));
        assert_eq!(a, b);
    }

    #[test]
    fn different_seeds_change_irregular_rooms() {
        let layout = hook_layout();
        let a = GridGenerator::with_defaults(1).generate(&layout).expect("valid");
        let b = GridGenerator::with_defaults(2).generate(&layout).expect("valid");
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn regular_rooms_fill_their_inset_rectangles() {
        let generated =
            GridGenerator::new(3, small_grid_config()).generate(&hook_layout()).expect("valid");

        // 7x5 partitions are below the irregular threshold
        for y in 1..4 {
            for x in 1..6 {
                assert_eq!(generated.cell_at(Coord::new(x, y)), CellKind::Room, "({x}, {y})");
            }
        }
        assert_eq!(generated.cell_at(Coord::new(0, 0)), CellKind::Wall);
        assert_eq!(generated.cell_at(Coord::new(4, 9)), CellKind::Wall);
    }

    #[test]
    fn corridors_link_every_room_into_one_walkable_region() {
        for seed in [1_u64, 2, 3, 40, 99, 321] {
            let generated =
                GridGenerator::with_defaults(seed).generate(&hook_layout()).expect("valid");
            assert!(has_walkable_route(&generated, generated.player_start, generated.exit));
        }
    }

    #[test]
    fn dangers_and_rewards_never_share_a_tile() {
        for seed in 0..10 {
            let generated =
                GridGenerator::with_defaults(seed).generate(&hook_layout()).expect("valid");
            for pos in generated.dangers.keys() {
                assert!(!generated.rewards.contains_key(pos));
                assert_eq!(generated.cell_at(*pos), CellKind::Room);
            }
        }
    }

    #[test]
    fn missing_roles_are_reported() {
        let mut layout = hook_layout();
        layout.set(2, 2, Some(LayoutCell::new(RoomType::new(0.5, 0.5), Some(Direction::Up))));
        assert_eq!(
            GridGenerator::with_defaults(1).generate(&layout),
            Err(GenerationError::MissingExit)
        );

        layout.set(0, 0, Some(LayoutCell::new(RoomType::new(0.5, 0.5), None)));
        assert_eq!(
            GridGenerator::with_defaults(1).generate(&layout),
            Err(GenerationError::MissingStart)
        );
    }

    #[test]
    fn duplicate_roles_are_reported() {
        let mut layout = hook_layout();
        layout.set(2, 1, Some(LayoutCell::new(RoomType::start(), Some(Direction::Up))));
        assert_eq!(
            GridGenerator::with_defaults(1).generate(&layout),
            Err(GenerationError::DuplicateStart)
        );
    }

    #[test]
    fn malformed_layouts_are_rejected() {
        let generator = GridGenerator::with_defaults(1);

        assert_eq!(generator.generate(&Layout::default()), Err(GenerationError::EmptyLayout));

        let mut orphan = hook_layout();
        orphan.set(0, 2, Some(LayoutCell::new(RoomType::new(0.1, 0.1), Some(Direction::Down))));
        assert!(matches!(
            generator.generate(&orphan),
            Err(GenerationError::OrphanedParent { row: 2, column: 0, direction: Direction::Down })
        ));

        let mut out_of_range = hook_layout();
        let too_hard = LayoutCell::new(RoomType::new(1.5, 0.1), Some(Direction::Left));
        out_of_range.set(1, 0, Some(too_hard));
        assert!(matches!(
            generator.generate(&out_of_range),
            Err(GenerationError::ScalarOutOfRange { name: "difficulty", .. })
        ));

        let ragged = Layout::new(vec![vec![None, None], vec![None]]);
        assert!(matches!(generator.generate(&ragged), Err(GenerationError::RaggedLayout { .. })));
    }

    #[test]
    fn partitions_must_leave_room_inside_the_walls() {
        let config = GeneratorConfig {
            grid: GridConfig { rows: 6, columns: 6, wall_offset: 1, ..GridConfig::default() },
            ..GeneratorConfig::default()
        };
        let result = GridGenerator::new(1, config).generate(&hook_layout());
        assert!(matches!(
            result,
            Err(GenerationError::PartitionTooSmall { width: 2, height: 2, .. })
        ));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]
        #[test]
        fn placements_never_land_on_corridors(seed in any::<u64>()) {
            let layout = hook_layout();
            let generator = GridGenerator::with_defaults(seed);
            let generated = generator.generate(&layout).expect("valid");

            let corridors: BTreeSet<Coord> = generated
                .grid
                .positions()
                .filter(|&pos| generated.cell_at(pos) == CellKind::Corridor)
                .collect();
            prop_assert!(!corridors.is_empty());
            for pos in generated.dangers.keys().chain(generated.rewards.keys()) {
                prop_assert!(!corridors.contains(pos));
            }
        }
    }

    fn has_walkable_route(generated: &GridDefinition, start: Coord, goal: Coord) -> bool {
        let mut open = VecDeque::from([start]);
        let mut seen = BTreeSet::from([start]);
        while let Some(pos) = open.pop_front() {
            if pos == goal {
                return true;
            }
            for next in pos.neighbors() {
                if generated.cell_at(next) == CellKind::Wall || !seen.insert(next) {
                    continue;
                }
                open.push_back(next);
            }
        }
        false
    }
}
