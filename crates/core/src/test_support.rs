//! Layout fixtures shared by the integration suites and the fuzz harness.
//! Stands in for the layout-tree stage; the generator never calls it.

use rand_chacha::ChaCha8Rng;

use crate::layout::{Layout, LayoutCell, RoomType};
use crate::mapgen::{index_below, unit_f32};
use crate::types::Direction;

const DIRECTIONS: [Direction; 4] =
    [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

fn opposite(direction: Direction) -> Direction {
    match direction {
        Direction::Up => Direction::Down,
        Direction::Down => Direction::Up,
        Direction::Left => Direction::Right,
        Direction::Right => Direction::Left,
    }
}

/// Grows a spanning tree of `rooms` partitions (clamped to `2..=width*height`)
/// from a random start. Each grown cell points its parent direction back at
/// the cell it grew from; the last one becomes the exit.
pub fn random_tree_layout(
    rng: &mut ChaCha8Rng,
    width: usize,
    height: usize,
    rooms: usize,
) -> Layout {
    let mut layout = Layout::empty(width, height);
    let target = rooms.clamp(2, (width * height).max(2));
    let first = (index_below(rng, width), index_below(rng, height));
    layout.set(first.0, first.1, Some(LayoutCell::new(RoomType::start(), None)));

    let mut grown = vec![first];
    // A 1x1 layout cannot hold both a start and an exit; stop once full.
    while grown.len() < target && grown.len() < width * height {
        let (column, row) = grown[index_below(rng, grown.len())];
        let direction = DIRECTIONS[index_below(rng, DIRECTIONS.len())];
        let (dx, dy) = direction.delta();
        let (Some(next_column), Some(next_row)) =
            (column.checked_add_signed(dx as isize), row.checked_add_signed(dy as isize))
        else {
            continue;
        };
        if next_column >= width
            || next_row >= height
            || layout.get(next_column, next_row).is_some()
        {
            continue;
        }

        let room_type = if grown.len() + 1 == target {
            RoomType::exit()
        } else {
            RoomType::new(unit_f32(rng), unit_f32(rng))
        };
        let cell = LayoutCell::new(room_type, Some(opposite(direction)));
        layout.set(next_column, next_row, Some(cell));
        grown.push((next_column, next_row));
    }
    layout
}
