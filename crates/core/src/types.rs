use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Handle to a carved room while a grid is being assembled.
    pub struct RoomId;
}

/// Integer grid position. Ordering is row-major (`y` first) so sorted
/// collections of coordinates iterate the grid the way it is printed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub y: i32,
    pub x: i32,
}

impl Coord {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { y, x }
    }

    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self { y: self.y + dy, x: self.x + dx }
    }

    pub fn manhattan(self, other: Self) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Orthogonal neighbours in a fixed order: down, right, up, left.
    pub fn neighbors(self) -> [Self; 4] {
        [self.offset(0, 1), self.offset(1, 0), self.offset(0, -1), self.offset(-1, 0)]
    }

    /// Sub-cell tolerant comparison for callers that hold floating-point positions.
    pub fn approx_eq(self, x: f32, y: f32) -> bool {
        (self.x as f32 - x).abs() < 1.0 && (self.y as f32 - y).abs() < 1.0
    }

    pub fn along(self, axis: Axis) -> i32 {
        match axis {
            Axis::Horizontal => self.x,
            Axis::Vertical => self.y,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Wall,
    Room,
    Corridor,
}

impl CellKind {
    pub fn glyph(self) -> char {
        match self {
            Self::Wall => '#',
            Self::Room => '.',
            Self::Corridor => ',',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    pub fn perpendicular(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    /// Unit step along the axis.
    pub fn unit(self) -> (i32, i32) {
        match self {
            Self::Horizontal => (1, 0),
            Self::Vertical => (0, 1),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum DangerKind {
    FireTrap,
    PatrolHorizontal,
    PatrolVertical,
}

impl DangerKind {
    /// Axis the creature walks back and forth on; `None` for stationary hazards.
    pub fn patrol_axis(self) -> Option<Axis> {
        match self {
            Self::FireTrap => None,
            Self::PatrolHorizontal => Some(Axis::Horizontal),
            Self::PatrolVertical => Some(Axis::Vertical),
        }
    }

    pub fn is_stationary(self) -> bool {
        self.patrol_axis().is_none()
    }

    pub fn patrolling(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::PatrolHorizontal,
            Axis::Vertical => Self::PatrolVertical,
        }
    }

    /// Score change applied to the player on contact.
    pub fn contact_score_delta(self) -> i32 {
        -1
    }

    pub fn glyph(self) -> char {
        match self {
            Self::FireTrap => '^',
            Self::PatrolHorizontal => 'h',
            Self::PatrolVertical => 'v',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RewardKind {
    Coin,
    Potion,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RewardEffect {
    Score(u32),
    Heal(u32),
}

impl RewardKind {
    pub fn effect(self) -> RewardEffect {
        match self {
            Self::Coin => RewardEffect::Score(1),
            Self::Potion => RewardEffect::Heal(50),
        }
    }

    pub fn glyph(self) -> char {
        match self {
            Self::Coin => '$',
            Self::Potion => '!',
        }
    }
}
