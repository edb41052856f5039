//! The infinite tile lattice: positions, direction vectors and placement.

mod campaign;
mod placement;

pub use campaign::*;
pub use placement::*;

use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A cell on the lattice. Rows grow downward, columns grow rightward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridPosition {
    pub col: i32,
    pub row: i32,
}

impl GridPosition {
    /// Create a new position.
    pub fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// The lattice origin, home of the start node.
    pub fn origin() -> Self {
        Self::default()
    }

    /// The cell reached by stepping once along `offset`. Clamps at the lattice edge.
    pub fn offset(self, offset: Offset) -> Self {
        Self {
            col: self.col.saturating_add(offset.col),
            row: self.row.saturating_add(offset.row),
        }
    }

    /// Signed offset from `self` to `other`.
    pub fn delta_to(self, other: GridPosition) -> Offset {
        Offset::new(other.col.saturating_sub(self.col), other.row.saturating_sub(self.row))
    }

    /// Manhattan distance between two cells.
    pub fn manhattan_distance(self, other: GridPosition) -> u32 {
        self.col.abs_diff(other.col).saturating_add(self.row.abs_diff(other.row))
    }
}

impl std::fmt::Display for GridPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.col, self.row)
    }
}

/// Set of lattice cells already holding a tile.
pub type OccupiedCells = HashSet<GridPosition>;

/// A one-step direction vector on the lattice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub col: i32,
    pub row: i32,
}

impl Offset {
    pub const UP: Offset = Offset::new(0, -1);
    pub const RIGHT: Offset = Offset::new(1, 0);
    pub const DOWN: Offset = Offset::new(0, 1);
    pub const LEFT: Offset = Offset::new(-1, 0);
    pub const UP_RIGHT: Offset = Offset::new(1, -1);
    pub const DOWN_RIGHT: Offset = Offset::new(1, 1);
    pub const DOWN_LEFT: Offset = Offset::new(-1, 1);
    pub const UP_LEFT: Offset = Offset::new(-1, -1);

    /// Create a new offset.
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Quarter turn clockwise (up becomes right).
    pub fn turn_clockwise(self) -> Self {
        Self::new(-self.row, self.col)
    }

    /// Quarter turn counter-clockwise (up becomes left).
    pub fn turn_counter_clockwise(self) -> Self {
        Self::new(self.row, -self.col)
    }

    /// The opposite direction.
    pub fn reversed(self) -> Self {
        Self::new(-self.col, -self.row)
    }
}

/// The four orthogonal neighbours in the default evaluation order.
pub const ORTHOGONAL: [Offset; 4] = [Offset::UP, Offset::RIGHT, Offset::DOWN, Offset::LEFT];

/// Orthogonal neighbours followed by the four diagonals, used for branches.
pub const ALL_EIGHT: [Offset; 8] = [
    Offset::UP,
    Offset::RIGHT,
    Offset::DOWN,
    Offset::LEFT,
    Offset::UP_RIGHT,
    Offset::DOWN_RIGHT,
    Offset::DOWN_LEFT,
    Offset::UP_LEFT,
];

/// Strategy deciding the order in which candidate directions are tried.
pub trait DirectionOrder {
    /// Arrange `directions` into the order they should be evaluated in.
    fn arrange(&self, directions: &[Offset]) -> Vec<Offset>;
}

/// Evaluate directions exactly as given.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityOrder;

impl DirectionOrder for IdentityOrder {
    fn arrange(&self, directions: &[Offset]) -> Vec<Offset> {
        directions.to_vec()
    }
}

/// Evaluate a pinned sequence first, then any remaining directions in input order.
#[derive(Debug, Clone, Default)]
pub struct FixedOrder(pub Vec<Offset>);

impl DirectionOrder for FixedOrder {
    fn arrange(&self, directions: &[Offset]) -> Vec<Offset> {
        let mut arranged: Vec<Offset> = self
            .0
            .iter()
            .copied()
            .filter(|d| directions.contains(d))
            .collect();
        for dir in directions {
            if !arranged.contains(dir) {
                arranged.push(*dir);
            }
        }
        arranged
    }
}

/// Shuffle directions with the thread-local RNG for visual variety.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShuffledOrder;

impl DirectionOrder for ShuffledOrder {
    fn arrange(&self, directions: &[Offset]) -> Vec<Offset> {
        let mut arranged = directions.to_vec();
        arranged.shuffle(&mut rand::thread_rng());
        arranged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offset_and_distance() {
        let origin = GridPosition::origin();
        let up = origin.offset(Offset::UP);
        assert_eq!(up, GridPosition::new(0, -1));
        assert_eq!(origin.manhattan_distance(GridPosition::new(-2, 3)), 5);
        assert_eq!(origin.delta_to(GridPosition::new(2, -1)), Offset::new(2, -1));
        assert_eq!(GridPosition::new(-3, 7).to_string(), "-3,7");
    }

    #[test]
    fn test_lattice_edge_does_not_overflow() {
        let edge = GridPosition::new(i32::MAX, i32::MIN);
        assert_eq!(edge.offset(Offset::RIGHT), edge);
        assert_eq!(edge.offset(Offset::UP), edge);
        assert_eq!(edge.offset(Offset::LEFT), GridPosition::new(i32::MAX - 1, i32::MIN));
        assert_eq!(edge.manhattan_distance(GridPosition::new(i32::MIN, i32::MAX)), u32::MAX);
    }

    #[test]
    fn test_turns() {
        assert_eq!(Offset::UP.turn_clockwise(), Offset::RIGHT);
        assert_eq!(Offset::RIGHT.turn_clockwise(), Offset::DOWN);
        assert_eq!(Offset::UP.turn_counter_clockwise(), Offset::LEFT);
        assert_eq!(Offset::LEFT.reversed(), Offset::RIGHT);
    }

    #[test]
    fn test_fixed_order_appends_missing_directions() {
        let order = FixedOrder(vec![Offset::LEFT, Offset::DOWN]);
        let arranged = order.arrange(&ORTHOGONAL);
        assert_eq!(
            arranged,
            vec![Offset::LEFT, Offset::DOWN, Offset::UP, Offset::RIGHT]
        );
    }

    #[test]
    fn test_shuffled_order_is_a_permutation() {
        let arranged = ShuffledOrder.arrange(&ALL_EIGHT);
        assert_eq!(arranged.len(), 8);
        for dir in ALL_EIGHT {
            assert!(arranged.contains(&dir));
        }
    }
}
