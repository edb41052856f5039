//! Directional focus movement over the lattice.

use serde::{Deserialize, Serialize};

use crate::graph::TaskNode;
use crate::grid::Offset;

/// Arrow-key direction for moving focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Check if a signed offset lies within this direction's cone.
    ///
    /// The offset must move along the direction's axis and that axis must
    /// dominate: ties between the axes count as inside the cone.
    pub fn accepts(self, delta: Offset) -> bool {
        let (dx, dy) = (delta.col, delta.row);
        match self {
            Direction::Up => dy < 0 && dx.abs() <= dy.abs(),
            Direction::Down => dy > 0 && dx.abs() <= dy.abs(),
            Direction::Left => dx < 0 && dy.abs() <= dx.abs(),
            Direction::Right => dx > 0 && dy.abs() <= dx.abs(),
        }
    }

    /// Unit lattice step for this direction.
    pub fn offset(self) -> Offset {
        match self {
            Direction::Up => Offset::UP,
            Direction::Down => Offset::DOWN,
            Direction::Left => Offset::LEFT,
            Direction::Right => Offset::RIGHT,
        }
    }
}

/// Pick the node focus should move to from `from` in `direction`.
///
/// Among nodes inside the direction's cone, the one with the smallest
/// Manhattan distance wins; on exact ties the earliest node in `nodes` wins.
pub fn find_focus_target<'a>(
    nodes: &'a [TaskNode],
    from: &TaskNode,
    direction: Direction,
) -> Option<&'a TaskNode> {
    let mut best: Option<(&TaskNode, u32)> = None;

    for node in nodes.iter().filter(|n| n.id != from.id) {
        let delta = from.position.delta_to(node.position);
        if !direction.accepts(delta) {
            continue;
        }
        let distance = from.position.manhattan_distance(node.position);
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((node, distance));
        }
    }

    best.map(|(node, _)| node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridPosition;

    fn node(id: &str, col: i32, row: i32) -> TaskNode {
        TaskNode::new(id, id, "", GridPosition::new(col, row))
    }

    #[test]
    fn test_direction_cones() {
        assert!(Direction::Up.accepts(Offset::new(0, -1)));
        assert!(Direction::Up.accepts(Offset::new(2, -2)));
        assert!(!Direction::Up.accepts(Offset::new(3, -2)));
        assert!(!Direction::Up.accepts(Offset::new(0, 0)));
        assert!(Direction::Right.accepts(Offset::new(2, 2)));
        assert!(Direction::Left.accepts(Offset::new(-1, 0)));
        assert!(Direction::Down.accepts(Offset::new(-1, 1)));
    }

    #[test]
    fn test_picks_nearest_candidate() {
        let nodes = vec![
            node("root", 0, 0),
            node("far", 0, -3),
            node("near", 1, -1),
            node("side", 4, 0),
        ];

        let target = find_focus_target(&nodes, &nodes[0], Direction::Up).unwrap();
        assert_eq!(target.id.as_str(), "near");

        let target = find_focus_target(&nodes, &nodes[0], Direction::Right).unwrap();
        assert_eq!(target.id.as_str(), "side");
    }

    #[test]
    fn test_first_seen_wins_on_tie() {
        let nodes = vec![node("root", 0, 0), node("left-ish", -1, -1), node("right-ish", 1, -1)];

        let target = find_focus_target(&nodes, &nodes[0], Direction::Up).unwrap();
        assert_eq!(target.id.as_str(), "left-ish");
    }

    #[test]
    fn test_no_candidate() {
        let nodes = vec![node("root", 0, 0), node("above", 0, -1)];
        assert!(find_focus_target(&nodes, &nodes[0], Direction::Down).is_none());
    }
}
