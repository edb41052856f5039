//! Placement of new tiles into free cells around an origin.
//!
//! The engine is pure: it only reads and extends an [`OccupiedCells`] set and
//! never touches the graph. Callers turn the returned placements into nodes
//! and edges.

use super::{DirectionOrder, GridPosition, OccupiedCells, Offset};

/// A payload paired with the lattice cell assigned to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement<T> {
    pub payload: T,
    pub position: GridPosition,
    /// Direction from the origin that produced this cell.
    pub direction: Offset,
}

/// Result of placing payloads one by one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacementReport<T> {
    pub placed: Vec<Placement<T>>,
    /// Number of payloads dropped because no free cell remained.
    pub skipped: usize,
}

impl<T> PlacementReport<T> {
    /// Whether nothing at all could be placed.
    pub fn is_empty(&self) -> bool {
        self.placed.is_empty()
    }
}

/// Find the first direction (in the given order) whose target cell is free.
pub fn first_free_cell(
    origin: GridPosition,
    occupied: &OccupiedCells,
    directions: &[Offset],
) -> Option<(GridPosition, Offset)> {
    directions
        .iter()
        .map(|dir| (origin.offset(*dir), *dir))
        .find(|(pos, _)| *pos != origin && !occupied.contains(pos))
}

/// Place each payload in the first free neighbour of `origin`.
///
/// Directions are arranged once for the whole batch. Every accepted cell is
/// added to `occupied` before the next payload is considered, so payloads in
/// one batch never collide. Payloads with no free cell left are skipped.
pub fn place_each<T>(
    origin: GridPosition,
    occupied: &mut OccupiedCells,
    payloads: impl IntoIterator<Item = T>,
    directions: &[Offset],
    order: &dyn DirectionOrder,
) -> PlacementReport<T> {
    let arranged = order.arrange(directions);
    let mut placed = Vec::new();
    let mut skipped = 0;

    for payload in payloads {
        match first_free_cell(origin, occupied, &arranged) {
            Some((position, direction)) => {
                occupied.insert(position);
                placed.push(Placement {
                    payload,
                    position,
                    direction,
                });
            }
            None => skipped += 1,
        }
    }

    tracing::debug!(origin = %origin, placed = placed.len(), skipped, "Placed payloads");
    PlacementReport { placed, skipped }
}

/// Place a batch that succeeds only if at least one payload fits.
///
/// Returns `None` when payloads were offered but none could be placed; in
/// that case `occupied` is left untouched. An empty batch yields an empty
/// list.
pub fn place_batch<T>(
    origin: GridPosition,
    occupied: &mut OccupiedCells,
    payloads: Vec<T>,
    directions: &[Offset],
    order: &dyn DirectionOrder,
) -> Option<Vec<Placement<T>>> {
    if payloads.is_empty() {
        return Some(Vec::new());
    }

    let mut tentative = occupied.clone();
    let report = place_each(origin, &mut tentative, payloads, directions, order);
    if report.is_empty() {
        return None;
    }

    *occupied = tentative;
    Some(report.placed)
}
