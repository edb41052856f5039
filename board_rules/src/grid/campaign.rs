//! Heading-chasing placement for campaign chains.

use super::{first_free_cell, GridPosition, OccupiedCells, Offset, Placement, PlacementReport, ORTHOGONAL};

/// Initial heading of a campaign starting at `origin`.
///
/// Points away from the lattice origin along the dominant axis, so chains
/// grow outward. At the true origin the heading is rightward.
pub fn initial_heading(origin: GridPosition) -> Offset {
    if origin == GridPosition::origin() {
        Offset::RIGHT
    } else if origin.col.abs() >= origin.row.abs() {
        Offset::new(origin.col.signum(), 0)
    } else {
        Offset::new(0, origin.row.signum())
    }
}

/// Candidate directions for a heading: straight, clockwise, counter-clockwise,
/// reverse, then the remaining orthogonal directions.
pub fn heading_candidates(heading: Offset) -> Vec<Offset> {
    let mut candidates = vec![
        heading,
        heading.turn_clockwise(),
        heading.turn_counter_clockwise(),
        heading.reversed(),
    ];
    for dir in ORTHOGONAL {
        if !candidates.contains(&dir) {
            candidates.push(dir);
        }
    }
    candidates
}

/// Place payloads as a chain leading away from `origin`.
///
/// Each payload is placed next to the previously placed one (the origin for
/// the first). The heading updates to the direction actually used. Payloads
/// that find no free cell are skipped and the chain continues from the last
/// placed cell, so placements come back in chain order.
pub fn place_campaign<T>(
    origin: GridPosition,
    occupied: &mut OccupiedCells,
    payloads: impl IntoIterator<Item = T>,
) -> PlacementReport<T> {
    let mut cursor = origin;
    let mut heading = initial_heading(origin);
    let mut placed = Vec::new();
    let mut skipped = 0;

    for payload in payloads {
        match first_free_cell(cursor, occupied, &heading_candidates(heading)) {
            Some((position, direction)) => {
                occupied.insert(position);
                placed.push(Placement {
                    payload,
                    position,
                    direction,
                });
                cursor = position;
                heading = direction;
            }
            None => skipped += 1,
        }
    }

    tracing::debug!(origin = %origin, placed = placed.len(), skipped, "Placed campaign chain");
    PlacementReport { placed, skipped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_heading() {
        assert_eq!(initial_heading(GridPosition::origin()), Offset::RIGHT);
        assert_eq!(initial_heading(GridPosition::new(-3, 1)), Offset::LEFT);
        assert_eq!(initial_heading(GridPosition::new(1, -4)), Offset::UP);
        assert_eq!(initial_heading(GridPosition::new(0, 2)), Offset::DOWN);
    }

    #[test]
    fn test_heading_candidates_order() {
        assert_eq!(
            heading_candidates(Offset::RIGHT),
            vec![Offset::RIGHT, Offset::DOWN, Offset::UP, Offset::LEFT]
        );
    }

    #[test]
    fn test_campaign_extends_in_a_line() {
        let mut occupied: OccupiedCells = [GridPosition::origin()].into_iter().collect();

        let report = place_campaign(GridPosition::origin(), &mut occupied, vec!['a', 'b', 'c']);

        let positions: Vec<_> = report.placed.iter().map(|p| p.position).collect();
        assert_eq!(
            positions,
            vec![
                GridPosition::new(1, 0),
                GridPosition::new(2, 0),
                GridPosition::new(3, 0),
            ]
        );
    }

    #[test]
    fn test_campaign_turns_around_obstacles() {
        let mut occupied: OccupiedCells = [GridPosition::origin(), GridPosition::new(2, 0)]
            .into_iter()
            .collect();

        let report = place_campaign(GridPosition::origin(), &mut occupied, vec![1, 2, 3]);

        let positions: Vec<_> = report.placed.iter().map(|p| p.position).collect();
        // Blocked straight ahead at (2,0): turn clockwise (down), then keep going down.
        assert_eq!(
            positions,
            vec![
                GridPosition::new(1, 0),
                GridPosition::new(1, 1),
                GridPosition::new(1, 2),
            ]
        );
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_campaign_skips_when_boxed_in() {
        let mut occupied: OccupiedCells = [
            GridPosition::origin(),
            GridPosition::new(0, -1),
            GridPosition::new(1, 0),
            GridPosition::new(0, 1),
            GridPosition::new(-1, 0),
        ]
        .into_iter()
        .collect();

        let report = place_campaign(GridPosition::origin(), &mut occupied, vec![1, 2]);

        assert!(report.is_empty());
        assert_eq!(report.skipped, 2);
    }
}
