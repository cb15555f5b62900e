//! Per-cell zigzag coverage path generator.
//!
//! This switches on which corner the robot enters a cell from and walks
//! ceiling/floor in lockstep, emitting a top-bottom-top-... zigzag inset by
//! `robot_radius + 1` from both chains, stepping `robot_radius` columns at
//! a time and filling the up-to-`robot_radius` columns it skips along
//! whichever chain it just arrived at. The four entry corners are related
//! by the cell's bilateral symmetry (top/bottom, left/right); per an
//! explicit decision recorded in `DESIGN.md`, all four are derived from one
//! parameterized sweep rather than transcribing each branch as a
//! near-duplicate, since a naive `BOTTOMRIGHT` branch does not actually
//! hold that symmetry.

use tracing::instrument;

use crate::cell::CellNode;
use crate::corner::Corner;
use crate::geometry::Point;

/// Generates the coverage path for `cell`, entering at `entry`.
///
/// If `cell.is_cleaned` is true, this is a pass-through visit: the cell
/// has already been swept on an earlier pass through the graph, so only
/// the single corner point nearest `entry` is emitted, letting the linker
/// route through it without re-sweeping.
///
/// If the cell is too narrow for the interior sweep to produce any points
/// (`!cell.fits_robot(robot_radius)`), the zigzag degenerates to nothing
/// and only the corner points remain for the linker to connect through —
/// this is the `DegenerateCell` case, not an error:
/// the caller is expected to have already surfaced a warning for it.
#[instrument(skip(cell), fields(cell = cell.index, ?entry))]
pub fn boustrophedon_path(cell: &CellNode, entry: Corner, robot_radius: i32) -> Vec<Point> {
    if cell.is_cleaned {
        return cell
            .corner_points(robot_radius)
            .map(|pts| vec![pts[entry.index()]])
            .unwrap_or_default();
    }

    if !cell.fits_robot(robot_radius) {
        return Vec::new();
    }

    let (forward, top_first) = match entry {
        Corner::TopLeft => (true, true),
        Corner::TopRight => (false, true),
        Corner::BottomLeft => (true, false),
        Corner::BottomRight => (false, false),
    };
    sweep(cell, robot_radius, forward, top_first)
}

/// Walks the inset column band in steps of `robot_radius` (or 1, if
/// `robot_radius` is 0 — stepping by the radius itself would never
/// advance and loop forever; see `DESIGN.md`), alternating a full
/// ceiling-to-floor or
/// floor-to-ceiling vertical run with up to `robot_radius` fill points
/// along the chain it just reached, bridging the columns the step size
/// skipped.
///
/// `forward` selects the column traversal direction (`true`: left to
/// right, as `TOPLEFT`/`BOTTOMLEFT`; `false`: right to left, as
/// `TOPRIGHT`/`BOTTOMRIGHT`). `top_first` selects which chain the first
/// vertical run starts from (`true`: ceiling, as `TOPLEFT`/`TOPRIGHT`;
/// `false`: floor, as `BOTTOMLEFT`/`BOTTOMRIGHT`). The four corners are
/// exactly these two independent choices.
fn sweep(cell: &CellNode, robot_radius: i32, forward: bool, top_first: bool) -> Vec<Point> {
    let r1 = robot_radius + 1;
    let n = cell.width() as i32;
    let step = robot_radius.max(1);
    let front_x = cell.ceiling[0].x;
    let back_x = cell.ceiling[(n - 1) as usize].x;
    let last = n - 1 - r1;

    let mut path = Vec::new();
    let mut on_ceiling_side = top_first;
    let mut i = if forward { r1 } else { last };

    loop {
        let keep_going = if forward { i <= last } else { i >= r1 };
        if !keep_going {
            break;
        }
        let idx = i as usize;
        let x = cell.ceiling[idx].x;

        if on_ceiling_side {
            let y_start = cell.ceiling[idx].y + r1;
            let y_end = cell.floor[idx].y - r1;
            for y in y_start..=y_end {
                path.push(Point::new(x, y));
            }
        } else {
            let y_start = cell.floor[idx].y - r1;
            let y_end = cell.ceiling[idx].y + r1;
            for y in (y_end..=y_start).rev() {
                path.push(Point::new(x, y));
            }
        }

        if robot_radius != 0 {
            let dir = if forward { 1 } else { -1 };
            for j in 1..=robot_radius {
                let xj = x + j * dir;
                let in_bounds = if forward {
                    xj <= back_x - r1
                } else {
                    xj >= front_x + r1
                };
                if !in_bounds {
                    break;
                }
                let col = i + j * dir;
                if col < 0 || col >= n {
                    break;
                }
                let col = col as usize;
                let point = if on_ceiling_side {
                    let p = cell.floor[col];
                    Point::new(xj, p.y - r1)
                } else {
                    let p = cell.ceiling[col];
                    Point::new(xj, p.y + r1)
                };
                path.push(point);
            }
        }

        on_ceiling_side = !on_ceiling_side;
        i += if forward { step } else { -step };
    }

    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::decompose;

    fn wide_cell() -> CellNode {
        let graph = decompose(400, 400, &[]).unwrap();
        graph.get(0).clone()
    }

    #[test]
    fn top_left_starts_on_ceiling_at_the_left_inset_column() {
        let cell = wide_cell();
        let path = boustrophedon_path(&cell, Corner::TopLeft, 5);
        assert_eq!(path[0].x, cell.ceiling[6].x);
        assert_eq!(path[0].y, cell.ceiling[6].y + 6);
    }

    #[test]
    fn top_right_starts_at_the_right_inset_column() {
        let cell = wide_cell();
        let path = boustrophedon_path(&cell, Corner::TopRight, 5);
        let n = cell.width();
        assert_eq!(path[0].x, cell.ceiling[n - 1 - 6].x);
    }

    #[test]
    fn bottom_left_starts_on_the_floor_at_the_left_inset_column() {
        let cell = wide_cell();
        let path = boustrophedon_path(&cell, Corner::BottomLeft, 5);
        assert_eq!(path[0].x, cell.floor[6].x);
        assert_eq!(path[0].y, cell.floor[6].y - 6);
    }

    #[test]
    fn bottom_right_mirrors_both_axes_of_top_left() {
        let cell = wide_cell();
        let top_left = boustrophedon_path(&cell, Corner::TopLeft, 5);
        let bottom_right = boustrophedon_path(&cell, Corner::BottomRight, 5);
        assert_eq!(top_left.len(), bottom_right.len());
        let n = cell.width();
        assert_eq!(bottom_right[0].x, cell.floor[n - 1 - 6].x);
        assert_eq!(bottom_right[0].y, cell.floor[n - 1 - 6].y - 6);
    }

    #[test]
    fn zero_radius_terminates_and_visits_every_inset_column() {
        let cell = wide_cell();
        let path = boustrophedon_path(&cell, Corner::TopLeft, 0);
        assert!(!path.is_empty());
    }

    #[test]
    fn already_cleaned_cell_yields_a_single_waypoint() {
        let mut cell = wide_cell();
        cell.is_cleaned = true;
        let path = boustrophedon_path(&cell, Corner::TopLeft, 5);
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn degenerate_cell_yields_no_interior_points() {
        // width 8 with robot_radius 5: below fits_robot's min_width of 13
        // (no interior sweep), but still >= min_width_for_corners of 7
        // (corners remain well-defined) — the degenerate-cell case.
        let mut cell = wide_cell();
        cell.ceiling.truncate(8);
        cell.floor.truncate(8);
        let path = boustrophedon_path(&cell, Corner::TopLeft, 5);
        assert!(path.is_empty());
        assert!(cell.corner_points(5).is_some());
    }

    #[test]
    fn severely_narrow_cell_has_no_corners_either() {
        let mut cell = wide_cell();
        cell.ceiling.truncate(3);
        cell.floor.truncate(3);
        assert!(cell.corner_points(5).is_none());
        assert!(boustrophedon_path(&cell, Corner::TopLeft, 5).is_empty());
    }
}
