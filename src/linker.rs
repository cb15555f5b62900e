//! Inter-cell wall-following linker and initial-entry routine.

use tracing::instrument;

use crate::cell::CellNode;
use crate::corner::Corner;
use crate::error::{PlannerError, Result};
use crate::geometry::Point;

/// Finds the corner of `next_cell` nearest `curr_point`, returning that
/// corner's point and which [`Corner`] it is.
///
/// Compares [`Point::distance_squared`] rather than Euclidean distance,
/// which never needs floating point and gives the same nearest-point
/// result.
pub fn find_next_entrance(
    curr_point: Point,
    next_cell: &CellNode,
    robot_radius: i32,
) -> Result<(Point, Corner)> {
    let corners = next_cell.corner_points(robot_radius).ok_or_else(|| {
        PlannerError::Internal(format!(
            "cell {} has no valid corner points for robot radius {robot_radius} (only {} columns)",
            next_cell.index,
            next_cell.width()
        ))
    })?;

    let (index, point) = corners
        .iter()
        .enumerate()
        .min_by_key(|(_, p)| p.distance_squared(&curr_point))
        .map(|(i, p)| (i, *p))
        .expect("corner_points always returns exactly four points");

    Ok((point, Corner::from_index(index)))
}

struct WallSegments {
    left: Vec<Point>,
    bottom: Vec<Point>,
    right: Vec<Point>,
    top: Vec<Point>,
}

/// Builds the four inset perimeter segments of `cell`, each running in its
/// "natural" direction (left/top top-to-bottom or left-to-right; the
/// direction each is actually consumed in depends on which corner pair
/// `exit_along_wall` is routing between).
fn wall_segments(cell: &CellNode, corners: &[Point; 4], robot_radius: i32) -> WallSegments {
    let inset = (robot_radius + 1) as usize;
    let r1 = robot_radius + 1;
    let n = cell.width();

    let left = (corners[0].y..corners[1].y)
        .map(|y| Point::new(corners[0].x, y))
        .collect();
    let right = (corners[3].y..corners[2].y)
        .map(|y| Point::new(corners[3].x, y))
        .collect();

    let mut top = Vec::new();
    let mut bottom = Vec::new();
    for i in inset..(n - inset) {
        top.push(Point::new(cell.ceiling[i].x, cell.ceiling[i].y + r1));
        bottom.push(Point::new(cell.floor[i].x, cell.floor[i].y - r1));
    }

    WallSegments {
        left,
        bottom,
        right,
        top,
    }
}

/// Walks the inset perimeter of `cell` from `start` to `end` (identified by
/// their corner indicators), returning the wall points strictly between
/// them in travel order.
///
/// The four corners only admit two routes between any pair (the short way
/// around for adjacent corners, a fixed two-segment route for opposite
/// corners), so the twelve corner-pair cases are enumerated rather than
/// computed generically.
fn exit_along_wall(
    start: Corner,
    end: Corner,
    cell: &CellNode,
    corners: &[Point; 4],
    robot_radius: i32,
) -> Vec<Point> {
    use Corner::*;

    if start == end {
        return Vec::new();
    }

    let w = wall_segments(cell, corners, robot_radius);

    match (start, end) {
        (TopLeft, TopRight) => w.top,
        (TopLeft, BottomLeft) => w.left,
        (TopLeft, BottomRight) => w.left.into_iter().chain(w.bottom).collect(),
        (TopRight, TopLeft) => w.top.into_iter().rev().collect(),
        (TopRight, BottomLeft) => w.top.into_iter().rev().chain(w.left).collect(),
        (TopRight, BottomRight) => w.right,
        (BottomLeft, TopLeft) => w.left.into_iter().rev().collect(),
        (BottomLeft, TopRight) => w
            .bottom
            .into_iter()
            .chain(w.right.into_iter().rev())
            .collect(),
        (BottomLeft, BottomRight) => w.bottom,
        (BottomRight, TopLeft) => w
            .right
            .into_iter()
            .rev()
            .chain(w.top.into_iter().rev())
            .collect(),
        (BottomRight, TopRight) => w.right.into_iter().rev().collect(),
        (BottomRight, BottomLeft) => w.bottom.into_iter().rev().collect(),
        (TopLeft, TopLeft)
        | (TopRight, TopRight)
        | (BottomLeft, BottomLeft)
        | (BottomRight, BottomRight) => unreachable!("start == end handled above"),
    }
}

/// Builds the full path linking `curr_exit` (a point in `curr_cell`) to
/// `next_entrance` (a point in `next_cell`): first walk `curr_cell`'s inset
/// perimeter from `curr_exit` to the corner nearest `next_entrance`, then
/// an axis-aligned dogleg from there to `next_entrance`.
///
/// The dogleg order depends on whether `next_entrance`'s y falls within
/// the y-band spanned by `curr_cell`'s inset ceiling/floor at whichever
/// end `exit` sits near: if so, move vertically first then horizontally;
/// otherwise horizontally first then vertically. If `exit` sits at
/// neither the left nor right inset band, this returns
/// `PlannerError::Internal` rather than silently picking an order (see
/// `DESIGN.md`'s Open Question (c)).
#[instrument(skip(curr_cell, next_cell), fields(curr = curr_cell.index, next = next_cell.index))]
pub fn find_linking_path(
    curr_exit: Point,
    next_entrance: Point,
    curr_cell: &CellNode,
    next_cell: &CellNode,
    robot_radius: i32,
) -> Result<Vec<Point>> {
    let curr_corners = curr_cell.corner_points(robot_radius).ok_or_else(|| {
        PlannerError::Internal(format!(
            "cell {} has no valid corner points for robot radius {robot_radius} (only {} columns)",
            curr_cell.index,
            curr_cell.width()
        ))
    })?;

    let start_corner = curr_corners
        .iter()
        .position(|&p| p == curr_exit)
        .map(Corner::from_index)
        .ok_or_else(|| {
            PlannerError::Internal(format!(
                "curr_exit {curr_exit:?} is not one of cell {}'s corner points",
                curr_cell.index
            ))
        })?;

    let (exit, exit_corner) = find_next_entrance(next_entrance, curr_cell, robot_radius)?;
    let mut path = exit_along_wall(start_corner, exit_corner, curr_cell, &curr_corners, robot_radius);

    let inset = (robot_radius + 1) as usize;
    let r1 = robot_radius + 1;
    let n = curr_cell.width();

    let increment_x = (next_entrance.x - exit.x).signum();
    let increment_y = (next_entrance.y - exit.y).signum();

    let mut band = None;
    if exit.x >= curr_cell.ceiling[n - 1].x - r1 {
        band = Some((
            curr_cell.ceiling[n - 1 - inset].y,
            curr_cell.floor[n - 1 - inset].y,
        ));
    }
    if exit.x <= curr_cell.ceiling[0].x + r1 {
        band = Some((curr_cell.ceiling[inset].y, curr_cell.floor[inset].y));
    }
    let (upper_bound, lower_bound) = band.ok_or_else(|| {
        PlannerError::Internal(format!(
            "exit point {exit:?} in cell {} is not near either inset column band",
            curr_cell.index
        ))
    })?;

    if next_entrance.y >= upper_bound && next_entrance.y <= lower_bound {
        let mut y = exit.y;
        while y != next_entrance.y {
            path.push(Point::new(exit.x, y));
            y += increment_y;
        }
        let mut x = exit.x;
        while x != next_entrance.x {
            path.push(Point::new(x, next_entrance.y));
            x += increment_x;
        }
    } else {
        let mut x = exit.x;
        while x != next_entrance.x {
            path.push(Point::new(x, exit.y));
            x += increment_x;
        }
        let mut y = exit.y;
        while y != next_entrance.y {
            path.push(Point::new(next_entrance.x, y));
            y += increment_y;
        }
    }

    Ok(path)
}

/// The robot's first steps from `start` down to the cell's inset row, then
/// left along the inset ceiling to the `TopLeft` corner.
pub fn path_initialization(start: Point, cell: &CellNode, robot_radius: i32) -> Vec<Point> {
    let index_offset = (start.x - cell.ceiling[0].x).unsigned_abs() as usize;
    let r1 = robot_radius + 1;

    let mut path = Vec::new();
    let mut y = start.y;
    while y >= cell.ceiling[index_offset].y + r1 {
        path.push(Point::new(start.x, y));
        y -= 1;
    }

    let mut i = index_offset as i32;
    while i >= robot_radius + 1 {
        let p = cell.ceiling[i as usize];
        path.push(Point::new(p.x, p.y + r1));
        i -= 1;
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
    fn same_corner_exit_is_empty() {
        let cell = wide_cell();
        let corners = cell.corner_points(5).unwrap();
        let path = exit_along_wall(Corner::TopLeft, Corner::TopLeft, &cell, &corners, 5);
        assert!(path.is_empty());
    }

    #[test]
    fn top_left_to_top_right_walks_the_ceiling() {
        let cell = wide_cell();
        let corners = cell.corner_points(5).unwrap();
        let path = exit_along_wall(Corner::TopLeft, Corner::TopRight, &cell, &corners, 5);
        assert!(!path.is_empty());
        for w in path.windows(2) {
            assert!(w[0].x < w[1].x);
        }
    }

    #[test]
    fn opposite_corner_routes_are_not_simple_reverses() {
        let cell = wide_cell();
        let corners = cell.corner_points(5).unwrap();
        let tl_to_br = exit_along_wall(Corner::TopLeft, Corner::BottomRight, &cell, &corners, 5);
        let br_to_tl = exit_along_wall(Corner::BottomRight, Corner::TopLeft, &cell, &corners, 5);
        assert_eq!(tl_to_br.len(), br_to_tl.len());
        assert_ne!(tl_to_br, br_to_tl.into_iter().rev().collect::<Vec<_>>());
    }

    #[test]
    fn find_next_entrance_picks_the_nearest_corner() {
        let cell = wide_cell();
        let corners = cell.corner_points(5).unwrap();
        let (point, corner) = find_next_entrance(corners[0], &cell, 5).unwrap();
        assert_eq!(point, corners[0]);
        assert_eq!(corner, Corner::TopLeft);
    }

    #[test]
    fn path_initialization_descends_then_walks_to_top_left() {
        let cell = wide_cell();
        let start = Point::new(150, 100);
        let path = path_initialization(start, &cell, 5);
        assert!(!path.is_empty());
        let last = *path.last().unwrap();
        let corners = cell.corner_points(5).unwrap();
        assert_eq!(last, corners[0]);
    }
}
